//! Market View Service
//!
//! Consumes the ledger's append-only event log and derives:
//! - The current open order book, partitioned into buy/sell sides
//! - The filled-trade history with directional price coloring
//! - An OHLC candle series plus last-price summary for charting
//!
//! The log is the only source of truth: state is rebuilt deterministically
//! by replaying history, then kept consistent as live events stream in.
//! Projections are pure reads over an immutable store snapshot, so
//! re-running any of them on unchanged state yields identical output.
//!
//! # Architecture
//!
//! ```text
//! LedgerSource (fetch + subscribe)
//!        │
//!   ┌────┴─────┐
//!   │          │
//! ┌─▼──────┐ ┌─▼────┐
//! │Replay  │ │Live  │
//! └────┬───┘ └──┬───┘
//!      └───┬────┘
//!      ┌───▼────┐
//!      │ Store  │  ← single append path
//!      └───┬────┘
//!   ┌──────┼───────────┐
//! ┌─▼──┐ ┌─▼─────┐ ┌───▼────┐
//! │Book│ │Trades │ │Candles │
//! └────┘ └───────┘ └────────┘
//! ```

pub mod config;
pub mod decorate;
pub mod live;
pub mod order_book;
pub mod price_series;
pub mod replay;
pub mod service;
pub mod source;
pub mod store;
pub mod trade_history;

pub use config::ViewConfig;
pub use service::MarketView;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
