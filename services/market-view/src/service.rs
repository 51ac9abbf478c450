//! Owning facade over the event store and projectors
//!
//! One `MarketView` owns one [`EventStore`] behind a write lock; historical
//! replay and the live update task both append through [`MarketView::apply`],
//! so there is a single logical writer. The three query operations clone a
//! snapshot under a read lock and project outside it — projections are pure
//! and any number of readers may run concurrently.
//!
//! Every accepted append bumps a monotonic revision published on a watch
//! channel, which is the recompute signal for display consumers.

use std::sync::{PoisonError, RwLock};

use tokio::sync::watch;
use tracing::info;

use ledger_types::records::RawEvent;

use crate::config::ViewConfig;
use crate::order_book::{OrderBook, OrderBookProjector};
use crate::price_series::{PriceSeries, PriceSeriesAggregator};
use crate::store::{EventSnapshot, EventStore, RecordOutcome};
use crate::trade_history::{TradeHistoryEntry, TradeHistoryProjector};

pub struct MarketView {
    store: RwLock<EventStore>,
    config: ViewConfig,
    book: OrderBookProjector,
    history: TradeHistoryProjector,
    series: PriceSeriesAggregator,
    revision: watch::Sender<u64>,
}

impl MarketView {
    pub fn new(config: ViewConfig) -> Self {
        info!(base_currency = %config.base_currency, "MarketView initialized");
        let (revision, _) = watch::channel(0);
        Self {
            store: RwLock::new(EventStore::new()),
            book: OrderBookProjector::new(config.clone()),
            history: TradeHistoryProjector::new(config.clone()),
            series: PriceSeriesAggregator::new(config.clone()),
            config,
            revision,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Append a raw event through the single writer path.
    ///
    /// Bumps the revision counter when the record is accepted.
    pub fn apply(&self, event: &RawEvent) -> RecordOutcome {
        let outcome = self
            .store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(event);
        if outcome == RecordOutcome::Accepted {
            self.revision.send_modify(|rev| *rev += 1);
        }
        outcome
    }

    /// Take an immutable snapshot of the store.
    pub fn snapshot(&self) -> EventSnapshot {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// The current open order book. Pure query.
    pub fn get_order_book(&self) -> OrderBook {
        self.book.project(&self.snapshot())
    }

    /// The filled-trade history, newest first. Pure query.
    pub fn get_trade_history(&self) -> Vec<TradeHistoryEntry> {
        self.history.project(&self.snapshot())
    }

    /// The OHLC candle series and last-price summary. Pure query.
    pub fn get_price_series(&self) -> PriceSeries {
        self.series.project(&self.snapshot())
    }

    /// Current revision: the count of accepted appends.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Subscribe to revision bumps to know when to recompute.
    pub fn subscribe_revision(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Total records accepted since creation.
    pub fn records_accepted(&self) -> u64 {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records_accepted()
    }

    /// Total malformed records dropped since creation.
    pub fn records_dropped(&self) -> u64 {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records_dropped()
    }
}
