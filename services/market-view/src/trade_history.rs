//! Filled-trade history projection
//!
//! Produces the chronological trade history with directional price
//! coloring. Trades are processed in ascending timestamp order so each
//! entry's trend compares against its true predecessor, then the decorated
//! sequence is re-sorted descending for display.
//!
//! One deliberate oddity is preserved from the system this replaces: when
//! consecutive processed entries carry the same order id (a repeated fill
//! record), the later entry classifies Up before any price comparison, and
//! the first trade compares against itself, also yielding Up.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ledger_types::ids::{Address, OrderId};
use rust_decimal::Decimal;

use crate::config::ViewConfig;
use crate::decorate::{decorate_trade, DecoratedOrder, PriceTrend};
use crate::store::EventSnapshot;

/// A trade decorated for history display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistoryEntry {
    pub order: DecoratedOrder,
    /// Account that filled the order.
    pub filler: Address,
    /// Price direction relative to the preceding trade.
    pub price_class: PriceTrend,
}

/// Projects the trade history from a store snapshot.
#[derive(Debug, Clone)]
pub struct TradeHistoryProjector {
    config: ViewConfig,
}

impl TradeHistoryProjector {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    /// Build the history, newest first.
    pub fn project(&self, snapshot: &EventSnapshot) -> Vec<TradeHistoryEntry> {
        let mut trades: Vec<_> = snapshot.filled.iter().collect();
        trades.sort_by_key(|t| t.timestamp);

        let mut entries = Vec::with_capacity(trades.len());
        let mut previous: Option<(OrderId, Option<Decimal>)> = None;

        for trade in trades {
            let decorated = decorate_trade(trade, &self.config);
            let price_class = classify(
                trade.id,
                decorated.token_price,
                previous.unwrap_or((trade.id, decorated.token_price)),
            );
            debug!(id = %trade.id, class = ?price_class, "trade classified");
            previous = Some((trade.id, decorated.token_price));
            entries.push(TradeHistoryEntry {
                order: decorated,
                filler: trade.filler.clone(),
                price_class,
            });
        }

        entries.sort_by(|a, b| b.order.timestamp.cmp(&a.order.timestamp));
        entries
    }
}

/// Classify a trade against its predecessor.
///
/// Undefined prices compare as zero.
fn classify(
    id: OrderId,
    price: Option<Decimal>,
    (prev_id, prev_price): (OrderId, Option<Decimal>),
) -> PriceTrend {
    if prev_id == id {
        return PriceTrend::Up;
    }
    if prev_price.unwrap_or(Decimal::ZERO) <= price.unwrap_or(Decimal::ZERO) {
        PriceTrend::Up
    } else {
        PriceTrend::Down
    }
}
