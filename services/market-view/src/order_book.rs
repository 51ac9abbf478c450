//! Open order book projection
//!
//! Derives the set of currently-open orders — placed minus cancelled minus
//! filled — and produces the sorted, side-partitioned book. A fill or
//! cancellation always wins over openness, even when the log is
//! contradictory, because membership is computed by subtraction.
//!
//! Deterministic: the same snapshot always yields byte-identical output.

use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;
use crate::decorate::{decorate_order, order_side, DecoratedOrder, PriceTrend, Side};
use crate::store::EventSnapshot;

/// An open order decorated for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookOrder {
    pub order: DecoratedOrder,
    /// Which side of the pair the order acts on.
    pub side: Side,
    /// Display color for the side (buy up, sell down).
    pub side_class: PriceTrend,
    /// The action a counterparty takes to fill this order.
    pub fill_side: Side,
}

/// The side-partitioned open order book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Buy orders, descending by token price.
    pub buy_orders: Vec<BookOrder>,
    /// Sell orders, descending by token price.
    pub sell_orders: Vec<BookOrder>,
}

/// Projects the open order book from a store snapshot.
#[derive(Debug, Clone)]
pub struct OrderBookProjector {
    config: ViewConfig,
}

impl OrderBookProjector {
    pub fn new(config: ViewConfig) -> Self {
        Self { config }
    }

    /// Build the book: open set → decorate → partition → sort.
    ///
    /// Each side is sorted descending by token price. The sort is stable
    /// and the snapshot iterates placed orders in ascending id order, so
    /// price ties preserve ingestion order. Orders with an undefined price
    /// sort last.
    pub fn project(&self, snapshot: &EventSnapshot) -> OrderBook {
        let mut book = OrderBook::default();

        for order in snapshot.placed.values() {
            if !snapshot.is_open(order.id) {
                continue;
            }

            let side = order_side(&order.token_give, &self.config);
            let entry = BookOrder {
                order: decorate_order(order, &self.config),
                side,
                side_class: match side {
                    Side::Buy => PriceTrend::Up,
                    Side::Sell => PriceTrend::Down,
                },
                fill_side: side.opposite(),
            };

            match side {
                Side::Buy => book.buy_orders.push(entry),
                Side::Sell => book.sell_orders.push(entry),
            }
        }

        // Option<Decimal> ordering puts None first ascending, so the
        // descending comparison sorts undefined prices last.
        book.buy_orders
            .sort_by(|a, b| b.order.token_price.cmp(&a.order.token_price));
        book.sell_orders
            .sort_by(|a, b| b.order.token_price.cmp(&a.order.token_price));

        book
    }
}
