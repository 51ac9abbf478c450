//! Order decoration
//!
//! Pure, stateless derivation of display-ready fields from raw ledger
//! records: normalized amounts, the derived token price, a formatted
//! timestamp, and side/trend classification. Decoration is computed fresh
//! on every projection; nothing here is cached across store appends.
//!
//! Price rounding is half-up away from zero at 5 decimal places (see
//! `ledger_types::numeric`). A zero token amount yields an explicit
//! invalid-price marker (`token_price: None`), never NaN or infinity.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledger_types::ids::{Address, OrderId};
use ledger_types::numeric::{round_price, to_units};
use ledger_types::records::{Order, Trade};

use crate::config::ViewConfig;

/// Errors that can occur during decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecorateError {
    #[error("token price undefined: token amount is zero")]
    DivisionByZero,
}

/// Which side of the pair an order acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Gives the base currency to obtain tokens
    Buy,
    /// Gives tokens to obtain the base currency
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Directional classification used for display coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
}

impl PriceTrend {
    /// Display class consumed by the UI layer.
    pub fn css_class(&self) -> &'static str {
        match self {
            PriceTrend::Up => "success",
            PriceTrend::Down => "danger",
        }
    }

    /// Sign symbol for the price-change summary.
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTrend::Up => "+",
            PriceTrend::Down => "-",
        }
    }
}

/// A raw record enriched with computed display fields. Derived, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoratedOrder {
    pub id: OrderId,
    pub creator: Address,
    /// Base-currency leg, in display units.
    pub ether_amount: Decimal,
    /// Token leg, in display units.
    pub token_amount: Decimal,
    /// Base-currency-per-token price rounded to 5 decimal places.
    /// `None` marks an undefined price (zero token amount).
    pub token_price: Option<Decimal>,
    /// Unix seconds.
    pub timestamp: i64,
    /// UTC wall-clock form `h:mm:ss pm M/D`.
    pub formatted_timestamp: String,
}

/// Compute the base-currency-per-token price, rounded to 5 places.
pub fn token_price(
    ether_amount: Decimal,
    token_amount: Decimal,
) -> Result<Decimal, DecorateError> {
    if token_amount.is_zero() {
        return Err(DecorateError::DivisionByZero);
    }
    Ok(round_price(ether_amount / token_amount))
}

/// Derive the side from which asset the order gives.
pub fn order_side(token_give: &Address, config: &ViewConfig) -> Side {
    if *token_give == config.base_currency {
        Side::Buy
    } else {
        Side::Sell
    }
}

/// Format a Unix-seconds timestamp as `h:mm:ss pm M/D` in UTC.
///
/// Falls back to the raw seconds value for timestamps outside chrono's
/// representable range.
pub fn format_timestamp(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%-I:%M:%S %P %-m/%-d").to_string(),
        None => timestamp.to_string(),
    }
}

fn decorate(
    id: OrderId,
    creator: &Address,
    token_give: &Address,
    amount_give: Decimal,
    amount_get: Decimal,
    timestamp: i64,
    config: &ViewConfig,
) -> DecoratedOrder {
    // The give-side asset decides which leg is the base currency.
    let (ether_raw, token_raw) = if *token_give == config.base_currency {
        (amount_give, amount_get)
    } else {
        (amount_get, amount_give)
    };

    let ether_amount = to_units(ether_raw, config.amount_decimals);
    let token_amount = to_units(token_raw, config.amount_decimals);
    let token_price = token_price(ether_amount, token_amount).ok();

    DecoratedOrder {
        id,
        creator: creator.clone(),
        ether_amount,
        token_amount,
        token_price,
        timestamp,
        formatted_timestamp: format_timestamp(timestamp),
    }
}

/// Decorate a placed order.
pub fn decorate_order(order: &Order, config: &ViewConfig) -> DecoratedOrder {
    decorate(
        order.id,
        &order.creator,
        &order.token_give,
        order.amount_give,
        order.amount_get,
        order.timestamp,
        config,
    )
}

/// Decorate a trade.
pub fn decorate_trade(trade: &Trade, config: &ViewConfig) -> DecoratedOrder {
    decorate(
        trade.id,
        &trade.creator,
        &trade.token_give,
        trade.amount_give,
        trade.amount_get,
        trade.timestamp,
        config,
    )
}
