//! Ledger event records
//!
//! Two layers: the raw wire form (all fields strings, exactly as the
//! upstream ledger client delivers them) and the parsed, typed form used by
//! the projection service. Parsing is the only place field validation
//! happens; a field that fails to parse yields a [`RecordError`] and the
//! record is dropped at the store boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RecordError;
use crate::ids::{Address, OrderId};

/// Raw order-placed record as delivered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderRecord {
    pub id: String,
    pub user: String,
    pub token_give: String,
    pub amount_give: String,
    pub token_get: String,
    pub amount_get: String,
    pub timestamp: String,
}

/// Raw order-cancelled record as delivered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCancellationRecord {
    pub id: String,
    pub timestamp: String,
}

/// Raw order-filled (trade) record as delivered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTradeRecord {
    pub id: String,
    pub user: String,
    pub user_fill: String,
    pub token_give: String,
    pub amount_give: String,
    pub token_get: String,
    pub amount_get: String,
    pub timestamp: String,
}

/// A raw event of any of the three ledger kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum RawEvent {
    /// An order was placed on the ledger
    Placed(RawOrderRecord),
    /// A previously placed order was cancelled
    Cancelled(RawCancellationRecord),
    /// A previously placed order was filled (traded)
    Filled(RawTradeRecord),
}

impl RawEvent {
    /// Get the event kind as a string label for logging.
    pub fn kind_label(&self) -> &'static str {
        match self {
            RawEvent::Placed(_) => "Placed",
            RawEvent::Cancelled(_) => "Cancelled",
            RawEvent::Filled(_) => "Filled",
        }
    }
}

/// A parsed order placement. Immutable once created; identified uniquely
/// by `id`, assigned by the external ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub creator: Address,
    pub token_give: Address,
    /// Amount offered, in ledger base units.
    pub amount_give: Decimal,
    pub token_get: Address,
    /// Amount requested, in ledger base units.
    pub amount_get: Decimal,
    /// Unix seconds.
    pub timestamp: i64,
}

/// A parsed cancellation, referencing an [`Order`] by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cancellation {
    pub id: OrderId,
    /// Unix seconds.
    pub timestamp: i64,
}

/// A parsed trade — the execution of an order. `id` matches the
/// originating order's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: OrderId,
    pub creator: Address,
    pub filler: Address,
    pub token_give: Address,
    pub amount_give: Decimal,
    pub token_get: Address,
    pub amount_get: Decimal,
    /// Unix seconds.
    pub timestamp: i64,
}

fn parse_id(record: &'static str, value: &str) -> Result<OrderId, RecordError> {
    value
        .trim()
        .parse::<u64>()
        .map(OrderId::new)
        .map_err(|_| RecordError::malformed(record, "id", value))
}

fn parse_address(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<Address, RecordError> {
    Address::try_new(value).ok_or_else(|| RecordError::malformed(record, field, value))
}

fn parse_amount(
    record: &'static str,
    field: &'static str,
    value: &str,
) -> Result<Decimal, RecordError> {
    Decimal::from_str_exact(value.trim())
        .ok()
        .filter(|d| !d.is_sign_negative())
        .ok_or_else(|| RecordError::malformed(record, field, value))
}

fn parse_timestamp(record: &'static str, value: &str) -> Result<i64, RecordError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| RecordError::malformed(record, "timestamp", value))
}

impl TryFrom<&RawOrderRecord> for Order {
    type Error = RecordError;

    fn try_from(raw: &RawOrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id("order", &raw.id)?,
            creator: parse_address("order", "user", &raw.user)?,
            token_give: parse_address("order", "tokenGive", &raw.token_give)?,
            amount_give: parse_amount("order", "amountGive", &raw.amount_give)?,
            token_get: parse_address("order", "tokenGet", &raw.token_get)?,
            amount_get: parse_amount("order", "amountGet", &raw.amount_get)?,
            timestamp: parse_timestamp("order", &raw.timestamp)?,
        })
    }
}

impl TryFrom<&RawCancellationRecord> for Cancellation {
    type Error = RecordError;

    fn try_from(raw: &RawCancellationRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id("cancellation", &raw.id)?,
            timestamp: parse_timestamp("cancellation", &raw.timestamp)?,
        })
    }
}

impl TryFrom<&RawTradeRecord> for Trade {
    type Error = RecordError;

    fn try_from(raw: &RawTradeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id("trade", &raw.id)?,
            creator: parse_address("trade", "user", &raw.user)?,
            filler: parse_address("trade", "userFill", &raw.user_fill)?,
            token_give: parse_address("trade", "tokenGive", &raw.token_give)?,
            amount_give: parse_amount("trade", "amountGive", &raw.amount_give)?,
            token_get: parse_address("trade", "tokenGet", &raw.token_get)?,
            amount_get: parse_amount("trade", "amountGet", &raw.amount_get)?,
            timestamp: parse_timestamp("trade", &raw.timestamp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0x00000000000000000000000000000000000000a1";
    const USER: &str = "0x00000000000000000000000000000000000000b2";

    fn raw_order() -> RawOrderRecord {
        RawOrderRecord {
            id: "1".to_string(),
            user: USER.to_string(),
            token_give: Address::zero().to_string(),
            amount_give: "2000000000000000000".to_string(),
            token_get: TOKEN.to_string(),
            amount_get: "100000000000000000000".to_string(),
            timestamp: "1700000000".to_string(),
        }
    }

    #[test]
    fn test_parse_order() {
        let order = Order::try_from(&raw_order()).unwrap();
        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.creator, Address::new(USER));
        assert!(order.token_give.is_zero());
        assert_eq!(
            order.amount_give,
            Decimal::from_str_exact("2000000000000000000").unwrap()
        );
        assert_eq!(order.timestamp, 1700000000);
    }

    #[test]
    fn test_parse_order_rejects_bad_id() {
        let mut raw = raw_order();
        raw.id = "not-an-id".to_string();
        let err = Order::try_from(&raw).unwrap_err();
        assert!(matches!(err, RecordError::Malformed { field: "id", .. }));
    }

    #[test]
    fn test_parse_order_rejects_bad_address() {
        let mut raw = raw_order();
        raw.token_give = "0x123".to_string();
        let err = Order::try_from(&raw).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Malformed {
                field: "tokenGive",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_order_rejects_negative_amount() {
        let mut raw = raw_order();
        raw.amount_get = "-5".to_string();
        assert!(Order::try_from(&raw).is_err());
    }

    #[test]
    fn test_parse_cancellation() {
        let raw = RawCancellationRecord {
            id: "7".to_string(),
            timestamp: "1700000100".to_string(),
        };
        let cancel = Cancellation::try_from(&raw).unwrap();
        assert_eq!(cancel.id, OrderId::new(7));
        assert_eq!(cancel.timestamp, 1700000100);
    }

    #[test]
    fn test_parse_trade() {
        let raw = RawTradeRecord {
            id: "3".to_string(),
            user: USER.to_string(),
            user_fill: TOKEN.to_string(),
            token_give: Address::zero().to_string(),
            amount_give: "1000000000000000000".to_string(),
            token_get: TOKEN.to_string(),
            amount_get: "50000000000000000000".to_string(),
            timestamp: "1700000200".to_string(),
        };
        let trade = Trade::try_from(&raw).unwrap();
        assert_eq!(trade.id, OrderId::new(3));
        assert_eq!(trade.filler, Address::new(TOKEN));
    }

    #[test]
    fn test_raw_event_kind_label() {
        let event = RawEvent::Placed(raw_order());
        assert_eq!(event.kind_label(), "Placed");
    }

    #[test]
    fn test_raw_event_serialization_roundtrip() {
        let event = RawEvent::Placed(raw_order());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event_type\":\"Placed\""));
        assert!(json.contains("\"tokenGive\""));
        let back: RawEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_typed_order_serialization_roundtrip() {
        let order = Order::try_from(&raw_order()).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
