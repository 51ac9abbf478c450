//! Unique identifier types for ledger entities
//!
//! Identifiers are assigned by the external ledger and must be treated as
//! globally unique and stable. They arrive on the wire in string form and
//! are validated exactly once, at the parsing boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RecordError;

/// Unique identifier for an order
///
/// A ledger-assigned integer. The same id identifies the order across its
/// placement, cancellation, and fill events.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Wrap a raw ledger id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for OrderId {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| RecordError::malformed("event", "id", s))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger account or asset address
///
/// Normalized form: `0x` followed by 40 lowercase hex digits. The all-zero
/// address conventionally denotes the base currency of a trading pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Create a new Address from a string
    ///
    /// # Panics
    /// Panics if the format is invalid (must be `0x` + 40 hex digits)
    pub fn new(addr: impl Into<String>) -> Self {
        Self::try_new(addr).expect("Address must be 0x followed by 40 hex digits")
    }

    /// Try to create an Address, returning None if invalid
    pub fn try_new(addr: impl Into<String>) -> Option<Self> {
        let s: String = addr.into();
        let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
        if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(format!("0x{}", hex.to_ascii_lowercase())))
        } else {
            None
        }
    }

    /// The all-zero address
    pub fn zero() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    /// Whether this is the all-zero address
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    /// Get the normalized address string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or_else(|| RecordError::malformed("event", "address", s))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_parse() {
        let id: OrderId = "42".parse().unwrap();
        assert_eq!(id, OrderId::new(42));
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_order_id_parse_trims_whitespace() {
        let id: OrderId = " 7 ".parse().unwrap();
        assert_eq!(id, OrderId::new(7));
    }

    #[test]
    fn test_order_id_parse_rejects_garbage() {
        assert!("".parse::<OrderId>().is_err());
        assert!("abc".parse::<OrderId>().is_err());
        assert!("-1".parse::<OrderId>().is_err());
        assert!("1.5".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_order_id_ordering() {
        assert!(OrderId::new(1) < OrderId::new(2));
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(99);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "99");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_address_normalization() {
        let addr = Address::new("0xABCDEF0123456789abcdef0123456789ABCDEF01");
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_address_try_new() {
        assert!(Address::try_new("0x0000000000000000000000000000000000000000").is_some());
        assert!(Address::try_new("0x123").is_none());
        assert!(Address::try_new("no-prefix").is_none());
        assert!(Address::try_new("0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").is_none());
    }

    #[test]
    #[should_panic(expected = "Address must be 0x followed by 40 hex digits")]
    fn test_address_invalid_format() {
        Address::new("INVALID");
    }

    #[test]
    fn test_zero_address() {
        let zero = Address::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.as_str().len(), 42);

        let nonzero = Address::new("0x0000000000000000000000000000000000000001");
        assert!(!nonzero.is_zero());
    }

    #[test]
    fn test_address_serialization() {
        let addr = Address::zero();
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);
    }
}
