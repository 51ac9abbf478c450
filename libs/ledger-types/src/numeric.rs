//! Fixed-point helpers for ledger amounts
//!
//! All amounts use rust_decimal for deterministic arithmetic. Raw records
//! carry amounts in ledger base units (e.g. wei); display values are the
//! same quantity scaled down by the asset's decimal count.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places a derived price is rounded to.
pub const PRICE_DECIMALS: u32 = 5;

/// Scale a base-unit amount down to display units.
///
/// `to_units(1_500_000_000_000_000_000, 18)` is `1.5`.
pub fn to_units(base_amount: Decimal, decimals: u32) -> Decimal {
    (base_amount * Decimal::new(1, decimals)).normalize()
}

/// Round a derived price to [`PRICE_DECIMALS`] places.
///
/// Rounds half-up away from zero; ledger amounts are non-negative, so this
/// matches conventional arithmetic rounding.
pub fn round_price(price: Decimal) -> Decimal {
    price
        .round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_units_wei() {
        let wei = Decimal::from_str_exact("1500000000000000000").unwrap();
        assert_eq!(to_units(wei, 18), Decimal::from_str_exact("1.5").unwrap());
    }

    #[test]
    fn test_to_units_zero_decimals() {
        let amount = Decimal::from(42);
        assert_eq!(to_units(amount, 0), amount);
    }

    #[test]
    fn test_round_price_truncates_to_five_places() {
        let p = Decimal::from_str_exact("0.0123456789").unwrap();
        assert_eq!(round_price(p), Decimal::from_str_exact("0.01235").unwrap());
    }

    #[test]
    fn test_round_price_half_up() {
        let p = Decimal::from_str_exact("0.000015").unwrap();
        assert_eq!(round_price(p), Decimal::from_str_exact("0.00002").unwrap());
    }

    #[test]
    fn test_round_price_exact_value_unchanged() {
        let p = Decimal::from_str_exact("0.02").unwrap();
        assert_eq!(round_price(p), p);
    }

    proptest::proptest! {
        #[test]
        fn round_price_is_idempotent(n in 0u64..1_000_000_000, d in 1u64..1_000_000_000) {
            let price = Decimal::from(n) / Decimal::from(d);
            let rounded = round_price(price);
            proptest::prop_assert_eq!(round_price(rounded), rounded);
            proptest::prop_assert!(rounded.scale() <= PRICE_DECIMALS);
        }
    }
}
