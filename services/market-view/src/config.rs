//! Configuration for the projection service
//!
//! The base-currency sentinel is deployment-specific, not intrinsic to the
//! projection algorithms, so it is carried here rather than hardcoded.

use ledger_types::ids::Address;
use serde::{Deserialize, Serialize};

use crate::price_series::CandleInterval;

/// Configuration shared by all projectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Address denoting the base currency of the pair. An order giving this
    /// asset is a buy of the token side; prices are base-currency-per-token.
    pub base_currency: Address,
    /// Decimal count used to scale raw base-unit amounts to display units.
    pub amount_decimals: u32,
    /// Candle bucket width for the price series.
    pub interval: CandleInterval,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_currency: Address::zero(),
            amount_decimals: 18,
            interval: CandleInterval::H1,
        }
    }
}
