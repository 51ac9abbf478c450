//! Types library for the ledger projection system
//!
//! Provides the type definitions shared between the ingestion boundary and
//! the projection service: identifiers, raw wire records, parsed event
//! records, and unit scaling helpers.
//!
//! # Modules
//! - `ids`: Unique identifiers (OrderId, Address)
//! - `records`: Raw wire records and parsed Order/Cancellation/Trade
//! - `numeric`: Base-unit scaling and price rounding
//! - `errors`: Record-level error taxonomy

pub mod errors;
pub mod ids;
pub mod numeric;
pub mod records;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::records::*;
}
