//! Error types for ledger record handling

use thiserror::Error;

/// Errors raised while parsing a raw wire record into a typed event record.
///
/// A malformed record is never fatal to ingestion: the store drops the
/// record, logs the error, and continues with the next one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("malformed {record} record: field `{field}` has invalid value {value:?}")]
    Malformed {
        record: &'static str,
        field: &'static str,
        value: String,
    },
}

impl RecordError {
    /// Build a malformed-field error for the given record kind.
    pub fn malformed(record: &'static str, field: &'static str, value: &str) -> Self {
        Self::Malformed {
            record,
            field,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = RecordError::malformed("order", "id", "not-a-number");
        assert_eq!(
            err.to_string(),
            "malformed order record: field `id` has invalid value \"not-a-number\""
        );
    }
}
