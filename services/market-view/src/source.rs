//! Ledger source boundary
//!
//! The only interface to the external ledger client: a bounded historical
//! fetch per event kind and a long-lived live subscription. Connection
//! management, identity, and retries all live on the other side of this
//! trait; this core only consumes whatever valid records it is given.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use ledger_types::records::RawEvent;

/// The three ledger event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Placed,
    Cancelled,
    Filled,
}

impl EventKind {
    /// All kinds, in the order the historical loader fetches them.
    pub fn all() -> &'static [EventKind] {
        &[EventKind::Cancelled, EventKind::Filled, EventKind::Placed]
    }
}

/// Errors surfaced by the ingestion boundary.
///
/// These are reported to the caller, never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("historical fetch failed for {kind:?} events: {reason}")]
    FetchFailed { kind: EventKind, reason: String },

    #[error("live subscription failed for {kind:?} events: {reason}")]
    SubscribeFailed { kind: EventKind, reason: String },
}

/// A client of the external ledger's event log.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Fetch all historical events of one kind in a block range. Bounded:
    /// completion is the returned vector.
    async fn fetch_historical(
        &self,
        kind: EventKind,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawEvent>, SourceError>;

    /// Open a live subscription for one kind. The receiver yields events
    /// until the source closes the channel.
    async fn subscribe(
        &self,
        kind: EventKind,
    ) -> Result<mpsc::UnboundedReceiver<RawEvent>, SourceError>;
}
