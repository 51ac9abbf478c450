//! Live update handling
//!
//! One spawned task drains a single merged event channel into
//! [`MarketView::apply`]. Per-kind ledger subscriptions are forwarded into
//! that channel, so however many underlying connections feed it, the store
//! sees exactly one writer. No incremental patching: consumers recompute
//! projections from the snapshot when the revision counter moves.
//!
//! Teardown is non-destructive — dropping the senders ends the task after
//! the queue drains, and in-flight projection reads are unaffected.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use ledger_types::records::RawEvent;

use crate::service::MarketView;
use crate::source::{EventKind, LedgerSource, SourceError};

/// Owns the merged live event channel and its writer task.
pub struct LiveUpdateHandler {
    tx: mpsc::UnboundedSender<RawEvent>,
    task: JoinHandle<()>,
}

impl LiveUpdateHandler {
    /// Spawn the writer task appending into the given view.
    pub fn spawn(view: Arc<MarketView>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<RawEvent>();

        let task = tokio::spawn(async move {
            info!("live update handler started");
            while let Some(event) = rx.recv().await {
                debug!(kind = event.kind_label(), "live event received");
                view.apply(&event);
            }
            info!("live feed closed, update handler stopping");
        });

        Self { tx, task }
    }

    /// A sender into the merged channel, for callers that push events
    /// directly.
    pub fn sender(&self) -> mpsc::UnboundedSender<RawEvent> {
        self.tx.clone()
    }

    /// Subscribe to the given event kinds on a ledger source, forwarding
    /// each subscription into the merged channel.
    pub async fn subscribe<S: LedgerSource>(
        &self,
        source: &S,
        kinds: &[EventKind],
    ) -> Result<(), SourceError> {
        for &kind in kinds {
            let mut rx = source.subscribe(kind).await?;
            let tx = self.tx.clone();
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                debug!(?kind, "ledger subscription ended");
            });
        }
        Ok(())
    }

    /// Stop the handler: close the merged channel and wait for the writer
    /// task to drain and exit.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}
