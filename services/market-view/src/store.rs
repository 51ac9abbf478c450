//! Event store for raw ledger records
//!
//! Holds the three raw collections — placed, cancelled, filled — keyed by
//! order id. Pure data, no derived fields: every projection recomputes from
//! a snapshot, so the store never caches anything derivable.
//!
//! Records are append-only. Validation happens exactly once, here, at the
//! parsing boundary: a malformed record is dropped with a logged warning
//! and ingestion continues. Duplicates and fill/cancel contradictions are
//! logged but never crash the append path; membership tests use the
//! last-seen record.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use ledger_types::records::{
    Cancellation, Order, RawCancellationRecord, RawEvent, RawOrderRecord, RawTradeRecord,
    Trade,
};

use ledger_types::ids::OrderId;

/// Result of recording a single raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Record parsed and appended.
    Accepted,
    /// Record was malformed and dropped.
    Dropped,
}

/// Append-only store of raw ledger events.
///
/// Placed orders and cancellations are keyed by id in `BTreeMap`s, giving
/// deterministic ascending-id iteration (the order-book tie-break) with
/// last-write-wins on duplicates. Fills keep full log order in a `Vec` —
/// the trade history must reflect repeated entries — with a companion id
/// set for membership tests.
#[derive(Debug, Default)]
pub struct EventStore {
    placed: BTreeMap<OrderId, Order>,
    cancelled: BTreeMap<OrderId, Cancellation>,
    filled: Vec<Trade>,
    filled_ids: BTreeSet<OrderId>,
    /// Total records accepted.
    records_accepted: u64,
    /// Total malformed records dropped.
    records_dropped: u64,
}

/// An immutable view of the store's collections at a point in time.
///
/// Appends after `snapshot()` never affect an existing snapshot, so any
/// number of concurrent readers may project from one without coordination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSnapshot {
    pub placed: BTreeMap<OrderId, Order>,
    pub cancelled: BTreeMap<OrderId, Cancellation>,
    pub filled: Vec<Trade>,
    pub filled_ids: BTreeSet<OrderId>,
}

impl EventSnapshot {
    /// Whether an order id is open: placed, with no cancellation or fill.
    pub fn is_open(&self, id: OrderId) -> bool {
        self.placed.contains_key(&id)
            && !self.cancelled.contains_key(&id)
            && !self.filled_ids.contains(&id)
    }
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an order placement.
    pub fn record_placed(&mut self, raw: &RawOrderRecord) -> RecordOutcome {
        let order = match Order::try_from(raw) {
            Ok(order) => order,
            Err(err) => return self.drop_record(&err),
        };

        if self.placed.contains_key(&order.id) {
            warn!(id = %order.id, "duplicate placement, last record wins");
        }
        debug!(id = %order.id, "order placed");
        self.placed.insert(order.id, order);
        self.records_accepted += 1;
        RecordOutcome::Accepted
    }

    /// Record an order cancellation.
    pub fn record_cancelled(&mut self, raw: &RawCancellationRecord) -> RecordOutcome {
        let cancel = match Cancellation::try_from(raw) {
            Ok(cancel) => cancel,
            Err(err) => return self.drop_record(&err),
        };

        if self.cancelled.contains_key(&cancel.id) {
            warn!(id = %cancel.id, "duplicate cancellation, last record wins");
        }
        if self.filled_ids.contains(&cancel.id) {
            // A trade is irreversible settlement; the cancellation is kept
            // in the log but has no projection effect.
            warn!(id = %cancel.id, "cancellation for an already-filled order");
        }
        debug!(id = %cancel.id, "order cancelled");
        self.cancelled.insert(cancel.id, cancel);
        self.records_accepted += 1;
        RecordOutcome::Accepted
    }

    /// Record an order fill (trade).
    pub fn record_filled(&mut self, raw: &RawTradeRecord) -> RecordOutcome {
        let trade = match Trade::try_from(raw) {
            Ok(trade) => trade,
            Err(err) => return self.drop_record(&err),
        };

        if self.filled_ids.contains(&trade.id) {
            warn!(id = %trade.id, "duplicate fill for order");
        }
        if self.cancelled.contains_key(&trade.id) {
            warn!(id = %trade.id, "fill for an already-cancelled order, fill wins");
        }
        debug!(id = %trade.id, "order filled");
        self.filled_ids.insert(trade.id);
        self.filled.push(trade);
        self.records_accepted += 1;
        RecordOutcome::Accepted
    }

    /// Record a raw event of any kind.
    pub fn apply(&mut self, event: &RawEvent) -> RecordOutcome {
        match event {
            RawEvent::Placed(raw) => self.record_placed(raw),
            RawEvent::Cancelled(raw) => self.record_cancelled(raw),
            RawEvent::Filled(raw) => self.record_filled(raw),
        }
    }

    /// Take an immutable snapshot of all three collections.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            placed: self.placed.clone(),
            cancelled: self.cancelled.clone(),
            filled: self.filled.clone(),
            filled_ids: self.filled_ids.clone(),
        }
    }

    /// Total records accepted since creation.
    pub fn records_accepted(&self) -> u64 {
        self.records_accepted
    }

    /// Total malformed records dropped since creation.
    pub fn records_dropped(&self) -> u64 {
        self.records_dropped
    }

    fn drop_record(&mut self, err: &ledger_types::errors::RecordError) -> RecordOutcome {
        warn!(error = %err, "dropping malformed record");
        self.records_dropped += 1;
        RecordOutcome::Dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_types::ids::Address;

    const TOKEN: &str = "0x00000000000000000000000000000000000000a1";
    const USER: &str = "0x00000000000000000000000000000000000000b2";

    fn raw_order(id: u64) -> RawOrderRecord {
        RawOrderRecord {
            id: id.to_string(),
            user: USER.to_string(),
            token_give: Address::zero().to_string(),
            amount_give: "1000000000000000000".to_string(),
            token_get: TOKEN.to_string(),
            amount_get: "100000000000000000000".to_string(),
            timestamp: "1700000000".to_string(),
        }
    }

    fn raw_cancel(id: u64) -> RawCancellationRecord {
        RawCancellationRecord {
            id: id.to_string(),
            timestamp: "1700000100".to_string(),
        }
    }

    fn raw_trade(id: u64) -> RawTradeRecord {
        RawTradeRecord {
            id: id.to_string(),
            user: USER.to_string(),
            user_fill: TOKEN.to_string(),
            token_give: Address::zero().to_string(),
            amount_give: "1000000000000000000".to_string(),
            token_get: TOKEN.to_string(),
            amount_get: "100000000000000000000".to_string(),
            timestamp: "1700000200".to_string(),
        }
    }

    #[test]
    fn test_record_all_kinds() {
        let mut store = EventStore::new();
        assert_eq!(store.record_placed(&raw_order(1)), RecordOutcome::Accepted);
        assert_eq!(
            store.record_cancelled(&raw_cancel(2)),
            RecordOutcome::Accepted
        );
        assert_eq!(store.record_filled(&raw_trade(3)), RecordOutcome::Accepted);
        assert_eq!(store.records_accepted(), 3);
        assert_eq!(store.records_dropped(), 0);

        let snap = store.snapshot();
        assert_eq!(snap.placed.len(), 1);
        assert_eq!(snap.cancelled.len(), 1);
        assert_eq!(snap.filled.len(), 1);
    }

    #[test]
    fn test_malformed_id_dropped_without_failure() {
        let mut store = EventStore::new();
        let mut raw = raw_order(1);
        raw.id = "bogus".to_string();
        assert_eq!(store.record_placed(&raw), RecordOutcome::Dropped);
        assert_eq!(store.records_dropped(), 1);
        assert!(store.snapshot().placed.is_empty());
    }

    #[test]
    fn test_duplicate_placement_last_wins() {
        let mut store = EventStore::new();
        store.record_placed(&raw_order(1));
        let mut second = raw_order(1);
        second.amount_give = "2000000000000000000".to_string();
        store.record_placed(&second);

        let snap = store.snapshot();
        assert_eq!(snap.placed.len(), 1);
        let stored = &snap.placed[&OrderId::new(1)];
        assert_eq!(
            stored.amount_give,
            rust_decimal::Decimal::from_str_exact("2000000000000000000").unwrap()
        );
    }

    #[test]
    fn test_duplicate_fill_keeps_both_entries() {
        let mut store = EventStore::new();
        store.record_filled(&raw_trade(1));
        store.record_filled(&raw_trade(1));

        let snap = store.snapshot();
        // History reflects repeated entries; membership is by id.
        assert_eq!(snap.filled.len(), 2);
        assert_eq!(snap.filled_ids.len(), 1);
    }

    #[test]
    fn test_contradictory_cancel_and_fill_both_recorded() {
        let mut store = EventStore::new();
        store.record_placed(&raw_order(1));
        store.record_filled(&raw_trade(1));
        store.record_cancelled(&raw_cancel(1));

        let snap = store.snapshot();
        assert!(snap.cancelled.contains_key(&OrderId::new(1)));
        assert!(snap.filled_ids.contains(&OrderId::new(1)));
        assert!(!snap.is_open(OrderId::new(1)));
    }

    #[test]
    fn test_is_open() {
        let mut store = EventStore::new();
        store.record_placed(&raw_order(1));
        store.record_placed(&raw_order(2));
        store.record_placed(&raw_order(3));
        store.record_cancelled(&raw_cancel(2));
        store.record_filled(&raw_trade(3));

        let snap = store.snapshot();
        assert!(snap.is_open(OrderId::new(1)));
        assert!(!snap.is_open(OrderId::new(2)));
        assert!(!snap.is_open(OrderId::new(3)));
        // Never placed at all
        assert!(!snap.is_open(OrderId::new(4)));
    }

    #[test]
    fn test_snapshot_isolated_from_later_appends() {
        let mut store = EventStore::new();
        store.record_placed(&raw_order(1));
        let snap = store.snapshot();

        store.record_placed(&raw_order(2));
        assert_eq!(snap.placed.len(), 1);
        assert_eq!(store.snapshot().placed.len(), 2);
    }

    #[test]
    fn test_apply_dispatches_by_kind() {
        let mut store = EventStore::new();
        store.apply(&RawEvent::Placed(raw_order(1)));
        store.apply(&RawEvent::Cancelled(raw_cancel(1)));
        store.apply(&RawEvent::Filled(raw_trade(2)));

        let snap = store.snapshot();
        assert_eq!(snap.placed.len(), 1);
        assert_eq!(snap.cancelled.len(), 1);
        assert_eq!(snap.filled.len(), 1);
    }
}
