//! Dedup ledger: the record of which turn ids have been flushed.
//!
//! Process-local, keyed per session, rebuilt on load. Membership here is
//! the sole gate before any persistence call, which is what makes
//! at-most-once flushing hold even when a flush is triggered from two call
//! sites (stream completion and the defensive flush in finish).

use std::collections::HashSet;

use uuid::Uuid;

/// In-memory set of turn ids already flushed to the message store.
#[derive(Debug, Default)]
pub struct DedupLedger {
    flushed: HashSet<Uuid>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a turn id has already been flushed.
    pub fn contains(&self, turn_id: &Uuid) -> bool {
        self.flushed.contains(turn_id)
    }

    /// Record a successful flush. Returns false if the id was already present.
    pub fn record(&mut self, turn_id: Uuid) -> bool {
        self.flushed.insert(turn_id)
    }

    /// Seed the ledger from historically loaded turn ids.
    pub fn seed(&mut self, turn_ids: impl IntoIterator<Item = Uuid>) {
        self.flushed.extend(turn_ids);
    }

    pub fn len(&self) -> usize {
        self.flushed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flushed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_contains() {
        let mut ledger = DedupLedger::new();
        let id = Uuid::now_v7();
        assert!(!ledger.contains(&id));
        assert!(ledger.record(id));
        assert!(ledger.contains(&id));
    }

    #[test]
    fn test_record_duplicate_returns_false() {
        let mut ledger = DedupLedger::new();
        let id = Uuid::now_v7();
        assert!(ledger.record(id));
        assert!(!ledger.record(id));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_seed() {
        let mut ledger = DedupLedger::new();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::now_v7()).collect();
        ledger.seed(ids.iter().copied());
        assert_eq!(ledger.len(), 3);
        for id in &ids {
            assert!(ledger.contains(id));
        }
    }
}
