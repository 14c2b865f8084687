//! Persistence coordinator: ledger-gated, at-most-once turn flushing.
//!
//! For any turn id, at most one successful `append_turn` call is made over
//! the session's lifetime. On failure the ledger is NOT updated, so the
//! turn stays eligible for an opportunistic retry on the next flush trigger
//! (next submission or finish). The session's single-threaded event
//! processing (`&mut self` methods) makes the check-then-set atomic.

use tracing::warn;

use podcraft_types::error::StoreError;
use podcraft_types::turn::{Turn, TurnRole};

use crate::store::MessageStore;

use super::ledger::DedupLedger;

/// Tracks which turns have been flushed and performs the gated writes.
#[derive(Debug, Default)]
pub struct PersistenceCoordinator {
    ledger: DedupLedger,
}

impl PersistenceCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &DedupLedger {
        &self.ledger
    }

    /// Seed the ledger from historically loaded turns (all pre-persisted).
    pub fn seed_history(&mut self, turns: &[Turn]) {
        self.ledger.seed(turns.iter().map(|t| t.id));
    }

    /// Flush one turn to the store at most once.
    ///
    /// Returns `Ok(true)` if the turn was appended, `Ok(false)` if the
    /// ledger (or the turn's own flag) shows it was already flushed.
    /// System turns are never flushed.
    pub async fn flush<M: MessageStore>(
        &mut self,
        store: &M,
        turn: &mut Turn,
    ) -> Result<bool, StoreError> {
        if turn.role == TurnRole::System {
            return Ok(false);
        }
        if turn.persisted || self.ledger.contains(&turn.id) {
            return Ok(false);
        }

        store.append_turn(turn).await?;

        self.ledger.record(turn.id);
        turn.persisted = true;
        Ok(true)
    }

    /// Retry every unflushed turn, in sequence order.
    ///
    /// Failures are logged and skipped; the turns remain eligible for the
    /// next trigger. Returns the number of turns flushed.
    pub async fn flush_pending<M: MessageStore>(
        &mut self,
        store: &M,
        turns: &mut [Turn],
    ) -> usize {
        let mut flushed = 0;
        for turn in turns.iter_mut() {
            match self.flush(store, turn).await {
                Ok(true) => flushed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(turn_id = %turn.id, sequence = turn.sequence, error = %e,
                        "Turn flush failed; will retry on next trigger");
                }
            }
        }
        flushed
    }
}
