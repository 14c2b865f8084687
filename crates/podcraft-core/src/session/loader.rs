//! Resumption loader: rebuild in-memory session state from the store.
//!
//! Every historically loaded turn is marked `persisted=true` and its id is
//! seeded into the dedup ledger, so reopening a session can never re-flush
//! history. The loader does not decide Active vs WelcomePending -- that
//! belongs to the state machine, based on whether the result is empty.

use tracing::warn;

use podcraft_types::error::StoreError;
use podcraft_types::turn::{Turn, TurnRole};
use uuid::Uuid;

use crate::store::MessageStore;

use super::flush::PersistenceCoordinator;

/// Load all persisted turns for a session and seed the ledger.
///
/// Returned turns are ordered by `sequence` ascending (ties broken by
/// `created_at`) and contain no system turns: system turns should never be
/// in the store, and any that are found are logged as an integrity warning
/// and dropped, so a system-only history is treated as empty for the
/// welcome decision.
pub async fn load_history<M: MessageStore>(
    store: &M,
    session_id: &Uuid,
    coordinator: &mut PersistenceCoordinator,
) -> Result<Vec<Turn>, StoreError> {
    let mut turns = store.list_turns(session_id).await?;
    turns.sort_by(|a, b| (a.sequence, a.created_at).cmp(&(b.sequence, b.created_at)));

    for turn in &mut turns {
        turn.persisted = true;
    }
    // Seed before filtering: a stray persisted system turn must still be
    // ledgered so nothing ever tries to append it again.
    coordinator.seed_history(&turns);

    let before = turns.len();
    turns.retain(|t| t.role != TurnRole::System);
    if turns.len() != before {
        warn!(
            session_id = %session_id,
            dropped = before - turns.len(),
            "Found persisted system turns in history; dropping (integrity warning)"
        );
    }

    Ok(turns)
}
