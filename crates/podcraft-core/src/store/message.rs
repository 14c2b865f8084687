//! MessageStore trait definition.
//!
//! Persistence of conversation turns keyed by session id. Append-only;
//! ordering is by `sequence` ascending. Uses native async fn in traits
//! (RPITIT, Rust 2024 edition).

use podcraft_types::error::StoreError;
use podcraft_types::turn::Turn;
use uuid::Uuid;

/// Store trait for conversation turn persistence.
///
/// Implementations live in podcraft-infra (e.g. `SqliteTurnStore`).
///
/// `append_turn` is idempotent-unsafe: the caller must not call it twice for
/// the same logical turn. The dedup ledger in the session layer is the sole
/// gate that enforces this.
pub trait MessageStore: Send + Sync {
    /// List all persisted turns for a session, ordered by `sequence` ASC.
    fn list_turns(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, StoreError>> + Send;

    /// Append one turn. Fails with `StoreError` on transient failure.
    fn append_turn(
        &self,
        turn: &Turn,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
