//! SQLite turn store implementation.
//!
//! Implements `MessageStore` from `podcraft-core` using sqlx with split
//! read/write pools. Rows loaded from the store are marked `persisted` so
//! the session layer can seed its dedup ledger from them.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use podcraft_core::store::MessageStore;
use podcraft_types::error::StoreError;
use podcraft_types::turn::{Turn, TurnRole};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `MessageStore`.
pub struct SqliteTurnStore {
    pool: DatabasePool,
}

impl SqliteTurnStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct TurnRow {
    id: String,
    session_id: String,
    role: String,
    content: String,
    sequence: i64,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            sequence: row.try_get("sequence")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<Turn, StoreError> {
        let role: TurnRole = self
            .role
            .parse()
            .map_err(|e: String| StoreError::Query(e))?;

        Ok(Turn {
            id: parse_uuid(&self.id)?,
            session_id: parse_uuid(&self.session_id)?,
            role,
            content: self.content,
            sequence: self.sequence,
            created_at: parse_datetime(&self.created_at)?,
            persisted: true,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_uuid(s: &str) -> Result<Uuid, StoreError> {
    s.parse::<Uuid>()
        .map_err(|e| StoreError::Query(format!("invalid UUID: {e}")))
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

// ---------------------------------------------------------------------------
// MessageStore impl
// ---------------------------------------------------------------------------

impl MessageStore for SqliteTurnStore {
    async fn list_turns(&self, session_id: &Uuid) -> Result<Vec<Turn>, StoreError> {
        let rows = sqlx::query(
            r#"SELECT * FROM podcast_turns
               WHERE session_id = ?
               ORDER BY sequence ASC, created_at ASC"#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = TurnRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            turns.push(r.into_turn()?);
        }
        Ok(turns)
    }

    async fn append_turn(&self, turn: &Turn) -> Result<(), StoreError> {
        // System turns are in-memory only; the schema rejects them too.
        if turn.role == TurnRole::System {
            return Err(StoreError::Conflict(
                "system turns are never persisted".to_string(),
            ));
        }

        let result = sqlx::query(
            r#"INSERT INTO podcast_turns
               (id, session_id, role, content, sequence, created_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(turn.id.to_string())
        .bind(turn.session_id.to_string())
        .bind(turn.role.to_string())
        .bind(&turn.content)
        .bind(turn.sequence)
        .bind(format_datetime(&turn.created_at))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                Err(StoreError::Conflict(format!(
                    "turn {} for session {} sequence {} already exists",
                    turn.id, turn.session_id, turn.sequence
                )))
            }
            Err(e) => Err(StoreError::Query(e.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::podcast::SqlitePodcastStore;
    use crate::sqlite::pool::DatabasePool;
    use podcraft_core::store::PodcastStore;
    use podcraft_types::podcast::Podcast;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn make_session(pool: &DatabasePool) -> Uuid {
        let podcast = Podcast::draft(
            "Creativity".to_string(),
            String::new(),
            "host-casual".to_string(),
        );
        SqlitePodcastStore::new(pool.clone())
            .create(&podcast)
            .await
            .unwrap();
        podcast.id
    }

    #[tokio::test]
    async fn test_append_and_list_in_order() {
        let pool = test_pool().await;
        let session_id = make_session(&pool).await;
        let store = SqliteTurnStore::new(pool);

        // Appended out of sequence order; list must sort.
        store
            .append_turn(&Turn::user(session_id, "second".to_string(), 2))
            .await
            .unwrap();
        store
            .append_turn(&Turn::new(
                session_id,
                TurnRole::Assistant,
                "first".to_string(),
                1,
            ))
            .await
            .unwrap();

        let turns = store.list_turns(&session_id).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "first");
        assert_eq!(turns[1].content, "second");
        assert!(turns.iter().all(|t| t.persisted));
    }

    #[tokio::test]
    async fn test_list_isolated_by_session() {
        let pool = test_pool().await;
        let session_a = make_session(&pool).await;
        let session_b = make_session(&pool).await;
        let store = SqliteTurnStore::new(pool);

        store
            .append_turn(&Turn::user(session_a, "in a".to_string(), 1))
            .await
            .unwrap();
        store
            .append_turn(&Turn::user(session_b, "in b".to_string(), 1))
            .await
            .unwrap();

        let turns = store.list_turns(&session_a).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "in a");
    }

    #[tokio::test]
    async fn test_duplicate_sequence_conflicts() {
        let pool = test_pool().await;
        let session_id = make_session(&pool).await;
        let store = SqliteTurnStore::new(pool);

        store
            .append_turn(&Turn::user(session_id, "one".to_string(), 1))
            .await
            .unwrap();
        let err = store
            .append_turn(&Turn::user(session_id, "also one".to_string(), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_system_turn_rejected() {
        let pool = test_pool().await;
        let session_id = make_session(&pool).await;
        let store = SqliteTurnStore::new(pool);

        let err = store
            .append_turn(&Turn::new(
                session_id,
                TurnRole::System,
                "prompt".to_string(),
                0,
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert!(store.list_turns(&session_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_unknown_session_is_empty() {
        let pool = test_pool().await;
        let store = SqliteTurnStore::new(pool);
        let turns = store.list_turns(&Uuid::now_v7()).await.unwrap();
        assert!(turns.is_empty());
    }
}
