//! SQLite podcast store implementation.
//!
//! Implements `PodcastStore` from `podcraft-core`. Deleting a podcast
//! cascades to its turns through the foreign key on `podcast_turns`.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use podcraft_core::store::PodcastStore;
use podcraft_types::error::StoreError;
use podcraft_types::podcast::{Podcast, PodcastStatus};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `PodcastStore`.
pub struct SqlitePodcastStore {
    pool: DatabasePool,
}

impl SqlitePodcastStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Internal row types
// ---------------------------------------------------------------------------

struct PodcastRow {
    id: String,
    title: String,
    description: String,
    host_id: String,
    duration_seconds: i64,
    summary: Option<String>,
    status: String,
    created_at: String,
    published_at: Option<String>,
}

impl PodcastRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            host_id: row.try_get("host_id")?,
            duration_seconds: row.try_get("duration_seconds")?,
            summary: row.try_get("summary")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            published_at: row.try_get("published_at")?,
        })
    }

    fn into_podcast(self) -> Result<Podcast, StoreError> {
        let status: PodcastStatus = self
            .status
            .parse()
            .map_err(|e: String| StoreError::Query(e))?;

        Ok(Podcast {
            id: parse_uuid(&self.id)?,
            title: self.title,
            description: self.description,
            host_id: self.host_id,
            duration_seconds: self.duration_seconds.max(0) as u32,
            summary: self.summary,
            status,
            created_at: parse_datetime(&self.created_at)?,
            published_at: self.published_at.as_deref().map(parse_datetime).transpose()?,
        })
    }
}

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
// PodcastStore impl
// ---------------------------------------------------------------------------

impl PodcastStore for SqlitePodcastStore {
    async fn create(&self, podcast: &Podcast) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"INSERT INTO podcasts
               (id, title, description, host_id, duration_seconds, summary,
                status, created_at, published_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(podcast.id.to_string())
        .bind(&podcast.title)
        .bind(&podcast.description)
        .bind(&podcast.host_id)
        .bind(podcast.duration_seconds as i64)
        .bind(&podcast.summary)
        .bind(podcast.status.to_string())
        .bind(format_datetime(&podcast.created_at))
        .bind(podcast.published_at.as_ref().map(format_datetime))
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => Err(
                StoreError::Conflict(format!("podcast {} already exists", podcast.id)),
            ),
            Err(e) => Err(StoreError::Query(e.to_string())),
        }
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Podcast>, StoreError> {
        let row = sqlx::query("SELECT * FROM podcasts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let r = PodcastRow::from_row(&row).map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(r.into_podcast()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Podcast>, StoreError> {
        let rows = sqlx::query("SELECT * FROM podcasts ORDER BY created_at DESC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut podcasts = Vec::with_capacity(rows.len());
        for row in &rows {
            let r = PodcastRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            podcasts.push(r.into_podcast()?);
        }
        Ok(podcasts)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM podcasts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_duration(&self, id: &Uuid, seconds: u32) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE podcasts SET duration_seconds = ? WHERE id = ?")
            .bind(seconds as i64)
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_summary(&self, id: &Uuid, summary: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE podcasts SET summary = ? WHERE id = ?")
            .bind(summary)
            .bind(id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn publish(&self, id: &Uuid) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE podcasts SET status = 'published', published_at = ? WHERE id = ?",
        )
        .bind(format_datetime(&Utc::now()))
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use crate::sqlite::turn::SqliteTurnStore;
    use podcraft_core::store::MessageStore;
    use podcraft_types::turn::Turn;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_podcast(title: &str) -> Podcast {
        Podcast::draft(
            title.to_string(),
            "Episode notes".to_string(),
            "host-casual".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);

        let podcast = make_podcast("Creativity");
        store.create(&podcast).await.unwrap();

        let loaded = store.get(&podcast.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Creativity");
        assert_eq!(loaded.host_id, "host-casual");
        assert_eq!(loaded.status, PodcastStatus::Draft);
        assert_eq!(loaded.duration_seconds, 0);
        assert!(loaded.summary.is_none());
        assert!(loaded.published_at.is_none());
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);
        assert!(store.get(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_conflict() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);

        let podcast = make_podcast("Dup");
        store.create(&podcast).await.unwrap();
        let err = store.create(&podcast).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);

        let mut older = make_podcast("Older");
        older.created_at = Utc::now() - chrono::Duration::hours(1);
        let newer = make_podcast("Newer");

        store.create(&older).await.unwrap();
        store.create(&newer).await.unwrap();

        let podcasts = store.list().await.unwrap();
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[0].title, "Newer");
        assert_eq!(podcasts[1].title, "Older");
    }

    #[tokio::test]
    async fn test_update_duration_and_summary() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);

        let podcast = make_podcast("Creativity");
        store.create(&podcast).await.unwrap();

        store.update_duration(&podcast.id, 125).await.unwrap();
        store
            .update_summary(&podcast.id, "A chat about where ideas come from.")
            .await
            .unwrap();

        let loaded = store.get(&podcast.id).await.unwrap().unwrap();
        assert_eq!(loaded.duration_seconds, 125);
        assert_eq!(
            loaded.summary.as_deref(),
            Some("A chat about where ideas come from.")
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);
        let err = store.update_duration(&Uuid::now_v7(), 10).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_publish_stamps_timestamp() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);

        let podcast = make_podcast("Creativity");
        store.create(&podcast).await.unwrap();
        store.publish(&podcast.id).await.unwrap();

        let loaded = store.get(&podcast.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, PodcastStatus::Published);
        assert!(loaded.published_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_cascades_to_turns() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool.clone());
        let turns = SqliteTurnStore::new(pool);

        let podcast = make_podcast("Creativity");
        store.create(&podcast).await.unwrap();
        turns
            .append_turn(&Turn::user(podcast.id, "hello".to_string(), 1))
            .await
            .unwrap();

        store.delete(&podcast.id).await.unwrap();

        assert!(store.get(&podcast.id).await.unwrap().is_none());
        assert!(turns.list_turns(&podcast.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let pool = test_pool().await;
        let store = SqlitePodcastStore::new(pool);
        let err = store.delete(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
