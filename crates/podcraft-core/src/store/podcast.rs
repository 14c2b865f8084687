//! PodcastStore trait definition.
//!
//! CRUD over podcast records plus the two derived-field updates the session
//! orchestrator performs on finish (duration and summary).

use podcraft_types::error::StoreError;
use podcraft_types::podcast::Podcast;
use uuid::Uuid;

/// Store trait for podcast record persistence.
///
/// Implementations live in podcraft-infra (e.g. `SqlitePodcastStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait PodcastStore: Send + Sync {
    /// Create a new podcast record.
    fn create(
        &self,
        podcast: &Podcast,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Get a podcast by id.
    fn get(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Podcast>, StoreError>> + Send;

    /// List all podcasts, most recent first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Podcast>, StoreError>> + Send;

    /// Delete a podcast and (by cascade) its turns.
    fn delete(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Update the derived duration estimate.
    fn update_duration(
        &self,
        id: &Uuid,
        seconds: u32,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Attach a generated summary.
    fn update_summary(
        &self,
        id: &Uuid,
        summary: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Mark a podcast published and stamp `published_at`.
    fn publish(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
