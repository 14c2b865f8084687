//! Application state wiring the stores together.
//!
//! `AppState` holds the database pool and loaded configuration. Stores are
//! cheap handles over the pool, so commands construct them on demand.

use std::path::PathBuf;

use podcraft_infra::config::{self, AppConfig};
use podcraft_infra::sqlite::{DatabasePool, SqlitePodcastStore, SqliteTurnStore};

/// Shared application state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AppConfig,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// configuration, and connect to the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = config::data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = AppConfig::load(&data_dir)?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("podcraft.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        Ok(Self {
            data_dir,
            config,
            db_pool,
        })
    }

    pub fn podcast_store(&self) -> SqlitePodcastStore {
        SqlitePodcastStore::new(self.db_pool.clone())
    }

    pub fn turn_store(&self) -> SqliteTurnStore {
        SqliteTurnStore::new(self.db_pool.clone())
    }
}
