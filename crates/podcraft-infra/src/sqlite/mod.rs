//! SQLite persistence backends.

pub mod podcast;
pub mod pool;
pub mod turn;

pub use podcast::SqlitePodcastStore;
pub use pool::DatabasePool;
pub use turn::SqliteTurnStore;
