//! Store port traits implemented by the infrastructure layer.

pub mod message;
pub mod podcast;

pub use message::MessageStore;
pub use podcast::PodcastStore;
