//! Completion provider implementations.

pub mod deepseek;
pub mod streaming;

pub use deepseek::DeepSeekProvider;
