//! Completion provider port.

pub mod provider;

pub use provider::{CompletionProvider, CompletionStream};
