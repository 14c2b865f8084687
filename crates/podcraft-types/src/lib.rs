//! Shared domain types for Podcraft.
//!
//! Everything the other crates agree on lives here: conversation turns,
//! session lifecycle states, podcast records, host personas, LLM request
//! and stream shapes, and the error taxonomy. This crate has no IO.

pub mod error;
pub mod host;
pub mod llm;
pub mod podcast;
pub mod session;
pub mod turn;
