//! Session orchestration and port trait definitions for Podcraft.
//!
//! This crate defines the "ports" (store and provider traits) that the
//! infrastructure layer implements, plus the streaming conversation
//! orchestrator built on top of them. It depends only on `podcraft-types` --
//! never on `podcraft-infra` or any database/HTTP crate.

pub mod llm;
pub mod prompt;
pub mod session;
pub mod store;
pub mod summarize;
