//! Infrastructure implementations for Podcraft.
//!
//! Concrete backends for the ports defined in `podcraft-core`: SQLite
//! persistence (via sqlx), the DeepSeek completion provider (via
//! async-openai), the LLM-backed summarizer, and on-disk configuration.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod summarizer;
