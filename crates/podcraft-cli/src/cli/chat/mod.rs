//! Interactive chat: the conversation loop between guest and AI host.

pub mod commands;
pub mod input;
pub mod loop_runner;

pub use loop_runner::run_chat_loop;
