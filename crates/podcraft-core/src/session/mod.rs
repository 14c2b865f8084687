//! Session orchestration: state machine, dedup ledger, persistence
//! coordinator, resumption loader, and the duration policy.

pub mod duration;
pub mod flush;
pub mod ledger;
pub mod loader;
pub mod machine;

pub use machine::{FinishReport, SessionOrchestrator};
