//! Conversation turn types.
//!
//! A [`Turn`] is one message in a podcast conversation session. Turns are
//! totally ordered within a session by `sequence`; ties are broken by
//! `created_at` and then insertion order. The `system` turn is never
//! persisted -- it is reconstructed locally from the host persona and topic
//! on every load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a turn in a conversation.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))` -- `system` exists in memory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::System => write!(f, "system"),
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(TurnRole::System),
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message exchanged in a conversation session.
///
/// The `id` is assigned locally (UUID v7) before persistence and is never
/// reused. `persisted` is process-local bookkeeping: it mirrors membership
/// in the dedup ledger and is not stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: TurnRole,
    pub content: String,
    /// Monotonic ordering key within the session.
    pub sequence: i64,
    pub created_at: DateTime<Utc>,
    /// Whether this turn has been flushed to the message store. Local only.
    #[serde(skip)]
    pub persisted: bool,
}

impl Turn {
    /// Create a new unpersisted turn with a fresh time-sortable id.
    pub fn new(session_id: Uuid, role: TurnRole, content: String, sequence: i64) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            role,
            content,
            sequence,
            created_at: Utc::now(),
            persisted: false,
        }
    }

    /// Create a user turn.
    pub fn user(session_id: Uuid, content: String, sequence: i64) -> Self {
        Self::new(session_id, TurnRole::User, content, sequence)
    }

    /// Create an empty assistant turn, ready to accumulate stream deltas.
    pub fn assistant(session_id: Uuid, sequence: i64) -> Self {
        Self::new(session_id, TurnRole::Assistant, String::new(), sequence)
    }
}
