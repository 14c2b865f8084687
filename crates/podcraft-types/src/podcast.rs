//! Podcast record types.
//!
//! A podcast doubles as a conversation session: its id is the session id
//! used to key the turn history. Duration and summary are derived from the
//! conversation when the user finishes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Publication status of a podcast.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (status IN ('draft', 'published'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodcastStatus {
    Draft,
    Published,
}

impl fmt::Display for PodcastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PodcastStatus::Draft => write!(f, "draft"),
            PodcastStatus::Published => write!(f, "published"),
        }
    }
}

impl FromStr for PodcastStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(PodcastStatus::Draft),
            "published" => Ok(PodcastStatus::Published),
            other => Err(format!("invalid podcast status: '{other}'")),
        }
    }
}

impl Default for PodcastStatus {
    fn default() -> Self {
        PodcastStatus::Draft
    }
}

/// A podcast episode record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Podcast {
    pub id: Uuid,
    /// Conversation topic; immutable for the lifetime of the session.
    pub title: String,
    pub description: String,
    /// Which host persona drives the conversation (e.g. "host-casual").
    pub host_id: String,
    /// Derived duration estimate in seconds; 0 until the first finish.
    pub duration_seconds: u32,
    /// AI-generated summary; None until the conversation is finished.
    pub summary: Option<String>,
    pub status: PodcastStatus,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Podcast {
    /// Create a new draft podcast.
    pub fn draft(title: String, description: String, host_id: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            title,
            description,
            host_id,
            duration_seconds: 0,
            summary: None,
            status: PodcastStatus::Draft,
            created_at: Utc::now(),
            published_at: None,
        }
    }
}
