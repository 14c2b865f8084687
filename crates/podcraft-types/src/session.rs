//! Session lifecycle states.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a conversation session.
///
/// Normal flow: `Uninitialized -> LoadingHistory -> (WelcomePending | Active)
/// -> Completing -> Completed`. `Failed` is terminal but the session may be
/// retried by re-opening it, which resets to `Uninitialized` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    LoadingHistory,
    /// Empty history: a synthetic welcome turn is being generated.
    WelcomePending,
    Active,
    Completing,
    Completed,
    Failed,
}

impl SessionState {
    /// Whether user input is accepted in this state.
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionState::Active | SessionState::WelcomePending)
    }

    /// Whether the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::LoadingHistory => write!(f, "loading_history"),
            SessionState::WelcomePending => write!(f, "welcome_pending"),
            SessionState::Active => write!(f, "active"),
            SessionState::Completing => write!(f, "completing"),
            SessionState::Completed => write!(f, "completed"),
            SessionState::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uninitialized" => Ok(SessionState::Uninitialized),
            "loading_history" => Ok(SessionState::LoadingHistory),
            "welcome_pending" => Ok(SessionState::WelcomePending),
            "active" => Ok(SessionState::Active),
            "completing" => Ok(SessionState::Completing),
            "completed" => Ok(SessionState::Completed),
            "failed" => Ok(SessionState::Failed),
            other => Err(format!("invalid session state: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip() {
        for state in [
            SessionState::Uninitialized,
            SessionState::LoadingHistory,
            SessionState::WelcomePending,
            SessionState::Active,
            SessionState::Completing,
            SessionState::Completed,
            SessionState::Failed,
        ] {
            let parsed: SessionState = state.to_string().parse().unwrap();
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn test_accepts_input() {
        assert!(SessionState::Active.accepts_input());
        assert!(SessionState::WelcomePending.accepts_input());
        assert!(!SessionState::Completing.accepts_input());
        assert!(!SessionState::Completed.accepts_input());
        assert!(!SessionState::Failed.accepts_input());
    }

    #[test]
    fn test_is_terminal() {
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Failed.is_terminal());
        assert!(!SessionState::Active.is_terminal());
    }
}
