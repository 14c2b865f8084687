use thiserror::Error;

use crate::session::SessionState;

/// Errors from store operations (used by trait definitions in podcraft-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the session orchestrator.
///
/// Validation errors (`EmptyInput`, `StreamBusy`, `InvalidState`) leave the
/// session state unchanged. `HistoryLoad` is the one error that moves the
/// session to `Failed`: without its history the session cannot safely
/// proceed (it might generate a duplicate welcome).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session id is missing")]
    MissingSession,

    #[error("input is empty")]
    EmptyInput,

    #[error("operation '{operation}' not valid in state '{state}'")]
    InvalidState {
        state: SessionState,
        operation: &'static str,
    },

    #[error("a completion stream is already in flight")]
    StreamBusy,

    #[error("failed to load session history: {0}")]
    HistoryLoad(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_invalid_state_display() {
        let err = SessionError::InvalidState {
            state: SessionState::Completed,
            operation: "submit_user_input",
        };
        assert!(err.to_string().contains("completed"));
        assert!(err.to_string().contains("submit_user_input"));
    }

    #[test]
    fn test_history_load_from_store_error() {
        let err: SessionError = StoreError::Connection.into();
        assert!(matches!(err, SessionError::HistoryLoad(_)));
    }
}
