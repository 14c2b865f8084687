//! Derived podcast duration estimate.
//!
//! The formula is a policy knob, not a correctness invariant: a fixed base
//! per spoken turn (the host speaks a little slower than the guest types)
//! plus one second per 30 characters of content.

use podcraft_types::turn::{Turn, TurnRole};

/// Base seconds for a guest (user) turn.
const USER_BASE_SECONDS: u32 = 10;

/// Base seconds for a host (assistant) turn.
const HOST_BASE_SECONDS: u32 = 15;

/// Additional second of estimated speech per this many characters.
const CHARS_PER_EXTRA_SECOND: usize = 30;

/// Estimate the episode duration in seconds from the turn history.
///
/// System turns contribute nothing; they are never spoken.
pub fn estimate_duration(turns: &[Turn]) -> u32 {
    turns
        .iter()
        .filter(|t| t.role != TurnRole::System)
        .map(|t| {
            let base = match t.role {
                TurnRole::User => USER_BASE_SECONDS,
                _ => HOST_BASE_SECONDS,
            };
            base + (t.content.chars().count() / CHARS_PER_EXTRA_SECOND) as u32
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(estimate_duration(&[]), 0);
    }

    #[test]
    fn test_base_times_by_role() {
        let session_id = Uuid::now_v7();
        let turns = vec![
            Turn::user(session_id, "hi".to_string(), 1),
            Turn::new(session_id, TurnRole::Assistant, "yo".to_string(), 2),
        ];
        assert_eq!(estimate_duration(&turns), 10 + 15);
    }

    #[test]
    fn test_length_increment() {
        let session_id = Uuid::now_v7();
        // 60 chars of user content: 10 base + 60/30 = 12 seconds.
        let turns = vec![Turn::user(session_id, "x".repeat(60), 1)];
        assert_eq!(estimate_duration(&turns), 12);
    }

    #[test]
    fn test_system_turns_ignored() {
        let session_id = Uuid::now_v7();
        let turns = vec![Turn::new(
            session_id,
            TurnRole::System,
            "a very long system prompt ".repeat(20),
            0,
        )];
        assert_eq!(estimate_duration(&turns), 0);
    }
}
