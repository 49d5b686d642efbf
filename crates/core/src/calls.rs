//! Call lifecycle status constants and transition rules.
//!
//! A call starts `initiated` and moves to exactly one terminal state:
//! `completed` (billed) or `failed` (no monetary movement). Terminal states
//! accept no further transitions.

/// Call created, consultation presumed in progress.
pub const CALL_INITIATED: &str = "initiated";

/// Call finished; duration metered and the client's wallet debited.
pub const CALL_COMPLETED: &str = "completed";

/// Call never connected or was aborted; nothing is charged.
pub const CALL_FAILED: &str = "failed";

/// All statuses a call row can carry.
pub const VALID_CALL_STATUSES: &[&str] = &[CALL_INITIATED, CALL_COMPLETED, CALL_FAILED];

/// Whether a call status is terminal.
pub fn is_terminal(status: &str) -> bool {
    status == CALL_COMPLETED || status == CALL_FAILED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initiated_is_not_terminal() {
        assert!(!is_terminal(CALL_INITIATED));
    }

    #[test]
    fn test_completed_and_failed_are_terminal() {
        assert!(is_terminal(CALL_COMPLETED));
        assert!(is_terminal(CALL_FAILED));
    }

    #[test]
    fn test_status_list_has_three_entries() {
        assert_eq!(VALID_CALL_STATUSES.len(), 3);
    }
}
