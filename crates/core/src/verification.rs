//! Advocate verification state machine.
//!
//! Every advocate starts `pending`. An admin decides `approved` or
//! `rejected`; both decisions are terminal. A rejected advocate cannot
//! re-apply through the API, and an approved one cannot be re-decided.

/// Bar Council verification not yet decided.
pub const VERIFICATION_PENDING: &str = "pending";

/// Verification passed; the advocate may go on duty and take calls.
pub const VERIFICATION_APPROVED: &str = "approved";

/// Verification failed. Terminal.
pub const VERIFICATION_REJECTED: &str = "rejected";

/// Decisions an admin may submit.
pub const VALID_DECISIONS: &[&str] = &[VERIFICATION_APPROVED, VERIFICATION_REJECTED];

/// Validate that a verification decision is one of the accepted values.
pub fn validate_decision(decision: &str) -> Result<(), String> {
    if VALID_DECISIONS.contains(&decision) {
        Ok(())
    } else {
        Err(format!(
            "Invalid verification decision '{decision}'. Must be one of: {}",
            VALID_DECISIONS.join(", ")
        ))
    }
}

/// Whether a decision may be applied to an advocate in `current` state.
///
/// Only `pending` advocates can be decided; `approved` and `rejected` are
/// both terminal.
pub fn can_decide(current: &str) -> bool {
    current == VERIFICATION_PENDING
}
