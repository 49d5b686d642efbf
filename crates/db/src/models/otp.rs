//! OTP challenge model.

use formulaw_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Live OTP challenge row from the `otp_challenges` table.
///
/// At most one row exists per (email, role); re-issuing overwrites it.
#[derive(Debug, Clone, FromRow)]
pub struct OtpChallenge {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub code: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub consumed: bool,
}

/// Outcome of attempting to consume a challenge.
#[derive(Debug)]
pub enum ConsumeOutcome {
    /// Code matched an unconsumed, unexpired challenge; it is now spent.
    Consumed,
    /// Code matched an unconsumed challenge past its expiry.
    Expired,
    /// No matching unconsumed challenge (wrong code, or already spent).
    Invalid,
}
