//! One-time password policy and code generation.

use rand::Rng;

/// Number of digits in an OTP code.
pub const OTP_CODE_LEN: usize = 6;

/// Seconds until an issued code expires.
pub const OTP_TTL_SECS: i64 = 60;

/// Seconds a caller must wait before requesting a fresh code for the same
/// `(email, role)` pair.
pub const OTP_RESEND_COOLDOWN_SECS: i64 = 60;

/// Generate a random [`OTP_CODE_LEN`]-digit code.
///
/// Leading zeros are allowed, so the result is always exactly six characters.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..OTP_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}
