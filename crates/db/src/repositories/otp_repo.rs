//! Repository for the `otp_challenges` table.

use formulaw_core::types::DbId;
use sqlx::PgPool;

use crate::models::otp::{ConsumeOutcome, OtpChallenge};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, role, code, issued_at, expires_at, consumed";

/// Provides issue/consume operations for OTP challenges.
pub struct OtpRepo;

impl OtpRepo {
    /// Issue a fresh challenge for (email, role), replacing any prior one.
    ///
    /// The cooldown is enforced inside the upsert: the conflict branch only
    /// applies when the live challenge is at least `cooldown_secs` old, so
    /// two racing resends cannot both pass a read-then-write check. Returns
    /// `None` when the cooldown refused the re-issue.
    pub async fn issue(
        pool: &PgPool,
        email: &str,
        role: &str,
        code: &str,
        ttl_secs: i64,
        cooldown_secs: i64,
    ) -> Result<Option<OtpChallenge>, sqlx::Error> {
        let query = format!(
            "INSERT INTO otp_challenges (email, role, code, expires_at)
             VALUES ($1, $2, $3, NOW() + make_interval(secs => $4))
             ON CONFLICT ON CONSTRAINT uq_otp_challenges_email_role
             DO UPDATE SET
                code = EXCLUDED.code,
                issued_at = NOW(),
                expires_at = NOW() + make_interval(secs => $4),
                consumed = false
             WHERE otp_challenges.issued_at <= NOW() - make_interval(secs => $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OtpChallenge>(&query)
            .bind(email)
            .bind(role)
            .bind(code)
            .bind(ttl_secs as f64)
            .bind(cooldown_secs as f64)
            .fetch_optional(pool)
            .await
    }

    /// Consume the live challenge in a single conditional UPDATE: the code
    /// must match an unconsumed, unexpired row. A replay of a spent code and
    /// a code invalidated by a newer issue both read as `Invalid`.
    pub async fn consume(
        pool: &PgPool,
        email: &str,
        role: &str,
        code: &str,
    ) -> Result<ConsumeOutcome, sqlx::Error> {
        let consumed: Option<DbId> = sqlx::query_scalar(
            "UPDATE otp_challenges SET consumed = true
             WHERE email = $1 AND role = $2 AND code = $3
               AND consumed = false AND expires_at > NOW()
             RETURNING id",
        )
        .bind(email)
        .bind(role)
        .bind(code)
        .fetch_optional(pool)
        .await?;
        if consumed.is_some() {
            return Ok(ConsumeOutcome::Consumed);
        }

        // Distinguish a stale-but-matching code from a plain mismatch, for
        // the error message only.
        let expired: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM otp_challenges
             WHERE email = $1 AND role = $2 AND code = $3 AND consumed = false",
        )
        .bind(email)
        .bind(role)
        .bind(code)
        .fetch_optional(pool)
        .await?;
        Ok(if expired.is_some() {
            ConsumeOutcome::Expired
        } else {
            ConsumeOutcome::Invalid
        })
    }

    /// Fetch the live challenge for (email, role), if any.
    pub async fn find(
        pool: &PgPool,
        email: &str,
        role: &str,
    ) -> Result<Option<OtpChallenge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM otp_challenges WHERE email = $1 AND role = $2");
        sqlx::query_as::<_, OtpChallenge>(&query)
            .bind(email)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}
