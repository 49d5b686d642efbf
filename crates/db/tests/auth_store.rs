//! Repository-level tests for OTP challenges and sessions, covering the
//! time-dependent edges the HTTP tests cannot reach.

use assert_matches::assert_matches;
use chrono::Utc;
use sqlx::PgPool;

use formulaw_db::models::otp::ConsumeOutcome;
use formulaw_db::models::session::CreateSession;
use formulaw_db::repositories::{OtpRepo, SessionRepo, UserRepo};

/// Re-issuing replaces the live challenge, and the replaced code stops
/// working.
#[sqlx::test]
async fn test_reissue_invalidates_prior_code(pool: PgPool) {
    let first = OtpRepo::issue(&pool, "c@example.com", "client", "111111", 600, 0)
        .await
        .unwrap()
        .expect("first issue should pass");

    let second = OtpRepo::issue(&pool, "c@example.com", "client", "222222", 600, 0)
        .await
        .unwrap()
        .expect("cooldown of zero should allow re-issue");
    assert_eq!(second.id, first.id, "upsert should keep one row per principal");

    let outcome = OtpRepo::consume(&pool, "c@example.com", "client", "111111")
        .await
        .unwrap();
    assert_matches!(outcome, ConsumeOutcome::Invalid);

    let outcome = OtpRepo::consume(&pool, "c@example.com", "client", "222222")
        .await
        .unwrap();
    assert_matches!(outcome, ConsumeOutcome::Consumed);
}

/// Within the cooldown, re-issue is refused and the old code stays live.
#[sqlx::test]
async fn test_cooldown_refuses_reissue(pool: PgPool) {
    OtpRepo::issue(&pool, "c@example.com", "client", "111111", 600, 60)
        .await
        .unwrap()
        .expect("first issue should pass");

    let refused = OtpRepo::issue(&pool, "c@example.com", "client", "222222", 600, 60)
        .await
        .unwrap();
    assert!(refused.is_none());

    let challenge = OtpRepo::find(&pool, "c@example.com", "client")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(challenge.code, "111111");
}

/// A matching code past its TTL reads as expired, not invalid.
#[sqlx::test]
async fn test_expired_code(pool: PgPool) {
    // TTL of zero seconds: expired the moment it is issued.
    OtpRepo::issue(&pool, "c@example.com", "client", "111111", 0, 0)
        .await
        .unwrap()
        .expect("issue should pass");

    let outcome = OtpRepo::consume(&pool, "c@example.com", "client", "111111")
        .await
        .unwrap();
    assert_matches!(outcome, ConsumeOutcome::Expired);
}

/// Expired and revoked sessions do not resolve, and cleanup removes them.
#[sqlx::test]
async fn test_session_lifecycle(pool: PgPool) {
    let user = UserRepo::upsert_client_login(&pool, "c@example.com").await.unwrap();

    let live = CreateSession {
        user_id: user.id,
        token_hash: "live-hash".to_string(),
        expires_at: Utc::now() + chrono::Duration::days(7),
    };
    let stale = CreateSession {
        user_id: user.id,
        token_hash: "stale-hash".to_string(),
        expires_at: Utc::now() - chrono::Duration::minutes(1),
    };
    SessionRepo::create(&pool, &live).await.unwrap();
    SessionRepo::create(&pool, &stale).await.unwrap();

    let resolved = SessionRepo::find_active_user(&pool, "live-hash").await.unwrap();
    assert_eq!(resolved.unwrap().id, user.id);
    assert!(SessionRepo::find_active_user(&pool, "stale-hash")
        .await
        .unwrap()
        .is_none());

    let deleted = SessionRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(deleted, 1);

    // Revocation covers every live session for the user.
    let revoked = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked, 1);
    assert!(SessionRepo::find_active_user(&pool, "live-hash")
        .await
        .unwrap()
        .is_none());
}
