//! Handlers for the `/auth` resource (OTP issue/verify, current user).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use formulaw_core::error::CoreError;
use formulaw_core::otp::{generate_code, OTP_RESEND_COOLDOWN_SECS, OTP_TTL_SECS};
use formulaw_core::roles::{validate_role, ROLE_ADMIN, ROLE_ADVOCATE, ROLE_CLIENT};
use formulaw_core::validation::validate_email;
use formulaw_db::models::otp::ConsumeOutcome;
use formulaw_db::models::user::{User, UserResponse};
use formulaw_db::repositories::{AdvocateRepo, OtpRepo, SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::token::generate_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/send-otp`.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
    pub role: String,
}

/// Request body for `POST /auth/verify-otp`.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp_code: String,
    pub role: String,
}

/// Response for `POST /auth/send-otp`.
#[derive(Debug, Serialize)]
pub struct SendOtpResponse {
    pub message: String,
    /// Challenge lifetime in seconds.
    pub expires_in: i64,
}

/// Successful authentication response returned by verify-otp.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/send-otp
///
/// Issue a fresh 6-digit challenge for (email, role) and mail it. A prior
/// unconsumed challenge is invalidated; re-issuing inside the cooldown
/// window is rejected with 429.
pub async fn send_otp(
    State(state): State<AppState>,
    Json(input): Json<SendOtpRequest>,
) -> AppResult<Json<SendOtpResponse>> {
    // 1. Validate input shape before touching state.
    validate_role(&input.role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_email(&input.email).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Upsert the challenge; the cooldown is enforced inside the query.
    let code = generate_code();
    let challenge = OtpRepo::issue(
        &state.pool,
        &input.email,
        &input.role,
        &code,
        OTP_TTL_SECS,
        OTP_RESEND_COOLDOWN_SECS,
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::RateLimited(
            "Please wait before requesting a new OTP".into(),
        ))
    })?;

    // 3. Deliver the code fire-and-forget; a send failure never fails the
    //    request (the user can ask for a resend).
    if let Some(mailer) = state.mailer.clone() {
        let to = challenge.email.clone();
        let code = challenge.code.clone();
        tokio::spawn(async move {
            if let Err(err) = mailer.send_otp(&to, &code).await {
                tracing::error!(error = %err, to = %to, "Failed to send OTP email");
            }
        });
    } else {
        tracing::info!(email = %challenge.email, "SMTP not configured; OTP not mailed");
    }

    Ok(Json(SendOtpResponse {
        message: "OTP sent successfully".to_string(),
        expires_in: OTP_TTL_SECS,
    }))
}

/// POST /api/auth/verify-otp
///
/// Consume the live challenge and log the principal in. Clients are
/// auto-created on first verify; advocates must be registered; admins must
/// be seeded. Replaying a consumed code fails like a wrong code.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Validate the role before the challenge lookup.
    validate_role(&input.role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Single-statement consume: matches only an unconsumed, unexpired code.
    match OtpRepo::consume(&state.pool, &input.email, &input.role, &input.otp_code).await? {
        ConsumeOutcome::Consumed => {}
        ConsumeOutcome::Expired => {
            return Err(AppError::Core(CoreError::Unauthorized("OTP expired".into())));
        }
        ConsumeOutcome::Invalid => {
            return Err(AppError::Core(CoreError::Unauthorized("Invalid OTP".into())));
        }
    }

    // 3. Resolve the principal for the verified (email, role).
    let user = match input.role.as_str() {
        ROLE_CLIENT => {
            // Implicit sign-up: first verify creates the account and wallet.
            UserRepo::upsert_client_login(&state.pool, &input.email).await?
        }
        ROLE_ADVOCATE => {
            AdvocateRepo::find_by_email(&state.pool, &input.email)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound("Advocate not registered. Please register first.".into())
                })?;
            let user = UserRepo::find_by_email_role(&state.pool, &input.email, ROLE_ADVOCATE)
                .await?
                .ok_or_else(|| {
                    AppError::InternalError("Advocate exists without a user row".into())
                })?;
            UserRepo::record_login(&state.pool, user.id).await?;
            user
        }
        ROLE_ADMIN => {
            let user = UserRepo::find_by_email_role(&state.pool, &input.email, ROLE_ADMIN)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Forbidden("Admin account not found".into()))
                })?;
            UserRepo::record_login(&state.pool, user.id).await?;
            user
        }
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown role: {other}"
            ))));
        }
    };

    // 4. Rotate sessions and hand out a fresh bearer token.
    let response = create_auth_response(&state, user).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
///
/// The authenticated principal's profile.
pub async fn me(auth: AuthUser) -> AppResult<Json<UserResponse>> {
    Ok(Json(UserResponse::from(auth.user)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Revoke prior sessions, persist a new one, and build the login response.
///
/// One active token per user, as the original behaves.
async fn create_auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    SessionRepo::revoke_all_for_user(&state.pool, user.id).await?;

    let (plaintext, token_hash) = generate_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_ttl_days);

    let session_input = formulaw_db::models::session::CreateSession {
        user_id: user.id,
        token_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        user: UserResponse::from(user),
        token: plaintext,
        message: "Login successful".to_string(),
    })
}
