//! Handlers for the `/admin` resource (verification decisions, platform
//! listings, analytics).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, State};
use axum::Json;
use formulaw_core::error::CoreError;
use formulaw_core::types::DbId;
use formulaw_core::verification::{validate_decision, VERIFICATION_APPROVED};
use formulaw_db::models::advocate::AdvocateResponse;
use formulaw_db::models::analytics::PlatformStats;
use formulaw_db::models::call::CallResponse;
use formulaw_db::models::user::UserResponse;
use formulaw_db::repositories::{AdvocateRepo, AnalyticsRepo, CallRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::advocate::MessageResponse;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/advocates/{id}/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/advocates
pub async fn list_advocates(
    RequireAdmin(_auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AdvocateResponse>>> {
    let advocates = AdvocateRepo::list_all(&state.pool).await?;
    Ok(Json(advocates.into_iter().map(AdvocateResponse::from).collect()))
}

/// GET /api/admin/advocates/pending
///
/// The verification review queue, oldest first.
pub async fn list_pending_advocates(
    RequireAdmin(_auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AdvocateResponse>>> {
    let advocates = AdvocateRepo::list_pending(&state.pool).await?;
    Ok(Json(advocates.into_iter().map(AdvocateResponse::from).collect()))
}

/// PUT /api/admin/advocates/{id}/verify
///
/// Approve or reject a pending advocate. Both decisions are terminal; a
/// decided advocate cannot be re-decided. Approval triggers a notification
/// mail, sent fire-and-forget.
pub async fn verify_advocate(
    RequireAdmin(auth): RequireAdmin,
    State(state): State<AppState>,
    Path(advocate_id): Path<DbId>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<MessageResponse>> {
    // 1. Only `approved` / `rejected` are decisions.
    validate_decision(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Distinguish "no such advocate" from "already decided".
    let advocate = AdvocateRepo::find_by_user_id(&state.pool, advocate_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Advocate")))?;

    // 3. Guarded update: only a pending advocate can be decided; a
    //    concurrent second decision loses here too.
    let decided = AdvocateRepo::decide(&state.pool, advocate_id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Advocate is already {}",
                advocate.verification_status
            )))
        })?;

    tracing::info!(
        advocate_id,
        fid = %decided.fid,
        decision = %input.status,
        admin_id = auth.user.id,
        "Verification decided"
    );

    // 4. Notify approved advocates by mail, without blocking the response.
    if input.status == VERIFICATION_APPROVED {
        if let Some(mailer) = state.mailer.clone() {
            let to = decided.email.clone();
            let name = format!("{} {}", decided.first_name, decided.last_name);
            tokio::spawn(async move {
                if let Err(err) = mailer.send_approval(&to, &name).await {
                    tracing::error!(error = %err, to = %to, "Failed to send approval email");
                }
            });
        }
    }

    Ok(Json(MessageResponse {
        message: format!("Advocate {} successfully", input.status),
    }))
}

/// GET /api/admin/users
///
/// Client accounts, newest first.
pub async fn list_users(
    RequireAdmin(_auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_clients(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/admin/calls
pub async fn list_calls(
    RequireAdmin(_auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CallResponse>>> {
    let calls = CallRepo::list_all(&state.pool).await?;
    Ok(Json(calls.into_iter().map(CallResponse::from).collect()))
}

/// GET /api/admin/analytics
///
/// Platform-wide counters, computed on demand from the source tables.
pub async fn analytics(
    RequireAdmin(_auth): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<PlatformStats>> {
    let stats = AnalyticsRepo::platform_stats(&state.pool).await?;
    Ok(Json(stats))
}
