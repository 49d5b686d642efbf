//! Handlers for the `/advocate` resource (registration, profile, duty,
//! dashboard, call history).
//!
//! Registration is public; everything else requires the `advocate` role via
//! [`RequireAdvocate`].

use axum::extract::State;
use axum::Json;
use formulaw_core::error::CoreError;
use formulaw_core::validation::{
    validate_email, validate_non_empty_list, validate_positive_amount, validate_working_hours,
};
use formulaw_core::verification::VERIFICATION_APPROVED;
use formulaw_db::models::advocate::{Advocate, AdvocateResponse, RegisterAdvocate, UpdateAdvocateProfile};
use formulaw_db::models::call::CallResponse;
use formulaw_db::repositories::{AdvocateRepo, CallRepo, WalletRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdvocate;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response for `POST /advocate/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub fid: String,
    pub verification_status: String,
}

/// Request body for `PATCH /advocate/duty-status`.
#[derive(Debug, Deserialize)]
pub struct DutyStatusRequest {
    pub duty_status: bool,
}

/// Dashboard summary for the advocate home screen.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub fid: String,
    pub verification_status: String,
    pub duty_status: bool,
    pub average_rating: f64,
    pub total_cases: i32,
    pub total_earnings: Decimal,
    pub wallet_balance: Decimal,
}

/// Generic `{message}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/advocate/register
///
/// Create an advocate account in `pending`, off duty, with a fresh FID and
/// an empty wallet. Verification happens out of band; the advocate can log
/// in right away but cannot go on duty until approved.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterAdvocate>,
) -> AppResult<Json<RegisterResponse>> {
    // 1. Validate input shape before touching state.
    validate_email(&input.email).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_positive_amount(input.per_minute_charge)
        .map_err(|_| AppError::Core(CoreError::Validation("per_minute_charge must be positive".into())))?;
    validate_non_empty_list(&input.languages, "language")
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_non_empty_list(&input.law_types, "law type")
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_working_hours(&input.working_hours)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 2. Insert user + advocate + wallet in one transaction. A concurrent
    //    duplicate loses on the unique constraints inside the transaction,
    //    so the explicit mapping below also covers the race loser.
    let advocate = AdvocateRepo::register(&state.pool, &input)
        .await
        .map_err(classify_registration_error)?;

    tracing::info!(fid = %advocate.fid, email = %advocate.email, "Advocate registered");

    Ok(Json(RegisterResponse {
        message: "Registration successful. Your Bar Council ID verification is in progress. \
                  This may take up to 24 hours."
            .to_string(),
        fid: advocate.fid,
        verification_status: advocate.verification_status,
    }))
}

/// GET /api/advocate/profile
pub async fn get_profile(
    RequireAdvocate(auth): RequireAdvocate,
    State(state): State<AppState>,
) -> AppResult<Json<AdvocateResponse>> {
    let advocate = load_advocate(&state, auth.user.id).await?;
    Ok(Json(AdvocateResponse::from(advocate)))
}

/// PUT /api/advocate/profile
///
/// Apply only the provided fields. A changed `per_minute_charge` affects
/// future calls only; in-flight calls keep their snapshotted rate.
pub async fn update_profile(
    RequireAdvocate(auth): RequireAdvocate,
    State(state): State<AppState>,
    Json(input): Json<UpdateAdvocateProfile>,
) -> AppResult<Json<MessageResponse>> {
    if let Some(charge) = input.per_minute_charge {
        validate_positive_amount(charge).map_err(|_| {
            AppError::Core(CoreError::Validation("per_minute_charge must be positive".into()))
        })?;
    }
    if let Some(hours) = &input.working_hours {
        validate_working_hours(hours)
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(languages) = &input.languages {
        validate_non_empty_list(languages, "language")
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(law_types) = &input.law_types {
        validate_non_empty_list(law_types, "law type")
            .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    AdvocateRepo::update_profile(&state.pool, auth.user.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Advocate")))?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// PATCH /api/advocate/duty-status
///
/// Going on duty requires an approved verification; going off duty is
/// always allowed.
pub async fn set_duty_status(
    RequireAdvocate(auth): RequireAdvocate,
    State(state): State<AppState>,
    Json(input): Json<DutyStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    let advocate = load_advocate(&state, auth.user.id).await?;

    if input.duty_status && advocate.verification_status != VERIFICATION_APPROVED {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot go online. Your account is not verified yet.".into(),
        )));
    }

    AdvocateRepo::set_duty(&state.pool, auth.user.id, input.duty_status).await?;

    let status_text = if input.duty_status { "online" } else { "offline" };
    tracing::info!(advocate_id = auth.user.id, duty = input.duty_status, "Duty status changed");

    Ok(Json(MessageResponse {
        message: format!("Duty status updated to {status_text}"),
    }))
}

/// GET /api/advocate/dashboard
pub async fn dashboard(
    RequireAdvocate(auth): RequireAdvocate,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardResponse>> {
    let advocate = load_advocate(&state, auth.user.id).await?;
    let wallet_balance = WalletRepo::find_by_user(&state.pool, auth.user.id)
        .await?
        .map(|w| w.balance)
        .unwrap_or_default();

    Ok(Json(DashboardResponse {
        fid: advocate.fid,
        verification_status: advocate.verification_status,
        duty_status: advocate.duty_status,
        average_rating: advocate.average_rating,
        total_cases: advocate.total_cases,
        total_earnings: advocate.total_earnings,
        wallet_balance,
    }))
}

/// GET /api/advocate/call-history
pub async fn call_history(
    RequireAdvocate(auth): RequireAdvocate,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CallResponse>>> {
    let calls = CallRepo::list_for_advocate(&state.pool, auth.user.id).await?;
    Ok(Json(calls.into_iter().map(CallResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the advocate row for an authenticated advocate user.
async fn load_advocate(state: &AppState, user_id: i64) -> AppResult<Advocate> {
    AdvocateRepo::find_by_user_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Advocate")))
}

/// Map registration unique violations onto the contract's conflict wording.
fn classify_registration_error(err: sqlx::Error) -> AppError {
    match formulaw_db::unique_violation(&err).as_deref() {
        Some("uq_advocates_email") | Some("uq_users_email_role") => {
            AppError::Core(CoreError::Conflict("Advocate already registered".into()))
        }
        Some("uq_advocates_bar_council_id") => AppError::Core(CoreError::Conflict(
            "Bar Council ID already registered".into(),
        )),
        _ => AppError::Database(err),
    }
}
