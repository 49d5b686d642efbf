//! Handler for telephony status callbacks.
//!
//! The telephony collaborator reports call outcomes here; this is the only
//! path that completes or fails a call, and therefore the only path that
//! moves money for calls. Guarded by an optional shared secret header
//! (`x-webhook-token`); when `WEBHOOK_TOKEN` is unset the endpoint is open,
//! which is only acceptable in development.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use formulaw_core::billing::call_cost;
use formulaw_core::calls::{CALL_COMPLETED, CALL_FAILED};
use formulaw_core::error::CoreError;
use formulaw_core::types::DbId;
use formulaw_core::validation::validate_duration_minutes;
use formulaw_db::models::call::CompleteOutcome;
use formulaw_db::repositories::CallRepo;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::advocate::MessageResponse;
use crate::state::AppState;

/// Status payload posted by the telephony collaborator.
#[derive(Debug, Deserialize)]
pub struct CallStatusRequest {
    pub call_id: DbId,
    /// `completed` or `failed`.
    pub status: String,
    /// Metered duration; required for `completed`.
    pub duration_minutes: Option<Decimal>,
    /// Optional failure reason for `failed`.
    pub reason: Option<String>,
}

/// POST /api/webhooks/telephony/call-status
///
/// Settle a call. Completion debits the client, credits the advocate and
/// appends both ledger rows in one transaction; failure moves no money.
/// Terminal calls reject a second report with a conflict, so a retried
/// webhook cannot double-bill.
pub async fn call_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CallStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    // 1. Shared-secret check, when configured.
    if let Some(expected) = &state.config.webhook_token {
        let presented = headers
            .get("x-webhook-token")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if presented != expected {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid webhook token".into(),
            )));
        }
    }

    match input.status.as_str() {
        CALL_COMPLETED => complete(&state, &input).await,
        CALL_FAILED => fail(&state, &input).await,
        other => Err(AppError::Core(CoreError::Validation(format!(
            "Unknown call status: {other}"
        )))),
    }
}

async fn complete(state: &AppState, input: &CallStatusRequest) -> AppResult<Json<MessageResponse>> {
    let duration = input.duration_minutes.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "duration_minutes is required for completed calls".into(),
        ))
    })?;
    validate_duration_minutes(duration)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // The rate was snapshotted at initiation; the advocate's current rate
    // is irrelevant here.
    let call = CallRepo::find_by_id(&state.pool, input.call_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Call not found".into()))?;
    let total_cost = call_cost(duration, call.cost_per_minute);

    match CallRepo::complete(&state.pool, input.call_id, duration, total_cost).await? {
        CompleteOutcome::Completed(call) => {
            tracing::info!(
                call_id = call.id,
                total_cost = %total_cost,
                duration_minutes = %duration,
                "Call completed and settled"
            );
            Ok(Json(MessageResponse {
                message: "Call completed".to_string(),
            }))
        }
        CompleteOutcome::WrongState => Err(AppError::Core(CoreError::Conflict(
            "Call is not in progress".into(),
        ))),
        CompleteOutcome::Underfunded => {
            // Funds were supposed to be reserved at initiation. This is a
            // consistency violation in reservation logic, not a caller
            // error; everything was rolled back.
            tracing::error!(
                call_id = input.call_id,
                total_cost = %total_cost,
                "Wallet could not cover a completed call; reservation invariant violated"
            );
            Err(AppError::Core(CoreError::Internal(
                "Call settlement failed".into(),
            )))
        }
    }
}

async fn fail(state: &AppState, input: &CallStatusRequest) -> AppResult<Json<MessageResponse>> {
    CallRepo::find_by_id(&state.pool, input.call_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Call not found".into()))?;

    let call = CallRepo::fail(&state.pool, input.call_id, input.reason.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Call is not in progress".into()))
        })?;

    tracing::info!(call_id = call.id, reason = input.reason.as_deref(), "Call failed");
    Ok(Json(MessageResponse {
        message: "Call marked failed".to_string(),
    }))
}
