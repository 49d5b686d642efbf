//! Handlers for the `/client` resource (directory browsing, calls, wallet,
//! profile).
//!
//! All handlers require the `client` role via [`RequireClient`].

use axum::extract::{Path, Query, State};
use axum::Json;
use formulaw_core::error::CoreError;
use formulaw_core::types::DbId;
use formulaw_core::validation::{validate_positive_amount, validate_rating};
use formulaw_core::verification::VERIFICATION_APPROVED;
use formulaw_db::models::advocate::{AdvocateResponse, AdvocateSearchFilter};
use formulaw_db::models::call::CallResponse;
use formulaw_db::models::user::UpdateUserProfile;
use formulaw_db::models::wallet::{TransactionResponse, WalletResponse};
use formulaw_db::repositories::{AdvocateRepo, CallRepo, UserRepo, WalletRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::advocate::MessageResponse;
use crate::middleware::rbac::RequireClient;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /client/initiate-call`.
#[derive(Debug, Deserialize)]
pub struct InitiateCallRequest {
    pub advocate_id: DbId,
}

/// Response for `POST /client/initiate-call`.
#[derive(Debug, Serialize)]
pub struct InitiateCallResponse {
    pub message: String,
    pub call_id: DbId,
    pub advocate_name: String,
    pub cost_per_minute: Decimal,
}

/// Request body for `POST /client/rate-call`.
#[derive(Debug, Deserialize)]
pub struct RateCallRequest {
    pub call_id: DbId,
    pub rating: i32,
}

/// Request body for `POST /client/wallet/topup`.
///
/// The payment id is the gateway's reference; a replayed id credits
/// nothing the second time.
#[derive(Debug, Deserialize)]
pub struct TopupRequest {
    pub amount: Decimal,
    pub razorpay_payment_id: Option<String>,
}

/// Response for `POST /client/wallet/topup`.
#[derive(Debug, Serialize)]
pub struct TopupResponse {
    pub message: String,
    pub new_balance: Decimal,
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// GET /api/client/advocates
///
/// Search the public directory: approved, on-duty advocates, filtered by
/// `law_type`/`city`/`language` and sorted per `sort_by`.
pub async fn search_advocates(
    RequireClient(_auth): RequireClient,
    State(state): State<AppState>,
    Query(filter): Query<AdvocateSearchFilter>,
) -> AppResult<Json<Vec<AdvocateResponse>>> {
    let advocates = AdvocateRepo::search(&state.pool, &filter).await?;
    Ok(Json(advocates.into_iter().map(AdvocateResponse::from).collect()))
}

/// GET /api/client/advocate/{id}
///
/// Advocate detail. Any registered advocate resolves, not just those
/// currently listed in search results.
pub async fn advocate_detail(
    RequireClient(_auth): RequireClient,
    State(state): State<AppState>,
    Path(advocate_id): Path<DbId>,
) -> AppResult<Json<AdvocateResponse>> {
    let advocate = AdvocateRepo::find_by_user_id(&state.pool, advocate_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Advocate")))?;
    Ok(Json(AdvocateResponse::from(advocate)))
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

/// POST /api/client/initiate-call
///
/// Start a metered call. The advocate must be approved and on duty, the
/// wallet must cover at least one minute at the advocate's current rate,
/// and the client must not already have a live call. The per-minute rate is
/// snapshotted onto the call row; later rate changes do not affect it.
pub async fn initiate_call(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<InitiateCallRequest>,
) -> AppResult<Json<InitiateCallResponse>> {
    // 1. The advocate must exist and be reachable.
    let advocate = AdvocateRepo::find_by_user_id(&state.pool, input.advocate_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Advocate")))?;

    if advocate.verification_status != VERIFICATION_APPROVED || !advocate.duty_status {
        return Err(AppError::Core(CoreError::Conflict(
            "Advocate is currently offline".into(),
        )));
    }

    // 2. Reserve at least one minute's cost. Completion relies on this
    //    check having held the funds.
    let wallet = WalletRepo::find_by_user(&state.pool, auth.user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Wallet")))?;
    if wallet.balance < advocate.per_minute_charge {
        return Err(AppError::Core(CoreError::InsufficientBalance(
            "Insufficient wallet balance. Please add money to your wallet.".into(),
        )));
    }

    // 3. Create the call. A concurrent second initiation loses on the
    //    one-live-call index rather than a read-then-check race.
    let call = CallRepo::create(
        &state.pool,
        auth.user.id,
        advocate.user_id,
        advocate.per_minute_charge,
    )
    .await
    .map_err(|err| match formulaw_db::unique_violation(&err).as_deref() {
        Some("uq_calls_active_client") => {
            AppError::Core(CoreError::Conflict("You already have a call in progress".into()))
        }
        _ => AppError::Database(err),
    })?;

    tracing::info!(
        call_id = call.id,
        client_id = auth.user.id,
        advocate_id = advocate.user_id,
        "Call initiated"
    );

    Ok(Json(InitiateCallResponse {
        message: "Call initiated successfully".to_string(),
        call_id: call.id,
        advocate_name: format!("{} {}", advocate.first_name, advocate.last_name),
        cost_per_minute: call.cost_per_minute,
    }))
}

/// GET /api/client/call-history
pub async fn call_history(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CallResponse>>> {
    let calls = CallRepo::list_for_client(&state.pool, auth.user.id).await?;
    Ok(Json(calls.into_iter().map(CallResponse::from).collect()))
}

/// POST /api/client/rate-call
///
/// Rate a completed call, once. The rating folds into the advocate's
/// running average. Another client's call id reads as not-found.
pub async fn rate_call(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<RateCallRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_rating(input.rating).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let call = CallRepo::find_by_id_for_client(&state.pool, input.call_id, auth.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Call not found".into()))?;

    if call.status != formulaw_core::calls::CALL_COMPLETED {
        return Err(AppError::Core(CoreError::Conflict(
            "Can only rate completed calls".into(),
        )));
    }
    if call.rating.is_some() {
        return Err(AppError::Core(CoreError::Conflict("Call already rated".into())));
    }

    // The repo re-checks `rating IS NULL` inside the transaction; a
    // concurrent double-rating loses there.
    let applied = CallRepo::rate(&state.pool, call.id, call.advocate_id, input.rating).await?;
    if !applied {
        return Err(AppError::Core(CoreError::Conflict("Call already rated".into())));
    }

    Ok(Json(MessageResponse {
        message: "Rating submitted successfully".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// GET /api/client/wallet
pub async fn get_wallet(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<WalletResponse>> {
    let wallet = WalletRepo::find_by_user(&state.pool, auth.user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Wallet")))?;
    Ok(Json(WalletResponse::from(wallet)))
}

/// POST /api/client/wallet/topup
///
/// Credit the wallet. Idempotent on `razorpay_payment_id`: a gateway retry
/// with the same id credits nothing and returns the current balance with
/// the same success shape.
pub async fn topup_wallet(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<TopupRequest>,
) -> AppResult<Json<TopupResponse>> {
    validate_positive_amount(input.amount)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let outcome = WalletRepo::topup(
        &state.pool,
        auth.user.id,
        input.amount,
        input.razorpay_payment_id.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::not_found("Wallet")))?;

    if outcome.duplicate {
        tracing::info!(
            user_id = auth.user.id,
            reference = input.razorpay_payment_id.as_deref(),
            "Duplicate top-up reference ignored"
        );
    }

    Ok(Json(TopupResponse {
        message: "Wallet topped up successfully".to_string(),
        new_balance: outcome.new_balance,
    }))
}

/// GET /api/client/wallet/transactions
pub async fn wallet_transactions(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionResponse>>> {
    let txns = WalletRepo::transactions(&state.pool, auth.user.id).await?;
    Ok(Json(txns.into_iter().map(TransactionResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// PUT /api/client/profile
///
/// Update the client's own name/city. Only provided fields are applied.
pub async fn update_profile(
    RequireClient(auth): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<MessageResponse>> {
    UserRepo::update_profile(&state.pool, auth.user.id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User")))?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}
