//! Route definitions for the `/client` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/client` (all require the `client` role).
///
/// ```text
/// GET  /advocates            -> directory search (filters + sort)
/// GET  /advocate/{id}        -> advocate detail
/// POST /initiate-call        -> start a metered call
/// GET  /call-history         -> own calls, newest first
/// POST /rate-call            -> rate a completed call
/// GET  /wallet               -> balance
/// POST /wallet/topup         -> credit (idempotent on payment id)
/// GET  /wallet/transactions  -> full ledger
/// PUT  /profile              -> update own name/city
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/advocates", get(client::search_advocates))
        .route("/advocate/{id}", get(client::advocate_detail))
        .route("/initiate-call", post(client::initiate_call))
        .route("/call-history", get(client::call_history))
        .route("/rate-call", post(client::rate_call))
        .route("/wallet", get(client::get_wallet))
        .route("/wallet/topup", post(client::topup_wallet))
        .route("/wallet/transactions", get(client::wallet_transactions))
        .route("/profile", put(client::update_profile))
}
