//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /send-otp    -> issue a login code (public)
/// POST /verify-otp  -> consume the code, get a bearer token (public)
/// GET  /me          -> current principal (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/me", get(auth::me))
}
