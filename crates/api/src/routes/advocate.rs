//! Route definitions for the `/advocate` resource.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::advocate;
use crate::state::AppState;

/// Routes mounted at `/advocate`.
///
/// ```text
/// POST  /register      -> register a new advocate (public)
/// GET   /profile       -> own profile (advocate only)
/// PUT   /profile       -> update own profile
/// PATCH /duty-status   -> go online/offline
/// GET   /dashboard     -> totals + verification/duty status
/// GET   /call-history  -> own calls, newest first
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(advocate::register))
        .route("/profile", get(advocate::get_profile))
        .route("/profile", put(advocate::update_profile))
        .route("/duty-status", patch(advocate::set_duty_status))
        .route("/dashboard", get(advocate::dashboard))
        .route("/call-history", get(advocate::call_history))
}
