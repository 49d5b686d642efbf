//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (all require the `admin` role).
///
/// ```text
/// GET /advocates               -> every advocate, newest first
/// GET /advocates/pending       -> verification queue, oldest first
/// PUT /advocates/{id}/verify   -> approve or reject
/// GET /users                   -> client accounts
/// GET /calls                   -> every call
/// GET /analytics               -> platform counters
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/advocates", get(admin::list_advocates))
        .route("/advocates/pending", get(admin::list_pending_advocates))
        .route("/advocates/{id}/verify", put(admin::verify_advocate))
        .route("/users", get(admin::list_users))
        .route("/calls", get(admin::list_calls))
        .route("/analytics", get(admin::analytics))
}
