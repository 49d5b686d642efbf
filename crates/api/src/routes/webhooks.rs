//! Route definitions for inbound collaborator webhooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST /telephony/call-status  -> call completion/failure reports
/// ```
///
/// Authenticated by the `x-webhook-token` shared secret when configured.
pub fn router() -> Router<AppState> {
    Router::new().route("/telephony/call-status", post(webhooks::call_status))
}
