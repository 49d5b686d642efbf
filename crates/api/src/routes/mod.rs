pub mod admin;
pub mod advocate;
pub mod auth;
pub mod client;
pub mod health;
pub mod utils;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/send-otp                      issue login code (public)
/// /auth/verify-otp                    consume code, get token (public)
/// /auth/me                            current principal
///
/// /advocate/register                  register advocate (public)
/// /advocate/profile                   get, update own profile
/// /advocate/duty-status               go online/offline (PATCH)
/// /advocate/dashboard                 totals + status
/// /advocate/call-history              own calls
///
/// /client/advocates                   directory search (client only)
/// /client/advocate/{id}               advocate detail
/// /client/initiate-call               start a metered call (POST)
/// /client/call-history                own calls
/// /client/rate-call                   rate a completed call (POST)
/// /client/wallet                      balance
/// /client/wallet/topup                credit wallet (POST, idempotent)
/// /client/wallet/transactions         full ledger
/// /client/profile                     update own profile (PUT)
///
/// /admin/advocates                    all advocates (admin only)
/// /admin/advocates/pending            verification queue
/// /admin/advocates/{id}/verify        approve / reject (PUT)
/// /admin/users                        client accounts
/// /admin/calls                        all calls
/// /admin/analytics                    platform counters
///
/// /webhooks/telephony/call-status     call settlement reports (POST)
///
/// /utils/cities                       static catalogs (public)
/// /utils/law-types
/// /utils/languages
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/advocate", advocate::router())
        .nest("/client", client::router())
        .nest("/admin", admin::router())
        .nest("/webhooks", webhooks::router())
        .nest("/utils", utils::router())
}
