//! Shared helpers for HTTP-level integration tests.
//!
//! [`build_test_app`] constructs the production router (same middleware
//! stack as `main.rs`, no mailer) over a `#[sqlx::test]` pool; the request
//! helpers drive it through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use formulaw_api::auth::token::generate_token;
use formulaw_api::config::ServerConfig;
use formulaw_api::router::build_app_router;
use formulaw_api::state::AppState;
use formulaw_db::models::advocate::{Advocate, RegisterAdvocate};
use formulaw_db::models::session::CreateSession;
use formulaw_db::models::user::User;
use formulaw_db::repositories::{AdvocateRepo, SessionRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and no webhook shared secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_ttl_days: 7,
        webhook_token: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses. No mailer is configured; OTP codes are
/// read straight from the database.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request without authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request with a bearer token and explicit method.
pub async fn send_json_auth(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request with a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json_auth(app, "POST", uri, token, body).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}

/// Assert a status and return the JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Issue a bearer token for a user directly against the sessions table,
/// bypassing the OTP flow (which has its own tests).
pub async fn issue_token(pool: &PgPool, user_id: i64) -> String {
    let (plaintext, token_hash) = generate_token();
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id,
            token_hash,
            expires_at: Utc::now() + chrono::Duration::days(7),
        },
    )
    .await
    .expect("session creation should succeed");
    plaintext
}

/// Create a client account (with wallet) and return it with a login token.
pub async fn create_client(pool: &PgPool, email: &str) -> (User, String) {
    let user = UserRepo::upsert_client_login(pool, email)
        .await
        .expect("client creation should succeed");
    let token = issue_token(pool, user.id).await;
    (user, token)
}

/// Log in the migration-seeded admin account and return its token.
pub async fn admin_token(pool: &PgPool) -> String {
    let admin = UserRepo::find_by_email_role(pool, "admin@formulaw.com", "admin")
        .await
        .expect("admin lookup should succeed")
        .expect("default admin should be seeded");
    issue_token(pool, admin.id).await
}

/// A registration payload with unique email/bar-council id per `tag`.
pub fn advocate_fields(tag: &str, per_minute_charge: Decimal) -> RegisterAdvocate {
    RegisterAdvocate {
        email: format!("{tag}@advocates.test"),
        first_name: "Asha".to_string(),
        last_name: format!("Rao-{tag}"),
        phone_number: "+919900112233".to_string(),
        bar_council_id: format!("BC-{tag}"),
        bar_council_issue_years: 5,
        bar_council_issue_months: 2,
        languages: vec!["Hindi".to_string(), "English".to_string()],
        law_types: vec!["Family Law".to_string()],
        working_hours: "anytime".to_string(),
        area: "Fort".to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        per_minute_charge,
    }
}

/// Register an advocate directly through the repository.
pub async fn register_advocate(pool: &PgPool, tag: &str, per_minute_charge: Decimal) -> Advocate {
    AdvocateRepo::register(pool, &advocate_fields(tag, per_minute_charge))
        .await
        .expect("registration should succeed")
}

/// Register an advocate, approve it, put it on duty, and return it with a
/// login token. The returned row reflects the approved, on-duty state.
pub async fn approved_on_duty_advocate(
    pool: &PgPool,
    tag: &str,
    per_minute_charge: Decimal,
) -> (Advocate, String) {
    let advocate = register_advocate(pool, tag, per_minute_charge).await;
    AdvocateRepo::decide(pool, advocate.user_id, "approved")
        .await
        .expect("decision should succeed")
        .expect("advocate should be pending");
    AdvocateRepo::set_duty(pool, advocate.user_id, true)
        .await
        .expect("duty update should succeed");
    let token = issue_token(pool, advocate.user_id).await;
    let advocate = AdvocateRepo::find_by_user_id(pool, advocate.user_id)
        .await
        .expect("lookup should succeed")
        .expect("advocate should exist");
    (advocate, token)
}

/// Credit a client wallet directly (as a gateway top-up would).
pub async fn fund_wallet(pool: &PgPool, user_id: i64, amount: &str) {
    let amount: Decimal = amount.parse().expect("valid decimal literal");
    formulaw_db::repositories::WalletRepo::topup(pool, user_id, amount, None)
        .await
        .expect("topup should succeed")
        .expect("wallet should exist");
}
