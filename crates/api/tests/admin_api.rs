//! HTTP-level integration tests for the admin surface: verification
//! decisions, platform listings, and analytics.

mod common;

use axum::http::StatusCode;
use common::{expect_json, get_auth, post_json, send_json_auth};
use sqlx::PgPool;

use formulaw_db::repositories::AdvocateRepo;

// ---------------------------------------------------------------------------
// Verification decisions
// ---------------------------------------------------------------------------

/// Approving a pending advocate flips the status and reports it.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_approve_pending_advocate(pool: PgPool) {
    let advocate = common::register_advocate(&pool, "appr", "25".parse().unwrap()).await;
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/admin/advocates/{}/verify", advocate.user_id);
    let body = serde_json::json!({ "status": "approved" });
    let response = send_json_auth(app, "PUT", &uri, &token, body).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["message"], "Advocate approved successfully");

    let row = AdvocateRepo::find_by_user_id(&pool, advocate.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.verification_status, "approved");
}

/// Decisions are terminal: a second decision on the same advocate conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_decision_is_terminal(pool: PgPool) {
    let advocate = common::register_advocate(&pool, "term", "25".parse().unwrap()).await;
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/admin/advocates/{}/verify", advocate.user_id);
    let reject = serde_json::json!({ "status": "rejected" });
    let response = send_json_auth(app.clone(), "PUT", &uri, &token, reject).await;
    assert_eq!(response.status(), StatusCode::OK);

    let approve = serde_json::json!({ "status": "approved" });
    let response = send_json_auth(app, "PUT", &uri, &token, approve).await;
    let json = expect_json(response, StatusCode::CONFLICT).await;
    assert_eq!(json["error"], "Advocate is already rejected");

    let row = AdvocateRepo::find_by_user_id(&pool, advocate.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.verification_status, "rejected");
}

/// Only `approved` / `rejected` are decisions; unknown ids are 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_verify_input_guards(pool: PgPool) {
    let advocate = common::register_advocate(&pool, "guard", "25".parse().unwrap()).await;
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/admin/advocates/{}/verify", advocate.user_id);
    let body = serde_json::json!({ "status": "pending" });
    let response = send_json_auth(app.clone(), "PUT", &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "status": "approved" });
    let response =
        send_json_auth(app, "PUT", "/api/admin/advocates/999999/verify", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// The review queue lists pending advocates only, oldest first.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_pending_queue_oldest_first(pool: PgPool) {
    let first = common::register_advocate(&pool, "q1", "25".parse().unwrap()).await;
    let second = common::register_advocate(&pool, "q2", "25".parse().unwrap()).await;
    let decided = common::register_advocate(&pool, "q3", "25".parse().unwrap()).await;
    AdvocateRepo::decide(&pool, decided.user_id, "approved")
        .await
        .unwrap()
        .unwrap();

    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let json = expect_json(
        get_auth(app, "/api/admin/advocates/pending", &token).await,
        StatusCode::OK,
    )
    .await;
    let queue = json.as_array().unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0]["id"], first.user_id);
    assert_eq!(queue[1]["id"], second.user_id);
}

/// The full roster includes advocates in every verification state.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_all_advocates(pool: PgPool) {
    common::register_advocate(&pool, "a1", "25".parse().unwrap()).await;
    let decided = common::register_advocate(&pool, "a2", "25".parse().unwrap()).await;
    AdvocateRepo::decide(&pool, decided.user_id, "rejected")
        .await
        .unwrap()
        .unwrap();

    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let json = expect_json(
        get_auth(app, "/api/admin/advocates", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

/// The user listing contains client accounts only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users_clients_only(pool: PgPool) {
    common::create_client(&pool, "c1@example.com").await;
    common::create_client(&pool, "c2@example.com").await;
    common::register_advocate(&pool, "nota", "25".parse().unwrap()).await;

    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let json = expect_json(
        get_auth(app, "/api/admin/users", &token).await,
        StatusCode::OK,
    )
    .await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["role"] == "client"));
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Counters track clients, advocates, the pending queue, calls, and the
/// revenue over completed calls.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_analytics_counters(pool: PgPool) {
    let (advocate, _) = common::approved_on_duty_advocate(&pool, "an", "10".parse().unwrap()).await;
    common::register_advocate(&pool, "an2", "10".parse().unwrap()).await;
    let (client, client_token) = common::create_client(&pool, "c@example.com").await;
    common::fund_wallet(&pool, client.id, "100").await;
    let app = common::build_test_app(pool.clone());

    // One completed call worth 20.00, one failed call worth nothing.
    let body = serde_json::json!({ "advocate_id": advocate.user_id });
    let json = expect_json(
        common::post_json_auth(app.clone(), "/api/client/initiate-call", &client_token, body.clone())
            .await,
        StatusCode::OK,
    )
    .await;
    let status = serde_json::json!({
        "call_id": json["call_id"],
        "status": "completed",
        "duration_minutes": 2,
    });
    let response = post_json(app.clone(), "/api/webhooks/telephony/call-status", status).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = expect_json(
        common::post_json_auth(app.clone(), "/api/client/initiate-call", &client_token, body).await,
        StatusCode::OK,
    )
    .await;
    let status = serde_json::json!({
        "call_id": json["call_id"],
        "status": "failed",
        "reason": "no answer",
    });
    let response = post_json(app.clone(), "/api/webhooks/telephony/call-status", status).await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = common::admin_token(&pool).await;
    let json = expect_json(
        get_auth(app, "/api/admin/analytics", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["total_users"], 1);
    assert_eq!(json["total_advocates"], 2);
    assert_eq!(json["pending_verifications"], 1);
    assert_eq!(json["total_calls"], 2);
    assert_eq!(json["total_revenue"].as_f64().unwrap(), 20.0);
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

/// Non-admin tokens are rejected on every admin endpoint.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_surface_rejects_other_roles(pool: PgPool) {
    let (_client, client_token) = common::create_client(&pool, "c@example.com").await;
    let (_advocate, advocate_token) =
        common::approved_on_duty_advocate(&pool, "rb", "25".parse().unwrap()).await;
    let app = common::build_test_app(pool.clone());

    for token in [&client_token, &advocate_token] {
        for uri in [
            "/api/admin/advocates",
            "/api/admin/advocates/pending",
            "/api/admin/users",
            "/api/admin/calls",
            "/api/admin/analytics",
        ] {
            let response = get_auth(app.clone(), uri, token).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "uri: {uri}");
        }
    }
}
