//! Repository-level tests for call settlement edges that the HTTP surface
//! cannot reach directly.

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;

use formulaw_db::models::advocate::RegisterAdvocate;
use formulaw_db::models::call::CompleteOutcome;
use formulaw_db::repositories::{AdvocateRepo, CallRepo, UserRepo, WalletRepo};

fn registration(tag: &str) -> RegisterAdvocate {
    RegisterAdvocate {
        email: format!("{tag}@advocates.test"),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        phone_number: "+919900112233".to_string(),
        bar_council_id: format!("BC-{tag}"),
        bar_council_issue_years: 5,
        bar_council_issue_months: 0,
        languages: vec!["Hindi".to_string()],
        law_types: vec!["Family Law".to_string()],
        working_hours: "anytime".to_string(),
        area: "Fort".to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        per_minute_charge: "25".parse().unwrap(),
    }
}

/// Settlement against a wallet that cannot cover the cost writes nothing:
/// the status rollback leaves the call in `initiated` and both ledgers
/// untouched.
#[sqlx::test]
async fn test_underfunded_settlement_rolls_back(pool: PgPool) {
    let advocate = AdvocateRepo::register(&pool, &registration("uf")).await.unwrap();
    let client = UserRepo::upsert_client_login(&pool, "c@example.com").await.unwrap();
    WalletRepo::topup(&pool, client.id, "10".parse().unwrap(), None)
        .await
        .unwrap()
        .unwrap();

    let call = CallRepo::create(&pool, client.id, advocate.user_id, "25".parse().unwrap())
        .await
        .unwrap();

    // 2 minutes at 25/min = 50, against a balance of 10.
    let outcome = CallRepo::complete(
        &pool,
        call.id,
        "2".parse().unwrap(),
        "50".parse().unwrap(),
    )
    .await
    .unwrap();
    assert_matches!(outcome, CompleteOutcome::Underfunded);

    let call = CallRepo::find_by_id(&pool, call.id).await.unwrap().unwrap();
    assert_eq!(call.status, "initiated");
    assert!(call.total_cost.is_none());

    let wallet = WalletRepo::find_by_user(&pool, client.id).await.unwrap().unwrap();
    assert_eq!(wallet.balance, "10".parse::<Decimal>().unwrap());
    assert!(WalletRepo::transactions(&pool, client.id)
        .await
        .unwrap()
        .iter()
        .all(|t| t.txn_type == "credit"));
}

/// The advocate wallet is created on first settlement if registration
/// predates the wallet backfill.
#[sqlx::test]
async fn test_settlement_creates_missing_advocate_wallet(pool: PgPool) {
    let advocate = AdvocateRepo::register(&pool, &registration("nw")).await.unwrap();
    sqlx::query("DELETE FROM wallets WHERE user_id = $1")
        .bind(advocate.user_id)
        .execute(&pool)
        .await
        .unwrap();

    let client = UserRepo::upsert_client_login(&pool, "c@example.com").await.unwrap();
    WalletRepo::topup(&pool, client.id, "100".parse().unwrap(), None)
        .await
        .unwrap()
        .unwrap();

    let call = CallRepo::create(&pool, client.id, advocate.user_id, "25".parse().unwrap())
        .await
        .unwrap();
    let outcome = CallRepo::complete(
        &pool,
        call.id,
        "1".parse().unwrap(),
        "25".parse().unwrap(),
    )
    .await
    .unwrap();
    assert_matches!(outcome, CompleteOutcome::Completed(_));

    let wallet = WalletRepo::find_by_user(&pool, advocate.user_id)
        .await
        .unwrap()
        .expect("settlement should create the wallet");
    assert_eq!(wallet.balance, "25".parse::<Decimal>().unwrap());
}

/// Failing a settled call is refused, in either direction.
#[sqlx::test]
async fn test_terminal_states_do_not_transition(pool: PgPool) {
    let advocate = AdvocateRepo::register(&pool, &registration("tm")).await.unwrap();
    let client = UserRepo::upsert_client_login(&pool, "c@example.com").await.unwrap();
    WalletRepo::topup(&pool, client.id, "100".parse().unwrap(), None)
        .await
        .unwrap()
        .unwrap();

    let call = CallRepo::create(&pool, client.id, advocate.user_id, "25".parse().unwrap())
        .await
        .unwrap();
    CallRepo::fail(&pool, call.id, Some("no answer")).await.unwrap().unwrap();

    // Neither completion nor a second failure applies.
    let outcome = CallRepo::complete(
        &pool,
        call.id,
        "1".parse().unwrap(),
        "25".parse().unwrap(),
    )
    .await
    .unwrap();
    assert_matches!(outcome, CompleteOutcome::WrongState);
    assert!(CallRepo::fail(&pool, call.id, None).await.unwrap().is_none());
}

/// Topping up a user that has no wallet is a no-op returning `None`.
#[sqlx::test]
async fn test_topup_without_wallet(pool: PgPool) {
    let outcome = WalletRepo::topup(&pool, 999_999, "10".parse().unwrap(), None)
        .await
        .unwrap();
    assert!(outcome.is_none());
}
