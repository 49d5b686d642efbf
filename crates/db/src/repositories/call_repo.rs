//! Repository for the `calls` table and the money movement tied to it.

use formulaw_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::call::{Call, CompleteOutcome};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, advocate_id, status, cost_per_minute, duration_minutes, \
                        total_cost, rating, failure_reason, created_at, ended_at";

/// Provides call lifecycle and billing operations.
pub struct CallRepo;

impl CallRepo {
    /// Create a call in `initiated`, snapshotting the advocate's rate.
    ///
    /// A second live call for the same client violates
    /// `uq_calls_active_client`; the caller maps that to CallInProgress.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        advocate_id: DbId,
        cost_per_minute: Decimal,
    ) -> Result<Call, sqlx::Error> {
        let query = format!(
            "INSERT INTO calls (client_id, advocate_id, cost_per_minute)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Call>(&query)
            .bind(client_id)
            .bind(advocate_id)
            .bind(cost_per_minute)
            .fetch_one(pool)
            .await
    }

    /// Find a call by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Call>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calls WHERE id = $1");
        sqlx::query_as::<_, Call>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a call by ID, scoped to the owning client.
    ///
    /// Ownership is part of the lookup: another client's call id reads as
    /// not-found, never as forbidden.
    pub async fn find_by_id_for_client(
        pool: &PgPool,
        id: DbId,
        client_id: DbId,
    ) -> Result<Option<Call>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM calls WHERE id = $1 AND client_id = $2");
        sqlx::query_as::<_, Call>(&query)
            .bind(id)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// A client's call history, newest first.
    pub async fn list_for_client(pool: &PgPool, client_id: DbId) -> Result<Vec<Call>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calls
             WHERE client_id = $1
             ORDER BY created_at DESC
             LIMIT 100"
        );
        sqlx::query_as::<_, Call>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// An advocate's call history, newest first.
    pub async fn list_for_advocate(
        pool: &PgPool,
        advocate_id: DbId,
    ) -> Result<Vec<Call>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calls
             WHERE advocate_id = $1
             ORDER BY created_at DESC
             LIMIT 100"
        );
        sqlx::query_as::<_, Call>(&query)
            .bind(advocate_id)
            .fetch_all(pool)
            .await
    }

    /// Every call on the platform, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Call>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calls
             ORDER BY created_at DESC
             LIMIT 1000"
        );
        sqlx::query_as::<_, Call>(&query).fetch_all(pool).await
    }

    /// Complete a call and settle its cost in one transaction:
    /// status CAS, client debit, debit ledger row, advocate wallet credit,
    /// earnings counters, credit ledger row. Any failed step rolls back all.
    ///
    /// The debit is conditional on `balance >= total`; if it does not apply,
    /// the initiation-time reservation was violated upstream and the caller
    /// gets [`CompleteOutcome::Underfunded`] with nothing written.
    pub async fn complete(
        pool: &PgPool,
        call_id: DbId,
        duration_minutes: Decimal,
        total_cost: Decimal,
    ) -> Result<CompleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE calls SET
                status = 'completed',
                duration_minutes = $2,
                total_cost = $3,
                ended_at = NOW()
             WHERE id = $1 AND status = 'initiated'
             RETURNING {COLUMNS}"
        );
        let call = sqlx::query_as::<_, Call>(&query)
            .bind(call_id)
            .bind(duration_minutes)
            .bind(total_cost)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(call) = call else {
            return Ok(CompleteOutcome::WrongState);
        };

        let debited = sqlx::query(
            "UPDATE wallets SET balance = balance - $2
             WHERE user_id = $1 AND balance >= $2",
        )
        .bind(call.client_id)
        .bind(total_cost)
        .execute(&mut *tx)
        .await?;
        if debited.rows_affected() == 0 {
            return Ok(CompleteOutcome::Underfunded);
        }

        // Settlement rows carry source = 'call', so the call id here can
        // never collide with a client-supplied payment reference in the
        // top-up dedup index.
        let reference = format!("call-{call_id}");

        sqlx::query(
            "INSERT INTO wallet_transactions (wallet_owner_id, txn_type, source, amount, reference)
             VALUES ($1, 'debit', 'call', $2, $3)",
        )
        .bind(call.client_id)
        .bind(total_cost)
        .bind(&reference)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO wallets (user_id, balance) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET balance = wallets.balance + EXCLUDED.balance",
        )
        .bind(call.advocate_id)
        .bind(total_cost)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE advocates SET
                total_cases = total_cases + 1,
                total_earnings = total_earnings + $2
             WHERE user_id = $1",
        )
        .bind(call.advocate_id)
        .bind(total_cost)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO wallet_transactions (wallet_owner_id, txn_type, source, amount, reference)
             VALUES ($1, 'credit', 'call', $2, $3)",
        )
        .bind(call.advocate_id)
        .bind(total_cost)
        .bind(&reference)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(CompleteOutcome::Completed(call))
    }

    /// Mark an initiated call failed. No money moves.
    ///
    /// Returns `None` when the call was not in `initiated` state.
    pub async fn fail(
        pool: &PgPool,
        call_id: DbId,
        reason: Option<&str>,
    ) -> Result<Option<Call>, sqlx::Error> {
        let query = format!(
            "UPDATE calls SET
                status = 'failed',
                failure_reason = $2,
                ended_at = NOW()
             WHERE id = $1 AND status = 'initiated'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Call>(&query)
            .bind(call_id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Record a rating on a completed, unrated call and fold it into the
    /// advocate's running average, both in one transaction.
    ///
    /// The call update is a compare-and-swap on `rating IS NULL`, so two
    /// concurrent ratings cannot both count; returns `false` for the loser.
    pub async fn rate(
        pool: &PgPool,
        call_id: DbId,
        advocate_id: DbId,
        rating: i32,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE calls SET rating = $2
             WHERE id = $1 AND status = 'completed' AND rating IS NULL",
        )
        .bind(call_id)
        .bind(rating)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE advocates SET
                average_rating = ROUND(
                    (average_rating::numeric * rated_call_count + $2) / (rated_call_count + 1),
                    2
                )::float8,
                rated_call_count = rated_call_count + 1
             WHERE user_id = $1",
        )
        .bind(advocate_id)
        .bind(rating)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
