//! Repository for the `wallets` and `wallet_transactions` tables.

use formulaw_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::wallet::{TopupOutcome, Wallet, WalletTransaction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, balance, currency, created_at";

const TXN_COLUMNS: &str = "id, wallet_owner_id, txn_type, source, amount, reference, created_at";

/// Provides balance and ledger operations for wallets.
pub struct WalletRepo;

impl WalletRepo {
    /// Find a wallet by its owner.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Wallet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wallets WHERE user_id = $1");
        sqlx::query_as::<_, Wallet>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Credit a wallet: append a ledger row and raise the balance in one
    /// transaction.
    ///
    /// When `reference` is given, the credit is idempotent on it: a replayed
    /// reference inserts nothing (the partial unique index absorbs the
    /// conflict) and the current balance is returned with `duplicate: true`.
    /// A referenceless top-up is never deduplicated.
    ///
    /// Returns `None` when the owner has no wallet.
    pub async fn topup(
        pool: &PgPool,
        user_id: DbId,
        amount: Decimal,
        reference: Option<&str>,
    ) -> Result<Option<TopupOutcome>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<Decimal> =
            sqlx::query_scalar("SELECT balance FROM wallets WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(balance) = existing else {
            return Ok(None);
        };

        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO wallet_transactions (wallet_owner_id, txn_type, source, amount, reference)
             VALUES ($1, 'credit', 'topup', $2, $3)
             ON CONFLICT (reference)
                WHERE txn_type = 'credit' AND source = 'topup' AND reference IS NOT NULL
             DO NOTHING
             RETURNING id",
        )
        .bind(user_id)
        .bind(amount)
        .bind(reference)
        .fetch_optional(&mut *tx)
        .await?;

        if inserted.is_none() {
            // Replayed payment reference. Nothing was credited; report the
            // balance as it stands so gateway retries converge.
            tx.commit().await?;
            return Ok(Some(TopupOutcome {
                new_balance: balance,
                duplicate: true,
            }));
        }

        let new_balance: Decimal = sqlx::query_scalar(
            "UPDATE wallets SET balance = balance + $2 WHERE user_id = $1 RETURNING balance",
        )
        .bind(user_id)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(TopupOutcome {
            new_balance,
            duplicate: false,
        }))
    }

    /// List the owner's full ledger, newest first.
    pub async fn transactions(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WalletTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {TXN_COLUMNS} FROM wallet_transactions
             WHERE wallet_owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, WalletTransaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
