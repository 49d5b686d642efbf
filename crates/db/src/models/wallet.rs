//! Wallet and ledger models.

use formulaw_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Full wallet row from the `wallets` table.
#[derive(Debug, Clone, FromRow)]
pub struct Wallet {
    pub user_id: DbId,
    pub balance: Decimal,
    pub currency: String,
    pub created_at: Timestamp,
}

/// Wallet representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub user_id: DbId,
    pub balance: Decimal,
    pub currency: String,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            user_id: wallet.user_id,
            balance: wallet.balance,
            currency: wallet.currency,
        }
    }
}

/// Full ledger row from the `wallet_transactions` table. Append-only.
///
/// `source` is `topup` or `call`; only top-up credits participate in the
/// payment-reference dedup index.
#[derive(Debug, Clone, FromRow)]
pub struct WalletTransaction {
    pub id: DbId,
    pub wallet_owner_id: DbId,
    pub txn_type: String,
    pub source: String,
    pub amount: Decimal,
    pub reference: Option<String>,
    pub created_at: Timestamp,
}

/// Ledger entry representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    #[serde(rename = "type")]
    pub txn_type: String,
    pub amount: Decimal,
    pub timestamp: Timestamp,
    pub reference: Option<String>,
}

impl From<WalletTransaction> for TransactionResponse {
    fn from(txn: WalletTransaction) -> Self {
        Self {
            txn_type: txn.txn_type,
            amount: txn.amount,
            timestamp: txn.created_at,
            reference: txn.reference,
        }
    }
}

/// Outcome of a top-up attempt against an existing wallet.
///
/// `duplicate` is true when the payment reference was already credited;
/// the balance returned is current either way.
#[derive(Debug, Clone)]
pub struct TopupOutcome {
    pub new_balance: Decimal,
    pub duplicate: bool,
}
