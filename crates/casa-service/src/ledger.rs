//! Wallet balances, transactions and the dashboard read model.

use casa_db::db::connection::DbConnection;
use casa_db::db::query::{dashboard, ledger};
use casa_db::model::dashboard::DashboardRow;
use casa_db::model::ledger::{Transaction, Wallet};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ServiceResult;

/// Current balance of a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletBalance {
    pub user_id: uuid::Uuid,
    pub amount: f64,
    /// When the balance was recorded; absent for a user with no records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl WalletBalance {
    #[must_use]
    pub const fn empty(user_id: uuid::Uuid) -> Self {
        Self {
            user_id,
            amount: 0.0,
            created_at: None,
        }
    }
}

impl From<Wallet> for WalletBalance {
    fn from(wallet: Wallet) -> Self {
        Self {
            user_id: wallet.user_id,
            amount: wallet.amount,
            created_at: Some(wallet.created_at),
        }
    }
}

/// ## Summary
/// Returns the latest wallet record of a user, or a zero balance if the user
/// has none.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn current_balance(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> ServiceResult<WalletBalance> {
    Ok(ledger::latest_wallet(conn, user_id)
        .await?
        .map_or_else(|| WalletBalance::empty(user_id), WalletBalance::from))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn transactions_for_occurrence(
    conn: &mut DbConnection<'_>,
    finance_occurrence_id: uuid::Uuid,
) -> ServiceResult<Vec<Transaction>> {
    Ok(ledger::transactions_for_occurrence(conn, finance_occurrence_id).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn dashboard_rows(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<DashboardRow>> {
    Ok(dashboard::list(conn).await?)
}
