//! Read-only queries over wallets and transactions.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::{transactions, wallets};
use crate::model::ledger::{Transaction, Wallet};

/// ## Summary
/// Loads the most recent wallet record of a user.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn latest_wallet(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> QueryResult<Option<Wallet>> {
    wallets::table
        .filter(wallets::user_id.eq(user_id))
        .order(wallets::created_at.desc())
        .select(Wallet::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Loads the transactions recorded against a finance occurrence, newest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn transactions_for_occurrence(
    conn: &mut DbConnection<'_>,
    finance_occurrence_id: uuid::Uuid,
) -> QueryResult<Vec<Transaction>> {
    transactions::table
        .filter(transactions::finance_occurrence_id.eq(finance_occurrence_id))
        .order(transactions::created_at.desc())
        .select(Transaction::as_select())
        .load(conn)
        .await
}
