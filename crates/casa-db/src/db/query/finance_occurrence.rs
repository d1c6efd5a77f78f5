//! Queries for finance occurrences.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::dedup::{FINANCE_OCCURRENCE_DEDUP, InsertOutcome, classify_insert};
use crate::db::schema::finance_occurrences;
use crate::model::finance::{FinanceOccurrence, FinanceOccurrencePatch, NewFinanceOccurrence};

/// ## Summary
/// Returns a query to find the occurrences of one installment, oldest first.
#[must_use]
pub fn for_finance(
    finance_id: uuid::Uuid,
) -> finance_occurrences::BoxedQuery<'static, diesel::pg::Pg> {
    finance_occurrences::table
        .filter(finance_occurrences::finance_id.eq(finance_id))
        .order(finance_occurrences::date.asc())
        .into_boxed()
}

/// ## Summary
/// Loads every finance occurrence, newest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(conn: &mut DbConnection<'_>) -> QueryResult<Vec<FinanceOccurrence>> {
    finance_occurrences::table
        .order((finance_occurrences::date.desc(), finance_occurrences::id.asc()))
        .select(FinanceOccurrence::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads the occurrences of one installment, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_for_finance(
    conn: &mut DbConnection<'_>,
    finance_id: uuid::Uuid,
) -> QueryResult<Vec<FinanceOccurrence>> {
    for_finance(finance_id)
        .select(FinanceOccurrence::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads a finance occurrence by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<FinanceOccurrence>> {
    finance_occurrences::table
        .find(id)
        .select(FinanceOccurrence::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a finance occurrence.
///
/// ## Errors
/// Returns a database error if the insert fails, including a unique violation
/// when the installment already has an occurrence on that date.
#[tracing::instrument(skip(conn, new), fields(finance_id = %new.finance_id, date = %new.date))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    new: &NewFinanceOccurrence,
) -> QueryResult<FinanceOccurrence> {
    diesel::insert_into(finance_occurrences::table)
        .values(new)
        .returning(FinanceOccurrence::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Inserts a finance occurrence, treating an existing `(finance_id, date)`
/// pair as a skip.
///
/// ## Errors
/// Returns a database error for any failure other than the dedup violation.
pub async fn create_or_skip(
    conn: &mut DbConnection<'_>,
    new: &NewFinanceOccurrence,
) -> QueryResult<InsertOutcome<FinanceOccurrence>> {
    classify_insert(create(conn, new).await, FINANCE_OCCURRENCE_DEDUP)
}

/// ## Summary
/// Applies a partial update. An empty patch returns the row unchanged.
///
/// Returns `None` if no row has the given ID.
///
/// ## Errors
/// Returns a database error if the update fails.
#[tracing::instrument(skip(conn, patch))]
pub async fn patch(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: &FinanceOccurrencePatch,
) -> QueryResult<Option<FinanceOccurrence>> {
    if patch.is_empty() {
        return find(conn, id).await;
    }

    diesel::update(finance_occurrences::table.find(id))
        .set(patch)
        .returning(FinanceOccurrence::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a finance occurrence, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(finance_occurrences::table.find(id))
        .execute(conn)
        .await
}
