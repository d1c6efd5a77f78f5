//! Queries for finance installments.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::finance_installments;
use crate::model::finance::{FinanceInstallment, NewFinanceInstallment};

/// ## Summary
/// Returns a query to select all finance installments, newest start first.
#[must_use]
pub fn all() -> finance_installments::BoxedQuery<'static, diesel::pg::Pg> {
    finance_installments::table
        .order((
            finance_installments::start_date.desc(),
            finance_installments::id.asc(),
        ))
        .into_boxed()
}

/// ## Summary
/// Returns a query to find a finance installment by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> finance_installments::BoxedQuery<'static, diesel::pg::Pg> {
    finance_installments::table
        .filter(finance_installments::id.eq(id))
        .into_boxed()
}

/// ## Summary
/// Loads every finance installment.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(conn: &mut DbConnection<'_>) -> QueryResult<Vec<FinanceInstallment>> {
    all()
        .select(FinanceInstallment::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads a finance installment by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<FinanceInstallment>> {
    by_id(id)
        .select(FinanceInstallment::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a finance installment and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails, e.g. on an unknown
/// foreign key.
#[tracing::instrument(skip(conn, new), fields(title = %new.title))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    new: &NewFinanceInstallment,
) -> QueryResult<FinanceInstallment> {
    diesel::insert_into(finance_installments::table)
        .values(new)
        .returning(FinanceInstallment::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces every column of a finance installment.
///
/// Returns `None` if no row has the given ID.
///
/// ## Errors
/// Returns a database error if the update fails.
#[tracing::instrument(skip(conn, changes))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &NewFinanceInstallment,
) -> QueryResult<Option<FinanceInstallment>> {
    diesel::update(finance_installments::table.find(id))
        .set(changes)
        .returning(FinanceInstallment::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a finance installment, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails, including a foreign key
/// violation while occurrences still reference the installment.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(finance_installments::table.find(id))
        .execute(conn)
        .await
}
