//! Queries for task installments.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::task_installments;
use crate::model::task::{NewTaskInstallment, TaskInstallment};

/// ## Summary
/// Loads every task installment, newest start first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(conn: &mut DbConnection<'_>) -> QueryResult<Vec<TaskInstallment>> {
    task_installments::table
        .order((task_installments::start_date.desc(), task_installments::id.asc()))
        .select(TaskInstallment::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads a task installment by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<TaskInstallment>> {
    task_installments::table
        .find(id)
        .select(TaskInstallment::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a task installment and returns the stored row.
///
/// ## Errors
/// Returns a database error if the insert fails.
#[tracing::instrument(skip(conn, new), fields(title = %new.title))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    new: &NewTaskInstallment,
) -> QueryResult<TaskInstallment> {
    diesel::insert_into(task_installments::table)
        .values(new)
        .returning(TaskInstallment::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces every column of a task installment.
///
/// Returns `None` if no row has the given ID.
///
/// ## Errors
/// Returns a database error if the update fails.
#[tracing::instrument(skip(conn, changes))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &NewTaskInstallment,
) -> QueryResult<Option<TaskInstallment>> {
    diesel::update(task_installments::table.find(id))
        .set(changes)
        .returning(TaskInstallment::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a task installment, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(task_installments::table.find(id))
        .execute(conn)
        .await
}
