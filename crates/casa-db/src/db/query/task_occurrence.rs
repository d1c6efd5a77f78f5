//! Queries for task occurrences.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::dedup::{InsertOutcome, TASK_OCCURRENCE_DEDUP, classify_insert};
use crate::db::schema::task_occurrences;
use crate::model::task::{NewTaskOccurrence, TaskOccurrence, TaskOccurrencePatch};

/// ## Summary
/// Loads every task occurrence, newest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list(conn: &mut DbConnection<'_>) -> QueryResult<Vec<TaskOccurrence>> {
    task_occurrences::table
        .order((task_occurrences::date.desc(), task_occurrences::id.asc()))
        .select(TaskOccurrence::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads the occurrences of one task, oldest first.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn list_for_task(
    conn: &mut DbConnection<'_>,
    task_id: uuid::Uuid,
) -> QueryResult<Vec<TaskOccurrence>> {
    task_occurrences::table
        .filter(task_occurrences::task_id.eq(task_id))
        .order(task_occurrences::date.asc())
        .select(TaskOccurrence::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Loads a task occurrence by ID.
///
/// ## Errors
/// Returns a database error if the query fails.
#[tracing::instrument(skip(conn))]
pub async fn find(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<TaskOccurrence>> {
    task_occurrences::table
        .find(id)
        .select(TaskOccurrence::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a task occurrence.
///
/// ## Errors
/// Returns a database error if the insert fails, including a unique violation
/// when the task already has an occurrence at that instant.
#[tracing::instrument(skip(conn, new), fields(task_id = %new.task_id, date = %new.date))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    new: &NewTaskOccurrence,
) -> QueryResult<TaskOccurrence> {
    diesel::insert_into(task_occurrences::table)
        .values(new)
        .returning(TaskOccurrence::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Inserts a task occurrence, treating an existing `(task_id, date)` pair as
/// a skip.
///
/// ## Errors
/// Returns a database error for any failure other than the dedup violation.
pub async fn create_or_skip(
    conn: &mut DbConnection<'_>,
    new: &NewTaskOccurrence,
) -> QueryResult<InsertOutcome<TaskOccurrence>> {
    classify_insert(create(conn, new).await, TASK_OCCURRENCE_DEDUP)
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
    patch: &TaskOccurrencePatch,
) -> QueryResult<Option<TaskOccurrence>> {
    if patch.is_empty() {
        return find(conn, id).await;
    }

    diesel::update(task_occurrences::table.find(id))
        .set(patch)
        .returning(TaskOccurrence::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a task occurrence, returning the number of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<usize> {
    diesel::delete(task_occurrences::table.find(id))
        .execute(conn)
        .await
}
