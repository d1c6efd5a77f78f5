//! Task installments and their occurrences.

use casa_db::db::connection::DbConnection;
use casa_db::db::dedup::InsertOutcome;
use casa_db::db::query::{task_installment, task_occurrence};
use casa_db::model::task::{
    NewTaskInstallment, NewTaskOccurrence, TaskInstallment, TaskOccurrence, TaskOccurrencePatch,
};
use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};
use crate::recurrence::generator::{self, GenerationReport};
use crate::recurrence::horizon::ExpansionMode;
use crate::validation::validate_task_installment;

fn installment_not_found(id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("task installment {id}"))
}

fn occurrence_not_found(id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("task occurrence {id}"))
}

/// ## Summary
/// Validates and stores a new task installment.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for a blank title, an
/// unparseable cron expression, or unknown references.
#[tracing::instrument(skip(conn, new), fields(title = %new.title, cron = %new.recurrence_cron))]
pub async fn create_installment(
    conn: &mut DbConnection<'_>,
    new: &NewTaskInstallment,
) -> ServiceResult<TaskInstallment> {
    validate_task_installment(new)?;
    let created = task_installment::create(conn, new)
        .await
        .map_err(|e| ServiceError::from_write(e, "task installment"))?;
    tracing::info!(id = %created.id, "Task installment created");
    Ok(created)
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the installment does not exist.
pub async fn get_installment(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> ServiceResult<TaskInstallment> {
    task_installment::find(conn, id)
        .await?
        .ok_or_else(|| installment_not_found(id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_installments(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<TaskInstallment>> {
    Ok(task_installment::list(conn).await?)
}

/// ## Summary
/// Validates and replaces a task installment.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for invalid input and
/// [`ServiceError::NotFound`] if the installment does not exist.
#[tracing::instrument(skip(conn, changes))]
pub async fn update_installment(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &NewTaskInstallment,
) -> ServiceResult<TaskInstallment> {
    validate_task_installment(changes)?;
    task_installment::update(conn, id, changes)
        .await
        .map_err(|e| ServiceError::from_write(e, "task installment"))?
        .ok_or_else(|| installment_not_found(id))
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the installment does not exist and
/// [`ServiceError::Conflict`] while occurrences still reference it.
#[tracing::instrument(skip(conn))]
pub async fn delete_installment(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    let deleted = task_installment::delete(conn, id)
        .await
        .map_err(|e| ServiceError::from_delete(e, "task installment"))?;
    if deleted == 0 {
        return Err(installment_not_found(id));
    }
    Ok(())
}

/// ## Summary
/// Generates the occurrences of one task over the lookahead window.
///
/// ## Errors
/// Returns [`ServiceError::NotFound`] if the task does not exist and
/// [`ServiceError::RecurError`] if its stored cron expression is invalid.
pub async fn generate_occurrences(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    lookahead_months: u32,
    now: DateTime<Utc>,
) -> ServiceResult<GenerationReport> {
    generator::generate_occurrences::<TaskInstallment, _>(
        conn,
        id,
        ExpansionMode::on_demand(lookahead_months),
        now,
    )
    .await
}

/// ## Summary
/// Creates a single task occurrence.
///
/// ## Errors
/// Returns [`ServiceError::Conflict`] if the task already has an occurrence
/// at that instant and [`ServiceError::ValidationError`] for unknown
/// references.
#[tracing::instrument(skip(conn, new), fields(task_id = %new.task_id, date = %new.date))]
pub async fn create_occurrence(
    conn: &mut DbConnection<'_>,
    new: &NewTaskOccurrence,
) -> ServiceResult<TaskOccurrence> {
    match task_occurrence::create_or_skip(conn, new)
        .await
        .map_err(|e| ServiceError::from_write(e, "task occurrence"))?
    {
        InsertOutcome::Created(row) => Ok(row),
        InsertOutcome::AlreadyExists => Err(ServiceError::Conflict(format!(
            "task installment {} already has an occurrence at {}",
            new.task_id,
            new.date.to_rfc3339()
        ))),
    }
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_occurrences(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<TaskOccurrence>> {
    Ok(task_occurrence::list(conn).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_occurrences_for_task(
    conn: &mut DbConnection<'_>,
    task_id: uuid::Uuid,
) -> ServiceResult<Vec<TaskOccurrence>> {
    Ok(task_occurrence::list_for_task(conn, task_id).await?)
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the occurrence does not exist.
pub async fn get_occurrence(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> ServiceResult<TaskOccurrence> {
    task_occurrence::find(conn, id)
        .await?
        .ok_or_else(|| occurrence_not_found(id))
}

/// ## Summary
/// Applies a partial update to a task occurrence.
///
/// ## Errors
/// Returns [`ServiceError::NotFound`] if the occurrence does not exist and
/// [`ServiceError::ValidationError`] for unknown references.
#[tracing::instrument(skip(conn, patch))]
pub async fn patch_occurrence(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: &TaskOccurrencePatch,
) -> ServiceResult<TaskOccurrence> {
    task_occurrence::patch(conn, id, patch)
        .await
        .map_err(|e| ServiceError::from_write(e, "task occurrence"))?
        .ok_or_else(|| occurrence_not_found(id))
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the occurrence does not exist.
#[tracing::instrument(skip(conn))]
pub async fn delete_occurrence(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    let deleted = task_occurrence::delete(conn, id)
        .await
        .map_err(|e| ServiceError::from_delete(e, "task occurrence"))?;
    if deleted == 0 {
        return Err(occurrence_not_found(id));
    }
    Ok(())
}
