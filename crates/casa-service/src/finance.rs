//! Finance installments and their occurrences.

use casa_db::db::connection::DbConnection;
use casa_db::db::dedup::InsertOutcome;
use casa_db::db::query::{finance_installment, finance_occurrence};
use casa_db::model::finance::{
    FinanceInstallment, FinanceOccurrence, FinanceOccurrencePatch, NewFinanceInstallment,
    NewFinanceOccurrence,
};
use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};
use crate::recurrence::generator::{self, GenerationReport};
use crate::recurrence::horizon::ExpansionMode;
use crate::validation::{require_finite_amount, validate_finance_installment};

fn installment_not_found(id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("finance installment {id}"))
}

fn occurrence_not_found(id: uuid::Uuid) -> ServiceError {
    ServiceError::NotFound(format!("finance occurrence {id}"))
}

/// ## Summary
/// Validates and stores a new finance installment.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for invalid input or unknown
/// references.
#[tracing::instrument(skip(conn, new), fields(title = %new.title))]
pub async fn create_installment(
    conn: &mut DbConnection<'_>,
    new: &NewFinanceInstallment,
) -> ServiceResult<FinanceInstallment> {
    validate_finance_installment(new)?;
    let created = finance_installment::create(conn, new)
        .await
        .map_err(|e| ServiceError::from_write(e, "finance installment"))?;
    tracing::info!(id = %created.id, "Finance installment created");
    Ok(created)
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the installment does not exist.
pub async fn get_installment(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> ServiceResult<FinanceInstallment> {
    finance_installment::find(conn, id)
        .await?
        .ok_or_else(|| installment_not_found(id))
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_installments(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<FinanceInstallment>> {
    Ok(finance_installment::list(conn).await?)
}

/// ## Summary
/// Validates and replaces a finance installment.
///
/// Existing occurrences are left untouched.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for invalid input and
/// [`ServiceError::NotFound`] if the installment does not exist.
#[tracing::instrument(skip(conn, changes))]
pub async fn update_installment(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &NewFinanceInstallment,
) -> ServiceResult<FinanceInstallment> {
    validate_finance_installment(changes)?;
    finance_installment::update(conn, id, changes)
        .await
        .map_err(|e| ServiceError::from_write(e, "finance installment"))?
        .ok_or_else(|| installment_not_found(id))
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the installment does not exist and
/// [`ServiceError::Conflict`] while occurrences still reference it.
#[tracing::instrument(skip(conn))]
pub async fn delete_installment(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    let deleted = finance_installment::delete(conn, id)
        .await
        .map_err(|e| ServiceError::from_delete(e, "finance installment"))?;
    if deleted == 0 {
        return Err(installment_not_found(id));
    }
    Ok(())
}

/// ## Summary
/// Generates the occurrences of one installment through its end date, or
/// through the lookahead window when it has none.
///
/// ## Errors
/// Returns [`ServiceError::NotFound`] if the installment does not exist and
/// [`ServiceError::RecurError`] if its stored interval is invalid.
pub async fn generate_occurrences(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    lookahead_months: u32,
    now: DateTime<Utc>,
) -> ServiceResult<GenerationReport> {
    generator::generate_occurrences::<FinanceInstallment, _>(
        conn,
        id,
        ExpansionMode::on_demand(lookahead_months),
        now,
    )
    .await
}

/// ## Summary
/// Creates a single finance occurrence.
///
/// ## Errors
/// Returns [`ServiceError::Conflict`] if the installment already has an
/// occurrence on that date and [`ServiceError::ValidationError`] for an
/// invalid amount or unknown installment.
#[tracing::instrument(skip(conn, new), fields(finance_id = %new.finance_id, date = %new.date))]
pub async fn create_occurrence(
    conn: &mut DbConnection<'_>,
    new: &NewFinanceOccurrence,
) -> ServiceResult<FinanceOccurrence> {
    require_finite_amount(new.amount)?;
    match finance_occurrence::create_or_skip(conn, new)
        .await
        .map_err(|e| ServiceError::from_write(e, "finance occurrence"))?
    {
        InsertOutcome::Created(row) => Ok(row),
        InsertOutcome::AlreadyExists => Err(ServiceError::Conflict(format!(
            "finance installment {} already has an occurrence on {}",
            new.finance_id, new.date
        ))),
    }
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_occurrences(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<FinanceOccurrence>> {
    Ok(finance_occurrence::list(conn).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list_occurrences_for_installment(
    conn: &mut DbConnection<'_>,
    finance_id: uuid::Uuid,
) -> ServiceResult<Vec<FinanceOccurrence>> {
    Ok(finance_occurrence::list_for_finance(conn, finance_id).await?)
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the occurrence does not exist.
pub async fn get_occurrence(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> ServiceResult<FinanceOccurrence> {
    finance_occurrence::find(conn, id)
        .await?
        .ok_or_else(|| occurrence_not_found(id))
}

/// ## Summary
/// Applies a partial update to a finance occurrence.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for an invalid amount and
/// [`ServiceError::NotFound`] if the occurrence does not exist.
#[tracing::instrument(skip(conn, patch))]
pub async fn patch_occurrence(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: &FinanceOccurrencePatch,
) -> ServiceResult<FinanceOccurrence> {
    if let Some(amount) = patch.amount {
        require_finite_amount(amount)?;
    }
    finance_occurrence::patch(conn, id, patch)
        .await?
        .ok_or_else(|| occurrence_not_found(id))
}

/// ## Errors
/// Returns [`ServiceError::NotFound`] if the occurrence does not exist and
/// [`ServiceError::Conflict`] while transactions still reference it.
#[tracing::instrument(skip(conn))]
pub async fn delete_occurrence(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    let deleted = finance_occurrence::delete(conn, id)
        .await
        .map_err(|e| ServiceError::from_delete(e, "finance occurrence"))?;
    if deleted == 0 {
        return Err(occurrence_not_found(id));
    }
    Ok(())
}
