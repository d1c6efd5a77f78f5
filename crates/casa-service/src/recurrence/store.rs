use std::future::Future;

use casa_db::db::connection::DbConnection;
use casa_db::db::dedup::InsertOutcome;
use casa_db::db::query::{
    finance_installment, finance_occurrence, task_installment, task_occurrence,
};
use casa_db::model::finance::{FinanceInstallment, NewFinanceOccurrence};
use casa_db::model::task::{NewTaskOccurrence, TaskInstallment};

use super::template::RecurringTemplate;
use crate::error::ServiceResult;

/// Persistence seen by the generator and orchestrator.
///
/// `create_occurrence` must report a second insert of the same
/// `(template, date)` pair as [`InsertOutcome::AlreadyExists`] and every
/// other failure as an error.
pub trait OccurrenceStore<T: RecurringTemplate>: Send {
    fn list_templates(&mut self) -> impl Future<Output = ServiceResult<Vec<T>>> + Send;

    fn find_template(
        &mut self,
        id: uuid::Uuid,
    ) -> impl Future<Output = ServiceResult<Option<T>>> + Send;

    /// Inserts one occurrence, yielding the new row's ID when created.
    fn create_occurrence(
        &mut self,
        occurrence: &T::Occurrence,
    ) -> impl Future<Output = ServiceResult<InsertOutcome<uuid::Uuid>>> + Send;
}

impl OccurrenceStore<FinanceInstallment> for DbConnection<'_> {
    async fn list_templates(&mut self) -> ServiceResult<Vec<FinanceInstallment>> {
        Ok(finance_installment::list(self).await?)
    }

    async fn find_template(&mut self, id: uuid::Uuid) -> ServiceResult<Option<FinanceInstallment>> {
        Ok(finance_installment::find(self, id).await?)
    }

    async fn create_occurrence(
        &mut self,
        occurrence: &NewFinanceOccurrence,
    ) -> ServiceResult<InsertOutcome<uuid::Uuid>> {
        let outcome = finance_occurrence::create_or_skip(self, occurrence).await?;
        Ok(match outcome {
            InsertOutcome::Created(row) => InsertOutcome::Created(row.id),
            InsertOutcome::AlreadyExists => InsertOutcome::AlreadyExists,
        })
    }
}

impl OccurrenceStore<TaskInstallment> for DbConnection<'_> {
    async fn list_templates(&mut self) -> ServiceResult<Vec<TaskInstallment>> {
        Ok(task_installment::list(self).await?)
    }

    async fn find_template(&mut self, id: uuid::Uuid) -> ServiceResult<Option<TaskInstallment>> {
        Ok(task_installment::find(self, id).await?)
    }

    async fn create_occurrence(
        &mut self,
        occurrence: &NewTaskOccurrence,
    ) -> ServiceResult<InsertOutcome<uuid::Uuid>> {
        let outcome = task_occurrence::create_or_skip(self, occurrence).await?;
        Ok(match outcome {
            InsertOutcome::Created(row) => InsertOutcome::Created(row.id),
            InsertOutcome::AlreadyExists => InsertOutcome::AlreadyExists,
        })
    }
}
