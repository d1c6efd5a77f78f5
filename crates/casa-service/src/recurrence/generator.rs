//! Walks one template's rule up to its horizon, attempting an insert per point.

use casa_db::db::dedup::InsertOutcome;
use casa_recur::{RecurResult, RecurrenceRule};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::horizon::{ExpansionMode, Horizon};
use super::store::OccurrenceStore;
use super::template::RecurringTemplate;
use crate::error::{ServiceError, ServiceResult};

/// The points a template expands to, before any insert is attempted.
#[derive(Debug, Clone)]
pub struct Plan {
    pub rule: RecurrenceRule,
    pub start: DateTime<Utc>,
    pub horizon: Horizon,
}

impl Plan {
    /// ## Summary
    /// Plans the expansion of `template` in `mode` at `now`.
    ///
    /// ## Errors
    /// Fails if the stored rule is invalid.
    pub fn for_template<T: RecurringTemplate>(
        template: &T,
        mode: ExpansionMode,
        now: DateTime<Utc>,
    ) -> RecurResult<Self> {
        Ok(Self {
            rule: template.rule()?,
            start: template.start(),
            horizon: template.horizon(mode, now),
        })
    }

    /// Every point from the first through the horizon, in order.
    pub fn points(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        let horizon = self.horizon;
        self.rule
            .series(self.start)
            .take_while(move |point| horizon.contains(*point))
    }
}

/// What happened to one insert attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    Created(uuid::Uuid),
    Duplicate,
    Failed(ServiceError),
}

/// ## Summary
/// Attempts to create the occurrence of `template` at `point`.
///
/// Never fails; a storage error is returned as [`AttemptOutcome::Failed`].
pub async fn attempt<T, S>(store: &mut S, template: &T, point: DateTime<Utc>) -> AttemptOutcome
where
    T: RecurringTemplate,
    S: OccurrenceStore<T>,
{
    let occurrence = template.occurrence_at(point);
    match store.create_occurrence(&occurrence).await {
        Ok(InsertOutcome::Created(id)) => AttemptOutcome::Created(id),
        Ok(InsertOutcome::AlreadyExists) => AttemptOutcome::Duplicate,
        Err(e) => AttemptOutcome::Failed(e),
    }
}

/// Counts from expanding one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub template_id: uuid::Uuid,
    /// Newly created occurrences.
    pub created: usize,
    /// Points that already had an occurrence.
    pub duplicates: usize,
    /// Points whose insert failed.
    pub failures: usize,
}

/// ## Summary
/// Expands one template, attempting an insert for each planned point.
///
/// A failed insert is logged and counted; later points are still attempted.
///
/// ## Errors
/// Returns [`ServiceError::RecurError`] if the stored rule is invalid.
#[tracing::instrument(skip(store, template), fields(kind = %T::KIND, template_id = %template.id()))]
pub async fn generate_for<T, S>(
    store: &mut S,
    template: &T,
    mode: ExpansionMode,
    now: DateTime<Utc>,
) -> ServiceResult<GenerationReport>
where
    T: RecurringTemplate,
    S: OccurrenceStore<T>,
{
    let plan = Plan::for_template(template, mode, now)?;
    let mut report = GenerationReport {
        template_id: template.id(),
        ..GenerationReport::default()
    };

    for point in plan.points() {
        match attempt(store, template, point).await {
            AttemptOutcome::Created(id) => {
                tracing::trace!(occurrence_id = %id, %point, "Occurrence created");
                report.created += 1;
            }
            AttemptOutcome::Duplicate => {
                tracing::trace!(%point, "Occurrence already exists");
                report.duplicates += 1;
            }
            AttemptOutcome::Failed(e) => {
                tracing::warn!(error = %e, %point, "Failed to create occurrence");
                report.failures += 1;
            }
        }
    }

    tracing::debug!(
        created = report.created,
        duplicates = report.duplicates,
        failures = report.failures,
        "Template expanded"
    );

    Ok(report)
}

/// ## Summary
/// Loads one template by ID and expands it.
///
/// ## Errors
/// Returns [`ServiceError::NotFound`] if no template has the ID, or any error
/// from loading the template or planning its expansion.
pub async fn generate_occurrences<T, S>(
    store: &mut S,
    template_id: uuid::Uuid,
    mode: ExpansionMode,
    now: DateTime<Utc>,
) -> ServiceResult<GenerationReport>
where
    T: RecurringTemplate,
    S: OccurrenceStore<T>,
{
    let template = store
        .find_template(template_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} {template_id}", T::KIND.label())))?;

    generate_for(store, &template, mode, now).await
}
