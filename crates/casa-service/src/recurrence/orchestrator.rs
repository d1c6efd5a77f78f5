//! Bulk expansion of every template of one kind with streamed progress.

use casa_core::types::TemplateKind;
use casa_db::db::connection::DbConnection;
use casa_db::model::finance::FinanceInstallment;
use casa_db::model::task::TaskInstallment;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::generator::{AttemptOutcome, Plan, attempt};
use super::horizon::ExpansionMode;
use super::progress::{CompletePayload, ProgressEvent, ProgressSink, SinkClosed};
use super::store::OccurrenceStore;
use super::template::RecurringTemplate;

/// Totals of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionSummary {
    pub kind: TemplateKind,
    /// Templates loaded.
    pub templates: usize,
    /// Templates skipped because their stored rule is invalid.
    pub skipped_templates: usize,
    pub total_occurrences: usize,
    pub duplicates: usize,
    pub failures: usize,
    /// The consumer went away before the run finished.
    pub cancelled: bool,
}

impl ExpansionSummary {
    const fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            templates: 0,
            skipped_templates: 0,
            total_occurrences: 0,
            duplicates: 0,
            failures: 0,
            cancelled: false,
        }
    }
}

async fn emit<P: ProgressSink>(sink: &mut P, event: ProgressEvent) -> Result<(), SinkClosed> {
    event.trace();
    sink.emit(event).await
}

/// ## Summary
/// Expands every template in `store` up to `now`, one at a time.
///
/// Emits `log`, `error` and `success` events as it goes and a final
/// `complete` event. An invalid template or a failed insert is reported and
/// skipped. If the template list cannot be loaded, an `error` event and a
/// `complete` event with zero occurrences are sent.
///
/// When the sink reports that its consumer is gone the run stops at that
/// point and the summary is flagged `cancelled`. Occurrences created so far
/// stay in place.
#[tracing::instrument(skip(store, sink), fields(kind = %T::KIND))]
pub async fn expand_all<T, S, P>(store: &mut S, sink: &mut P, now: DateTime<Utc>) -> ExpansionSummary
where
    T: RecurringTemplate,
    S: OccurrenceStore<T>,
    P: ProgressSink,
{
    let mut summary = ExpansionSummary::new(T::KIND);

    if run(store, sink, now, &mut summary).await.is_err() {
        tracing::info!(
            total_occurrences = summary.total_occurrences,
            "Progress consumer disconnected, stopping expansion"
        );
        summary.cancelled = true;
    }

    summary
}

async fn run<T, S, P>(
    store: &mut S,
    sink: &mut P,
    now: DateTime<Utc>,
    summary: &mut ExpansionSummary,
) -> Result<(), SinkClosed>
where
    T: RecurringTemplate,
    S: OccurrenceStore<T>,
    P: ProgressSink,
{
    let label = T::KIND.label();

    let templates = match store.list_templates().await {
        Ok(templates) => templates,
        Err(e) => {
            emit(sink, ProgressEvent::Error(format!("Failed to load {label}s: {e}"))).await?;
            return emit(
                sink,
                ProgressEvent::Complete(CompletePayload {
                    message: format!("Aborted generating {label} occurrences"),
                    total_occurrences: 0,
                }),
            )
            .await;
        }
    };
    summary.templates = templates.len();

    for template in &templates {
        let title = template.title();
        emit(
            sink,
            ProgressEvent::Log(format!("Processing {label} '{title}' ({})", template.id())),
        )
        .await?;

        let plan = match Plan::for_template(template, ExpansionMode::Bulk, now) {
            Ok(plan) => plan,
            Err(e) => {
                summary.skipped_templates += 1;
                emit(
                    sink,
                    ProgressEvent::Error(format!(
                        "Skipping {label} '{title}' ({}): {e}",
                        template.id()
                    )),
                )
                .await?;
                continue;
            }
        };

        for point in plan.points() {
            let when = T::point_label(point);
            let event = match attempt(store, template, point).await {
                AttemptOutcome::Created(_) => {
                    summary.total_occurrences += 1;
                    ProgressEvent::Success(format!("Created occurrence of '{title}' on {when}"))
                }
                AttemptOutcome::Duplicate => {
                    summary.duplicates += 1;
                    ProgressEvent::Log(format!(
                        "Occurrence of '{title}' on {when} already exists, skipping"
                    ))
                }
                AttemptOutcome::Failed(e) => {
                    summary.failures += 1;
                    ProgressEvent::Error(format!(
                        "Failed to create occurrence of '{title}' on {when}: {e}"
                    ))
                }
            };
            emit(sink, event).await?;
        }
    }

    emit(
        sink,
        ProgressEvent::Complete(CompletePayload {
            message: format!("Finished generating {label} occurrences"),
            total_occurrences: summary.total_occurrences,
        }),
    )
    .await
}

/// ## Summary
/// Runs [`expand_all`] against the database for templates of `kind`.
pub async fn expand_kind<P: ProgressSink>(
    conn: &mut DbConnection<'_>,
    kind: TemplateKind,
    sink: &mut P,
    now: DateTime<Utc>,
) -> ExpansionSummary {
    match kind {
        TemplateKind::Finance => expand_all::<FinanceInstallment, _, _>(conn, sink, now).await,
        TemplateKind::Task => expand_all::<TaskInstallment, _, _>(conn, sink, now).await,
    }
}
