//! Bulk occurrence generation streamed as server-sent events.
//!
//! The run itself happens on a spawned task that feeds a bounded channel; the
//! response drains the channel. When the client disconnects the channel
//! closes and the run stops at its next event.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, Stream};
use salvo::sse::{self, SseEvent};
use salvo::{Depot, Request, Response, Writer, handler};
use tokio::sync::mpsc;
use tracing::Instrument;

use casa_core::types::TemplateKind;
use casa_db::db::DbProvider;
use casa_service::recurrence::orchestrator::expand_kind;
use casa_service::recurrence::progress::{CompletePayload, ProgressEvent, ProgressSink};

use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// Converts a progress event into its SSE frame. `complete` carries a JSON
/// payload, the others a plain message.
pub(crate) fn event_to_sse(event: &ProgressEvent) -> Result<SseEvent, serde_json::Error> {
    let frame = SseEvent::default().name(event.name());
    match event {
        ProgressEvent::Log(message)
        | ProgressEvent::Error(message)
        | ProgressEvent::Success(message) => Ok(frame.text(message.clone())),
        ProgressEvent::Complete(payload) => frame.json(payload),
    }
}

/// Streams events until every sender is dropped.
pub(crate) fn progress_stream(
    rx: mpsc::Receiver<ProgressEvent>,
) -> impl Stream<Item = Result<SseEvent, serde_json::Error>> + Send + 'static {
    stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((event_to_sse(&event), rx))
    })
}

async fn run_expansion(
    provider: Arc<dyn DbProvider + Send + Sync>,
    kind: TemplateKind,
    mut tx: mpsc::Sender<ProgressEvent>,
) {
    let mut conn = match provider.get_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "Failed to acquire database connection");
            let label = kind.label();
            let events = [
                ProgressEvent::Error(format!("Failed to load {label}s: {e}")),
                ProgressEvent::Complete(CompletePayload {
                    message: format!("Aborted generating {label} occurrences"),
                    total_occurrences: 0,
                }),
            ];
            for event in events {
                if tx.emit(event).await.is_err() {
                    break;
                }
            }
            return;
        }
    };

    let summary = expand_kind(&mut conn, kind, &mut tx, Utc::now()).await;
    tracing::info!(
        kind = %summary.kind,
        templates = summary.templates,
        skipped_templates = summary.skipped_templates,
        created = summary.total_occurrences,
        duplicates = summary.duplicates,
        failures = summary.failures,
        cancelled = summary.cancelled,
        "Bulk expansion finished"
    );
}

fn start_expansion(kind: TemplateKind, depot: &Depot, res: &mut Response) -> AppResult<()> {
    let provider = get_db_from_depot(depot)?;
    let settings = get_config_from_depot(depot)?;

    let (tx, rx) = mpsc::channel(settings.expansion.event_buffer.max(1));
    let span = tracing::info_span!("bulk_expansion", %kind);
    tokio::spawn(run_expansion(provider, kind, tx).instrument(span));

    sse::stream(res, progress_stream(rx));
    Ok(())
}

/// ## Summary
/// POST /finances/update-occurrences - Generate occurrences for every finance
/// installment, streaming progress.
#[handler]
pub(crate) async fn expand_finances(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if let Err(e) = start_expansion(TemplateKind::Finance, depot, res) {
        e.write(req, depot, res).await;
    }
}

/// ## Summary
/// POST /tasks/update-occurrences - Generate occurrences for every task
/// installment, streaming progress.
#[handler]
pub(crate) async fn expand_tasks(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if let Err(e) = start_expansion(TemplateKind::Task, depot, res) {
        e.write(req, depot, res).await;
    }
}
