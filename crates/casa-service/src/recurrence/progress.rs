use std::future::Future;

use serde::Serialize;
use tokio::sync::mpsc;

/// Payload of the terminal event of a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletePayload {
    pub message: String,
    pub total_occurrences: usize,
}

/// One progress notification from a bulk expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// What is being processed, or a duplicate that was skipped.
    Log(String),
    /// An invalid template or a failed insert.
    Error(String),
    /// An occurrence was created.
    Success(String),
    /// Sent once at the end of the run.
    Complete(CompletePayload),
}

impl ProgressEvent {
    /// Event name as sent on the wire.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Log(_) => "log",
            Self::Error(_) => "error",
            Self::Success(_) => "success",
            Self::Complete(_) => "complete",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Mirrors the event into the tracing log.
    pub(crate) fn trace(&self) {
        match self {
            Self::Log(message) => tracing::info!(event = self.name(), "{message}"),
            Self::Error(message) => tracing::warn!(event = self.name(), "{message}"),
            Self::Success(message) => tracing::debug!(event = self.name(), "{message}"),
            Self::Complete(payload) => tracing::info!(
                event = self.name(),
                total_occurrences = payload.total_occurrences,
                "{}",
                payload.message
            ),
        }
    }
}

/// The receiving side of a progress stream has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("progress receiver closed")]
pub struct SinkClosed;

/// Destination for progress events.
pub trait ProgressSink: Send {
    /// ## Summary
    /// Delivers one event.
    ///
    /// ## Errors
    /// Returns [`SinkClosed`] once the consumer has stopped listening.
    fn emit(&mut self, event: ProgressEvent) -> impl Future<Output = Result<(), SinkClosed>> + Send;
}

impl ProgressSink for mpsc::Sender<ProgressEvent> {
    async fn emit(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        self.send(event).await.map_err(|_closed| SinkClosed)
    }
}

impl ProgressSink for Vec<ProgressEvent> {
    async fn emit(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        self.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test_log::test]
    fn complete_serializes_with_total() {
        let event = ProgressEvent::Complete(CompletePayload {
            message: "done".to_string(),
            total_occurrences: 3,
        });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "event": "complete",
                "data": {"message": "done", "total_occurrences": 3}
            })
        );
    }

    #[test_log::test(tokio::test)]
    async fn channel_sink_reports_dropped_receiver() {
        let (mut tx, rx) = mpsc::channel(1);
        drop(rx);
        let result = tx.emit(ProgressEvent::Log("hello".to_string())).await;
        assert_eq!(result, Err(SinkClosed));
    }
}
