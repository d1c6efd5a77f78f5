#![allow(clippy::expect_used)]

mod common;

use casa_db::model::finance::FinanceInstallment;
use casa_db::model::task::TaskInstallment;
use casa_service::recurrence::orchestrator::expand_all;
use casa_service::recurrence::progress::{CompletePayload, ProgressEvent};
use common::{HangupSink, MemoryStore, date, finance, task, utc};
use tokio::sync::mpsc;

fn complete(events: &[ProgressEvent]) -> &CompletePayload {
    match events.last() {
        Some(ProgressEvent::Complete(payload)) => payload,
        other => panic!("expected a terminal complete event, got {other:?}"),
    }
}

fn count(events: &[ProgressEvent], name: &str) -> usize {
    events.iter().filter(|e| e.name() == name).count()
}

#[test_log::test(tokio::test)]
async fn streams_events_for_each_date() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 15)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    let mut events = Vec::new();

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut events, utc(2024, 3, 1, 0, 0))
            .await;

    let names: Vec<_> = events.iter().map(ProgressEvent::name).collect();
    assert_eq!(
        names,
        vec!["log", "success", "success", "success", "complete"]
    );
    assert_eq!(
        events[1],
        ProgressEvent::Success("Created occurrence of 'Rent' on 2024-01-01".to_string())
    );
    assert_eq!(complete(&events).total_occurrences, 3);
    assert_eq!(summary.total_occurrences, 3);
    assert_eq!(summary.templates, 1);
    assert!(!summary.cancelled);
}

#[test_log::test(tokio::test)]
async fn rerun_reports_duplicates_and_creates_nothing() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 15)));
    let mut store = MemoryStore::new(vec![rent]);
    let now = utc(2024, 3, 1, 0, 0);

    let mut first = Vec::new();
    expand_all::<FinanceInstallment, _, _>(&mut store, &mut first, now).await;

    let mut second = Vec::new();
    let summary = expand_all::<FinanceInstallment, _, _>(&mut store, &mut second, now).await;

    assert_eq!(summary.total_occurrences, 0);
    assert_eq!(summary.duplicates, 3);
    assert_eq!(count(&second, "success"), 0);
    assert_eq!(count(&second, "log"), 4);
    assert_eq!(complete(&second).total_occurrences, 0);
    assert_eq!(store.rows.len(), 3);
}

#[test_log::test(tokio::test)]
async fn invalid_template_does_not_block_the_next() {
    let broken = finance("Broken", date(2024, 1, 1), 0, None);
    let valid = finance("Groceries", date(2024, 1, 1), 10, Some(date(2024, 1, 21)));
    let valid_id = valid.id;
    let mut store = MemoryStore::new(vec![broken, valid]);
    let mut events = Vec::new();

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut events, utc(2024, 3, 1, 0, 0))
            .await;

    assert_eq!(summary.skipped_templates, 1);
    assert_eq!(summary.total_occurrences, 3);
    assert_eq!(store.dates_of(valid_id).len(), 3);
    assert_eq!(count(&events, "error"), 1);
    assert!(matches!(&events[1], ProgressEvent::Error(msg) if msg.contains("Broken")));
    assert_eq!(complete(&events).total_occurrences, 3);
}

#[test_log::test(tokio::test)]
async fn malformed_cron_is_reported_and_skipped() {
    let broken = task("Broken", utc(2024, 1, 1, 0, 0), "every monday");
    let weekly = task("Bins", utc(2024, 1, 1, 0, 0), "0 19 * * SUN");
    let mut store = MemoryStore::new(vec![broken, weekly]);
    let mut events = Vec::new();

    let summary =
        expand_all::<TaskInstallment, _, _>(&mut store, &mut events, utc(2024, 1, 31, 0, 0)).await;

    // Sundays in January 2024: 7, 14, 21, 28.
    assert_eq!(summary.total_occurrences, 4);
    assert_eq!(summary.skipped_templates, 1);
    assert_eq!(count(&events, "error"), 1);
    assert!(events.last().is_some_and(ProgressEvent::is_terminal));
}

#[test_log::test(tokio::test)]
async fn insert_failure_is_reported_per_date() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 15)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    store.failing.insert((rent.id, utc(2024, 1, 8, 0, 0)));
    let mut events = Vec::new();

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut events, utc(2024, 3, 1, 0, 0))
            .await;

    assert_eq!(summary.failures, 1);
    assert_eq!(summary.total_occurrences, 2);
    let names: Vec<_> = events.iter().map(ProgressEvent::name).collect();
    assert_eq!(names, vec!["log", "success", "error", "success", "complete"]);
}

#[test_log::test(tokio::test)]
async fn listing_failure_ends_with_empty_complete() {
    let mut store = MemoryStore::new(vec![finance("Rent", date(2024, 1, 1), 7, None)]);
    store.listing_fails = true;
    let mut events = Vec::new();

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut events, utc(2024, 3, 1, 0, 0))
            .await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name(), "error");
    assert_eq!(complete(&events).total_occurrences, 0);
    assert_eq!(summary.templates, 0);
    assert!(store.rows.is_empty());
}

#[test_log::test(tokio::test)]
async fn templates_are_processed_in_listed_order() {
    let first = finance("First", date(2024, 1, 1), 30, Some(date(2024, 1, 1)));
    let second = finance("Second", date(2023, 6, 1), 30, Some(date(2023, 6, 1)));
    let mut store = MemoryStore::new(vec![first, second]);
    let mut events = Vec::new();

    expand_all::<FinanceInstallment, _, _>(&mut store, &mut events, utc(2024, 3, 1, 0, 0)).await;

    let processing: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::Log(msg) if msg.starts_with("Processing") => Some(msg.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(processing.len(), 2);
    assert!(processing[0].contains("'First'"));
    assert!(processing[1].contains("'Second'"));
}

#[test_log::test(tokio::test)]
async fn disconnect_stops_the_run_and_keeps_inserted_rows() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 29)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    // Processing log plus two successes, then the consumer hangs up.
    let mut sink = HangupSink {
        received: Vec::new(),
        remaining: 3,
    };

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut sink, utc(2024, 3, 1, 0, 0)).await;

    assert!(summary.cancelled);
    assert_eq!(sink.received.len(), 3);
    assert!(!sink.received.iter().any(ProgressEvent::is_terminal));
    // The third insert happened before its event could be delivered.
    assert_eq!(store.dates_of(rent.id).len(), 3);
    assert_eq!(summary.total_occurrences, 3);
}

#[test_log::test(tokio::test)]
async fn dropped_channel_receiver_cancels_before_any_insert() {
    let rent = finance("Rent", date(2024, 1, 1), 7, None);
    let mut store = MemoryStore::new(vec![rent]);
    let (mut tx, rx) = mpsc::channel(4);
    drop(rx);

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut tx, utc(2024, 3, 1, 0, 0)).await;

    assert!(summary.cancelled);
    assert!(store.rows.is_empty());
}

#[test_log::test(tokio::test)]
async fn channel_delivers_events_in_order() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 8)));
    let mut store = MemoryStore::new(vec![rent]);
    let (mut tx, mut rx) = mpsc::channel(16);

    let summary =
        expand_all::<FinanceInstallment, _, _>(&mut store, &mut tx, utc(2024, 3, 1, 0, 0)).await;
    drop(tx);

    let mut received = Vec::new();
    while let Some(event) = rx.recv().await {
        received.push(event);
    }

    assert!(!summary.cancelled);
    assert_eq!(received.len(), 4);
    assert_eq!(complete(&received).total_occurrences, 2);
}
