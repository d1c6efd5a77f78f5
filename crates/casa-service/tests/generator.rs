#![allow(clippy::expect_used)]

mod common;

use casa_db::model::finance::FinanceInstallment;
use casa_db::model::task::TaskInstallment;
use casa_recur::{CronSchedule, RecurError};
use casa_service::error::ServiceError;
use casa_service::recurrence::generator::{Plan, generate_for, generate_occurrences};
use casa_service::recurrence::horizon::ExpansionMode;
use common::{MemoryStore, date, finance, task, utc};

#[test_log::test(tokio::test)]
async fn weekly_finance_through_end_date() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 22)));
    let id = rent.id;
    let mut store = MemoryStore::new(vec![rent]);

    let report = generate_occurrences::<FinanceInstallment, _>(
        &mut store,
        id,
        ExpansionMode::on_demand(12),
        utc(2024, 1, 1, 0, 0),
    )
    .await
    .expect("generate");

    assert_eq!(report.created, 4);
    assert_eq!(report.duplicates, 0);
    assert_eq!(report.failures, 0);
    assert_eq!(
        store.dates_of(id),
        vec![
            utc(2024, 1, 1, 0, 0),
            utc(2024, 1, 8, 0, 0),
            utc(2024, 1, 15, 0, 0),
            utc(2024, 1, 22, 0, 0),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn second_run_creates_nothing() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 22)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    let now = utc(2024, 6, 1, 0, 0);

    let first = generate_for(&mut store, &rent, ExpansionMode::on_demand(12), now)
        .await
        .expect("first run");
    let second = generate_for(&mut store, &rent, ExpansionMode::on_demand(12), now)
        .await
        .expect("second run");

    assert_eq!(first.created, 4);
    assert_eq!(second.created, 0);
    assert_eq!(second.duplicates, 4);
    assert_eq!(store.rows.len(), 4);
}

#[test_log::test(tokio::test)]
async fn monday_cron_with_exclusive_bound() {
    let standup = task("Standup", utc(2024, 1, 1, 0, 0), "0 9 * * MON");
    let mut store = MemoryStore::new(vec![standup.clone()]);

    // No lookahead: the exclusive bound is now itself.
    let report = generate_for(
        &mut store,
        &standup,
        ExpansionMode::on_demand(0),
        utc(2024, 1, 22, 0, 0),
    )
    .await
    .expect("generate");

    assert_eq!(report.created, 3);
    assert_eq!(
        store.dates_of(standup.id),
        vec![
            utc(2024, 1, 1, 9, 0),
            utc(2024, 1, 8, 9, 0),
            utc(2024, 1, 15, 9, 0),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn bulk_cron_includes_now() {
    let standup = task("Standup", utc(2024, 1, 1, 0, 0), "0 9 * * MON");
    let mut store = MemoryStore::new(vec![standup.clone()]);

    let report = generate_for(&mut store, &standup, ExpansionMode::Bulk, utc(2024, 1, 15, 9, 0))
        .await
        .expect("generate");

    assert_eq!(report.created, 3);
}

#[test_log::test(tokio::test)]
async fn bulk_finance_stops_at_now_when_end_is_later() {
    let salary = finance("Salary", date(2024, 1, 1), 14, Some(date(2025, 1, 1)));
    let mut store = MemoryStore::new(vec![salary.clone()]);

    generate_for(&mut store, &salary, ExpansionMode::Bulk, utc(2024, 2, 5, 8, 0))
        .await
        .expect("generate");

    assert_eq!(
        store.dates_of(salary.id),
        vec![
            utc(2024, 1, 1, 0, 0),
            utc(2024, 1, 15, 0, 0),
            utc(2024, 1, 29, 0, 0),
        ]
    );
}

#[test_log::test(tokio::test)]
async fn failed_insert_does_not_stop_later_dates() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 22)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    store.failing.insert((rent.id, utc(2024, 1, 8, 0, 0)));

    let report = generate_for(&mut store, &rent, ExpansionMode::Bulk, utc(2024, 6, 1, 0, 0))
        .await
        .expect("generate");

    assert_eq!(report.created, 3);
    assert_eq!(report.failures, 1);
    assert!(store.dates_of(rent.id).contains(&utc(2024, 1, 22, 0, 0)));
}

#[test_log::test(tokio::test)]
async fn pre_existing_occurrence_is_skipped_not_counted() {
    let rent = finance("Rent", date(2024, 1, 1), 7, Some(date(2024, 1, 22)));
    let mut store = MemoryStore::new(vec![rent.clone()]);
    store
        .rows
        .insert((rent.id, utc(2024, 1, 15, 0, 0)), uuid::Uuid::new_v4());

    let report = generate_for(&mut store, &rent, ExpansionMode::Bulk, utc(2024, 6, 1, 0, 0))
        .await
        .expect("generate");

    assert_eq!(report.created, 3);
    assert_eq!(report.duplicates, 1);
    assert_eq!(store.rows.len(), 4);
}

#[test_log::test(tokio::test)]
async fn unknown_template_is_not_found() {
    let mut store = MemoryStore::<TaskInstallment>::new(Vec::new());
    let result = generate_occurrences::<TaskInstallment, _>(
        &mut store,
        uuid::Uuid::new_v4(),
        ExpansionMode::on_demand(12),
        utc(2024, 1, 1, 0, 0),
    )
    .await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn corrupted_rules_are_rejected_before_generation() {
    let broken_interval = finance("Broken", date(2024, 1, 1), 0, None);
    let mut finance_store = MemoryStore::new(vec![broken_interval.clone()]);
    let result = generate_for(
        &mut finance_store,
        &broken_interval,
        ExpansionMode::Bulk,
        utc(2024, 2, 1, 0, 0),
    )
    .await;
    assert!(matches!(
        result,
        Err(ServiceError::RecurError(RecurError::InvalidInterval(0)))
    ));
    assert!(finance_store.rows.is_empty());

    let broken_cron = task("Broken", utc(2024, 1, 1, 0, 0), "61 * * * *");
    let mut task_store = MemoryStore::new(vec![broken_cron.clone()]);
    let result = generate_for(
        &mut task_store,
        &broken_cron,
        ExpansionMode::Bulk,
        utc(2024, 2, 1, 0, 0),
    )
    .await;
    assert!(matches!(
        result,
        Err(ServiceError::RecurError(RecurError::InvalidCron(_)))
    ));
    assert!(task_store.rows.is_empty());
}

#[test_log::test]
fn planned_cron_points_match_and_skip_nothing() {
    let chores = task("Chores", utc(2024, 1, 3, 17, 45), "30 8,18 */3 * *");
    let schedule: CronSchedule = chores.recurrence_cron.parse().expect("valid");
    let plan = Plan::for_template(&chores, ExpansionMode::on_demand(2), utc(2024, 1, 3, 17, 45))
        .expect("plan");

    let points: Vec<_> = plan.points().collect();
    assert!(!points.is_empty());
    for pair in points.windows(2) {
        assert!(schedule.matches(pair[0]));
        assert_eq!(schedule.next_after(pair[0]), Some(pair[1]));
    }
    let last = points.last().copied().expect("last");
    assert!(
        schedule
            .next_after(last)
            .is_none_or(|next| !plan.horizon.contains(next))
    );
}
