#![allow(clippy::expect_used)]

//! Checks `next_after` against a minute-by-minute scan.

use casa_recur::{CronSchedule, RecurrenceRule};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

const EXPRESSIONS: &[&str] = &[
    "*/15 * * * *",
    "0 9 * * MON",
    "30 8-18/5 * * 1-5",
    "0 0 13 * FRI",
    "0 12 1,15 * *",
    "45 23 * * SUN",
    "0 6 ? * 0,6",
    "0 0 29 2 *",
    "@hourly",
    "@monthly",
];

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 27, 22, 7, 0)
        .single()
        .expect("valid start")
}

/// Every firing time in `[from, until)` found by scanning each minute.
fn scan(schedule: &CronSchedule, from: DateTime<Utc>, until: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let mut hits = Vec::new();
    let mut at = from;
    while at < until {
        if schedule.matches(at) {
            hits.push(at);
        }
        at += TimeDelta::minutes(1);
    }
    hits
}

#[test_log::test]
fn next_after_agrees_with_scan() {
    let from = start();
    let until = from + TimeDelta::days(45);

    for expression in EXPRESSIONS {
        let schedule: CronSchedule = expression.parse().expect(expression);
        let rule = RecurrenceRule::Cron(schedule.clone());

        let generated: Vec<_> = rule.series(from).take_while(|at| *at < until).collect();
        let scanned = scan(&schedule, from, until);

        assert_eq!(generated, scanned, "{expression}");
    }
}

#[test_log::test]
fn every_generated_point_matches() {
    let from = start();
    for expression in EXPRESSIONS {
        let rule = RecurrenceRule::cron(expression).expect(expression);
        let RecurrenceRule::Cron(schedule) = &rule else {
            unreachable!("cron constructor builds a cron rule");
        };
        for point in rule.series(from).take(50) {
            assert!(schedule.matches(point), "{expression} at {point}");
        }
    }
}
