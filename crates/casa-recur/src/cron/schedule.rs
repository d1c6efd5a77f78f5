use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};

use super::error::ParseError;
use super::field::FieldSet;

/// Years past the starting point after which a search for the next match
/// gives up. Covers leap-day-only schedules with room to spare.
const SEARCH_HORIZON_YEARS: i32 = 8;

/// A parsed cron schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronSchedule {
    pub(crate) minutes: FieldSet,
    pub(crate) hours: FieldSet,
    pub(crate) days_of_month: FieldSet,
    pub(crate) months: FieldSet,
    pub(crate) days_of_week: FieldSet,
    pub(crate) expression: String,
}

impl CronSchedule {
    /// The expression this schedule was parsed from.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// ## Summary
    /// Returns true if `at` is a firing time of this schedule.
    ///
    /// Only whole minutes can match.
    #[must_use]
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        at.second() == 0
            && at.nanosecond() == 0
            && self.minutes.contains(at.minute())
            && self.hours.contains(at.hour())
            && self.months.contains(at.month())
            && self.day_matches(at.date_naive())
    }

    /// Day-of-month and day-of-week combine with OR when both are restricted,
    /// and with AND when either is an unrestricted wildcard.
    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.days_of_month.contains(date.day());
        let dow = self
            .days_of_week
            .contains(date.weekday().num_days_from_sunday());

        if self.days_of_month.is_star() || self.days_of_week.is_star() {
            dom && dow
        } else {
            dom || dow
        }
    }

    /// ## Summary
    /// Returns the first firing time strictly after `after`.
    ///
    /// Returns `None` when the schedule cannot fire within the search horizon
    /// (for example `0 0 31 2 *`).
    #[must_use]
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut candidate = after
            .with_second(0)?
            .with_nanosecond(0)?
            .checked_add_signed(TimeDelta::minutes(1))?;
        let last_year = candidate.year() + SEARCH_HORIZON_YEARS;

        while candidate.year() <= last_year {
            if !self.months.contains(candidate.month()) {
                candidate = start_of_next_month(candidate.date_naive())?;
                continue;
            }
            if !self.day_matches(candidate.date_naive()) {
                candidate = start_of_day(candidate.date_naive().succ_opt()?)?;
                continue;
            }
            if !self.hours.contains(candidate.hour()) {
                candidate = candidate
                    .with_minute(0)?
                    .checked_add_signed(TimeDelta::hours(1))?;
                continue;
            }
            if !self.minutes.contains(candidate.minute()) {
                candidate = candidate.checked_add_signed(TimeDelta::minutes(1))?;
                continue;
            }
            return Some(candidate);
        }

        tracing::trace!(
            expression = %self.expression,
            %after,
            "No cron match within search horizon"
        );
        None
    }

    /// ## Summary
    /// Returns `at` itself if it matches, otherwise the next firing time.
    #[must_use]
    pub fn first_at_or_after(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if self.matches(at) {
            Some(at)
        } else {
            self.next_after(at)
        }
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn start_of_next_month(date: NaiveDate) -> Option<DateTime<Utc>> {
    let first = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    start_of_day(first)
}

impl FromStr for CronSchedule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
