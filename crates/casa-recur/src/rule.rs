use chrono::{DateTime, TimeDelta, Utc};

use crate::cron::CronSchedule;
use crate::error::{RecurError, RecurResult};

/// How a template repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceRule {
    /// Every `days` calendar days from the start.
    FixedInterval { days: u32 },
    /// Every firing time of a cron schedule at or after the start.
    Cron(CronSchedule),
}

impl RecurrenceRule {
    /// ## Summary
    /// Builds a fixed-interval rule.
    ///
    /// ## Errors
    /// Returns [`RecurError::InvalidInterval`] if `days` is not positive.
    pub fn fixed_interval(days: i32) -> RecurResult<Self> {
        u32::try_from(days)
            .ok()
            .filter(|days| *days > 0)
            .map(|days| Self::FixedInterval { days })
            .ok_or(RecurError::InvalidInterval(days))
    }

    /// ## Summary
    /// Builds a cron rule from a five-field expression or descriptor.
    ///
    /// ## Errors
    /// Returns [`RecurError::InvalidCron`] if the expression does not parse.
    pub fn cron(expression: &str) -> RecurResult<Self> {
        Ok(Self::Cron(expression.parse()?))
    }

    /// The first point of a series beginning at `start`.
    ///
    /// Fixed rules always start at `start`. Cron rules start at `start` if it
    /// matches, otherwise at the next firing time.
    #[must_use]
    pub fn first(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::FixedInterval { .. } => Some(start),
            Self::Cron(schedule) => schedule.first_at_or_after(start),
        }
    }

    /// The point following `point`, or `None` when the series has ended.
    #[must_use]
    pub fn next(&self, point: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::FixedInterval { days } => {
                point.checked_add_signed(TimeDelta::days(i64::from(*days)))
            }
            Self::Cron(schedule) => schedule.next_after(point),
        }
    }

    /// Iterates the unbounded series of points beginning at `start`.
    #[must_use]
    pub fn series(&self, start: DateTime<Utc>) -> Series<'_> {
        Series {
            rule: self,
            next: self.first(start),
        }
    }

    #[must_use]
    pub const fn is_cron(&self) -> bool {
        matches!(self, Self::Cron(_))
    }
}

/// Iterator over the points of a [`RecurrenceRule`].
///
/// Unbounded for fixed rules; callers cap it with a horizon.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    rule: &'a RecurrenceRule,
    next: Option<DateTime<Utc>>,
}

impl Iterator for Series<'_> {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.rule.next(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test_log::test]
    fn weekly_interval_up_to_inclusive_end() {
        let rule = RecurrenceRule::fixed_interval(7).expect("valid");
        let end = utc(2024, 1, 22, 0);
        let points: Vec<_> = rule
            .series(utc(2024, 1, 1, 0))
            .take_while(|point| *point <= end)
            .collect();

        assert_eq!(
            points,
            vec![
                utc(2024, 1, 1, 0),
                utc(2024, 1, 8, 0),
                utc(2024, 1, 15, 0),
                utc(2024, 1, 22, 0),
            ]
        );
    }

    #[test_log::test]
    fn non_positive_interval_is_rejected() {
        assert!(matches!(
            RecurrenceRule::fixed_interval(0),
            Err(RecurError::InvalidInterval(0))
        ));
        assert!(matches!(
            RecurrenceRule::fixed_interval(-3),
            Err(RecurError::InvalidInterval(-3))
        ));
    }

    #[test_log::test]
    fn cron_series_up_to_exclusive_end() {
        let rule = RecurrenceRule::cron("0 9 * * MON").expect("valid");
        let end = utc(2024, 1, 22, 0);
        let points: Vec<_> = rule
            .series(utc(2024, 1, 1, 0))
            .take_while(|point| *point < end)
            .collect();

        assert_eq!(
            points,
            vec![utc(2024, 1, 1, 9), utc(2024, 1, 8, 9), utc(2024, 1, 15, 9)]
        );
    }

    #[test_log::test]
    fn malformed_cron_is_rejected() {
        assert!(matches!(
            RecurrenceRule::cron("every tuesday"),
            Err(RecurError::InvalidCron(_))
        ));
    }

    #[test_log::test]
    fn impossible_cron_yields_empty_series() {
        let rule = RecurrenceRule::cron("0 0 30 2 *").expect("valid");
        assert_eq!(rule.series(utc(2024, 1, 1, 0)).next(), None);
    }
}
