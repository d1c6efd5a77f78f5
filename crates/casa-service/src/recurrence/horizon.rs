use chrono::{DateTime, Months, Utc};

/// Which entry point is expanding a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Catch every template up to the present.
    Bulk,
    /// Plan one template ahead, `lookahead` past now when it has no end.
    OnDemand { lookahead: Months },
}

impl ExpansionMode {
    #[must_use]
    pub const fn on_demand(lookahead_months: u32) -> Self {
        Self::OnDemand {
            lookahead: Months::new(lookahead_months),
        }
    }
}

/// Upper bound of an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub bound: DateTime<Utc>,
    pub inclusive: bool,
}

impl Horizon {
    #[must_use]
    pub const fn inclusive(bound: DateTime<Utc>) -> Self {
        Self {
            bound,
            inclusive: true,
        }
    }

    #[must_use]
    pub const fn exclusive(bound: DateTime<Utc>) -> Self {
        Self {
            bound,
            inclusive: false,
        }
    }

    /// Whether `point` falls on the near side of the bound.
    #[must_use]
    pub fn contains(&self, point: DateTime<Utc>) -> bool {
        if self.inclusive {
            point <= self.bound
        } else {
            point < self.bound
        }
    }
}

/// `now` advanced by `lookahead`, saturating at the latest representable time.
pub(crate) fn lookahead_from(now: DateTime<Utc>, lookahead: Months) -> DateTime<Utc> {
    now.checked_add_months(lookahead)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use chrono::TimeZone;

    use super::*;

    #[test_log::test]
    fn bound_inclusion() {
        let bound = Utc.with_ymd_and_hms(2024, 1, 22, 0, 0, 0).single().expect("ts");
        assert!(Horizon::inclusive(bound).contains(bound));
        assert!(!Horizon::exclusive(bound).contains(bound));
        assert!(Horizon::exclusive(bound).contains(bound - chrono::TimeDelta::minutes(1)));
    }

    #[test_log::test]
    fn one_year_lookahead() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).single().expect("ts");
        let ahead = lookahead_from(now, Months::new(12));
        assert_eq!(
            ahead,
            Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).single().expect("ts")
        );
    }
}
