//! Cron field kinds and the value sets they match.

use std::fmt;

/// One of the five positions in a standard cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

const MONTH_NAMES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const WEEKDAY_NAMES: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

impl FieldKind {
    /// Fields in expression order.
    pub const ALL: [Self; 5] = [
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        }
    }

    /// Inclusive bounds accepted in the expression.
    ///
    /// Day-of-week accepts 7 as an alias for Sunday.
    #[must_use]
    pub const fn bounds(self) -> (u8, u8) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    /// Whether `?` is accepted as a wildcard.
    #[must_use]
    pub const fn allows_question_mark(self) -> bool {
        matches!(self, Self::DayOfMonth | Self::DayOfWeek)
    }

    /// Resolves a three-letter month or weekday name (case-insensitive).
    #[must_use]
    pub fn name_value(self, name: &str) -> Option<u8> {
        let names: &[&str] = match self {
            Self::Month => &MONTH_NAMES,
            Self::DayOfWeek => &WEEKDAY_NAMES,
            _ => return None,
        };
        let offset = u8::from(self == Self::Month);
        names
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .and_then(|index| u8::try_from(index).ok())
            .map(|index| index + offset)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of values matched by one cron field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    bits: u64,
    /// The field contained an unrestricted `*` or `?` term.
    star: bool,
}

impl FieldSet {
    pub(crate) const fn empty() -> Self {
        Self {
            bits: 0,
            star: false,
        }
    }

    /// Adds every `step`-th value in `start..=end`.
    pub(crate) fn insert_range(&mut self, start: u8, end: u8, step: u8) {
        let mut value = start;
        while value <= end {
            self.bits |= 1 << value;
            match value.checked_add(step) {
                Some(next) => value = next,
                None => break,
            }
        }
    }

    pub(crate) fn mark_star(&mut self) {
        self.star = true;
    }

    /// Folds day-of-week 7 onto 0 so both spell Sunday.
    pub(crate) fn fold_sunday(&mut self) {
        if self.bits & (1 << 7) != 0 {
            self.bits &= !(1 << 7);
            self.bits |= 1;
        }
    }

    /// Whether `value` is in the set.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value < 64 && self.bits & (1 << value) != 0
    }

    /// Whether the field was written as an unrestricted wildcard.
    #[must_use]
    pub const fn is_star(&self) -> bool {
        self.star
    }
}
