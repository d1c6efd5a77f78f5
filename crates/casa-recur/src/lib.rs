//! Recurrence rules: fixed day intervals and five-field cron schedules.

pub mod cron;
pub mod error;
pub mod rule;

pub use cron::CronSchedule;
pub use error::{RecurError, RecurResult};
pub use rule::{RecurrenceRule, Series};
