use thiserror::Error;

use crate::cron::ParseError;

/// Errors raised while building a recurrence rule.
#[derive(Error, Debug, Clone)]
pub enum RecurError {
    #[error("Invalid cron expression: {0}")]
    InvalidCron(#[from] ParseError),

    #[error("Recurrence interval must be a positive number of days, got {0}")]
    InvalidInterval(i32),
}

pub type RecurResult<T> = std::result::Result<T, RecurError>;
