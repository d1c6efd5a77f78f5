//! Standard five-field cron schedules evaluated in UTC.

mod error;
mod field;
mod parse;
mod schedule;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use field::{FieldKind, FieldSet};
pub use parse::parse;
pub use schedule::CronSchedule;
