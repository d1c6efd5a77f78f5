pub mod error;
pub mod finance;
pub mod ledger;
pub mod recurrence;
pub mod task;
pub mod validation;
