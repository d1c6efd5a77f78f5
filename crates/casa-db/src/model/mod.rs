pub mod dashboard;
pub mod finance;
pub mod ledger;
pub mod task;
