pub mod dashboard;
pub mod finance_installment;
pub mod finance_occurrence;
pub mod ledger;
pub mod task_installment;
pub mod task_occurrence;
