//! Input checks applied when templates and occurrences are created or updated.
//!
//! Expansion never validates: a stored template that fails here is reported
//! and skipped instead.

use casa_db::model::finance::NewFinanceInstallment;
use casa_db::model::task::NewTaskInstallment;
use casa_recur::RecurrenceRule;

use crate::error::{ServiceError, ServiceResult};

fn require_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "title must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Rejects amounts that are NaN or infinite.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] for a non-finite amount.
pub fn require_finite_amount(amount: f64) -> ServiceResult<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(
            "amount must be a finite number".to_string(),
        ))
    }
}

/// ## Summary
/// Validates a finance installment and returns its recurrence rule.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] if the title is blank, the
/// amount is not finite, the end date precedes the start date, or the
/// interval is not a positive number of days.
pub fn validate_finance_installment(new: &NewFinanceInstallment) -> ServiceResult<RecurrenceRule> {
    require_title(&new.title)?;
    require_finite_amount(new.amount)?;

    if let Some(end) = new.end_date
        && end < new.start_date
    {
        return Err(ServiceError::ValidationError(format!(
            "end_date {end} is before start_date {}",
            new.start_date
        )));
    }

    RecurrenceRule::fixed_interval(new.recurrence_days)
        .map_err(|e| ServiceError::ValidationError(e.to_string()))
}

/// ## Summary
/// Validates a task installment and returns its recurrence rule.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] if the title is blank or the
/// cron expression does not parse.
pub fn validate_task_installment(new: &NewTaskInstallment) -> ServiceResult<RecurrenceRule> {
    require_title(&new.title)?;
    RecurrenceRule::cron(&new.recurrence_cron)
        .map_err(|e| ServiceError::ValidationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use casa_db::model::finance::FinanceKind;
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;

    fn finance(recurrence_days: i32) -> NewFinanceInstallment {
        NewFinanceInstallment {
            title: "Rent".to_string(),
            description: String::new(),
            kind: FinanceKind::Expense,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end_date: None,
            recurrence_days,
            amount: 1200.0,
            user_id: uuid::Uuid::nil(),
            payer_group_id: uuid::Uuid::nil(),
            cost_center_id: uuid::Uuid::nil(),
            currency_id: uuid::Uuid::nil(),
        }
    }

    fn task(cron: &str) -> NewTaskInstallment {
        NewTaskInstallment {
            title: "Water plants".to_string(),
            description: String::new(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("ts"),
            recurrence_cron: cron.to_string(),
            subtasks: serde_json::json!([]),
            user_id: uuid::Uuid::nil(),
            payer_group_id: uuid::Uuid::nil(),
        }
    }

    #[test_log::test]
    fn accepts_valid_finance_installment() {
        let rule = validate_finance_installment(&finance(30)).expect("valid");
        assert_eq!(rule, RecurrenceRule::FixedInterval { days: 30 });
    }

    #[test_log::test]
    fn rejects_zero_and_negative_intervals() {
        for days in [0, -1] {
            assert!(matches!(
                validate_finance_installment(&finance(days)),
                Err(ServiceError::ValidationError(_))
            ));
        }
    }

    #[test_log::test]
    fn rejects_blank_title_and_bad_amount() {
        let mut blank = finance(7);
        blank.title = "   ".to_string();
        assert!(validate_finance_installment(&blank).is_err());

        let mut nan = finance(7);
        nan.amount = f64::NAN;
        assert!(validate_finance_installment(&nan).is_err());
    }

    #[test_log::test]
    fn rejects_end_before_start() {
        let mut backwards = finance(7);
        backwards.end_date = NaiveDate::from_ymd_opt(2023, 12, 31);
        assert!(matches!(
            validate_finance_installment(&backwards),
            Err(ServiceError::ValidationError(_))
        ));
    }

    #[test_log::test]
    fn task_cron_must_parse() {
        assert!(validate_task_installment(&task("0 9 * * MON")).is_ok());
        assert!(validate_task_installment(&task("@weekly")).is_ok());
        assert!(matches!(
            validate_task_installment(&task("not a cron")),
            Err(ServiceError::ValidationError(_))
        ));
        assert!(matches!(
            validate_task_installment(&task("0 9 * *")),
            Err(ServiceError::ValidationError(_))
        ));
    }
}
