use casa_core::types::TemplateKind;
use casa_db::model::finance::{FinanceInstallment, NewFinanceOccurrence};
use casa_db::model::task::{NewTaskOccurrence, TaskInstallment};
use casa_recur::{RecurResult, RecurrenceRule};
use chrono::{DateTime, NaiveTime, Utc};

use super::horizon::{ExpansionMode, Horizon, lookahead_from};

/// A stored record that repeats according to a [`RecurrenceRule`].
pub trait RecurringTemplate: Send + Sync {
    /// Insert payload for one occurrence of this template.
    type Occurrence: Send + Sync;

    const KIND: TemplateKind;

    fn id(&self) -> uuid::Uuid;

    fn title(&self) -> &str;

    /// First instant of the series.
    fn start(&self) -> DateTime<Utc>;

    /// ## Summary
    /// Rebuilds the recurrence rule from stored columns.
    ///
    /// ## Errors
    /// Fails for stored data that no longer satisfies the rule invariants.
    fn rule(&self) -> RecurResult<RecurrenceRule>;

    /// How far an expansion in `mode` runs at `now`.
    fn horizon(&self, mode: ExpansionMode, now: DateTime<Utc>) -> Horizon;

    /// Builds the occurrence that lands on `point`.
    fn occurrence_at(&self, point: DateTime<Utc>) -> Self::Occurrence;

    /// Renders `point` for progress messages.
    fn point_label(point: DateTime<Utc>) -> String {
        point.to_rfc3339()
    }
}

fn midnight(date: chrono::NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl RecurringTemplate for FinanceInstallment {
    type Occurrence = NewFinanceOccurrence;

    const KIND: TemplateKind = TemplateKind::Finance;

    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn start(&self) -> DateTime<Utc> {
        midnight(self.start_date)
    }

    fn rule(&self) -> RecurResult<RecurrenceRule> {
        RecurrenceRule::fixed_interval(self.recurrence_days)
    }

    fn horizon(&self, mode: ExpansionMode, now: DateTime<Utc>) -> Horizon {
        let end = self.end_date.map(midnight);
        match mode {
            ExpansionMode::Bulk => Horizon::inclusive(end.map_or(now, |end| end.min(now))),
            ExpansionMode::OnDemand { lookahead } => {
                Horizon::inclusive(end.unwrap_or_else(|| lookahead_from(now, lookahead)))
            }
        }
    }

    fn occurrence_at(&self, point: DateTime<Utc>) -> NewFinanceOccurrence {
        NewFinanceOccurrence {
            finance_id: self.id,
            date: point.date_naive(),
            amount: self.amount,
            status: false,
        }
    }

    fn point_label(point: DateTime<Utc>) -> String {
        point.date_naive().to_string()
    }
}

impl RecurringTemplate for TaskInstallment {
    type Occurrence = NewTaskOccurrence;

    const KIND: TemplateKind = TemplateKind::Task;

    fn id(&self) -> uuid::Uuid {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn start(&self) -> DateTime<Utc> {
        self.start_date
    }

    fn rule(&self) -> RecurResult<RecurrenceRule> {
        RecurrenceRule::cron(&self.recurrence_cron)
    }

    fn horizon(&self, mode: ExpansionMode, now: DateTime<Utc>) -> Horizon {
        match mode {
            ExpansionMode::Bulk => Horizon::inclusive(now),
            ExpansionMode::OnDemand { lookahead } => {
                Horizon::exclusive(lookahead_from(now, lookahead))
            }
        }
    }

    fn occurrence_at(&self, point: DateTime<Utc>) -> NewTaskOccurrence {
        NewTaskOccurrence {
            task_id: self.id,
            date: point,
            status: false,
            user_id: self.user_id,
            payer_group_id: self.payer_group_id,
            subtasks: self.subtasks.clone(),
        }
    }
}
