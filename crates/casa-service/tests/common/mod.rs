#![allow(dead_code, clippy::expect_used)]

use std::collections::{BTreeMap, HashSet};

use casa_db::db::dedup::InsertOutcome;
use casa_db::model::finance::{FinanceInstallment, FinanceKind, NewFinanceOccurrence};
use casa_db::model::task::{NewTaskOccurrence, TaskInstallment};
use casa_service::error::{ServiceError, ServiceResult};
use casa_service::recurrence::progress::{ProgressEvent, ProgressSink, SinkClosed};
use casa_service::recurrence::store::OccurrenceStore;
use casa_service::recurrence::template::RecurringTemplate;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid timestamp")
}

pub fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, mo, d).expect("valid date")
}

pub fn finance(
    title: &str,
    start: NaiveDate,
    recurrence_days: i32,
    end: Option<NaiveDate>,
) -> FinanceInstallment {
    FinanceInstallment {
        id: uuid::Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        kind: FinanceKind::Expense,
        start_date: start,
        end_date: end,
        recurrence_days,
        amount: 100.0,
        user_id: uuid::Uuid::new_v4(),
        payer_group_id: uuid::Uuid::new_v4(),
        cost_center_id: uuid::Uuid::new_v4(),
        currency_id: uuid::Uuid::new_v4(),
    }
}

pub fn task(title: &str, start: DateTime<Utc>, cron: &str) -> TaskInstallment {
    TaskInstallment {
        id: uuid::Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        start_date: start,
        recurrence_cron: cron.to_string(),
        subtasks: serde_json::json!([]),
        user_id: uuid::Uuid::new_v4(),
        payer_group_id: uuid::Uuid::new_v4(),
    }
}

/// The `(template, instant)` pair an occurrence is unique on.
pub trait Keyed {
    fn key(&self) -> (uuid::Uuid, DateTime<Utc>);
}

impl Keyed for NewFinanceOccurrence {
    fn key(&self) -> (uuid::Uuid, DateTime<Utc>) {
        (self.finance_id, self.date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl Keyed for NewTaskOccurrence {
    fn key(&self) -> (uuid::Uuid, DateTime<Utc>) {
        (self.task_id, self.date)
    }
}

fn storage_error(what: &str) -> ServiceError {
    ServiceError::DieselError(diesel::result::Error::QueryBuilderError(
        what.to_string().into(),
    ))
}

/// In-memory occurrence store with the same dedup contract as the database.
pub struct MemoryStore<T> {
    pub templates: Vec<T>,
    pub rows: BTreeMap<(uuid::Uuid, DateTime<Utc>), uuid::Uuid>,
    /// Inserts at these keys fail with a storage error.
    pub failing: HashSet<(uuid::Uuid, DateTime<Utc>)>,
    /// Listing templates fails.
    pub listing_fails: bool,
}

impl<T> MemoryStore<T> {
    pub fn new(templates: Vec<T>) -> Self {
        Self {
            templates,
            rows: BTreeMap::new(),
            failing: HashSet::new(),
            listing_fails: false,
        }
    }

    /// Stored occurrence instants of one template, in order.
    pub fn dates_of(&self, template_id: uuid::Uuid) -> Vec<DateTime<Utc>> {
        self.rows
            .keys()
            .filter(|(id, _)| *id == template_id)
            .map(|(_, at)| *at)
            .collect()
    }
}

impl<T> OccurrenceStore<T> for MemoryStore<T>
where
    T: RecurringTemplate + Clone,
    T::Occurrence: Keyed,
{
    async fn list_templates(&mut self) -> ServiceResult<Vec<T>> {
        if self.listing_fails {
            return Err(storage_error("connection reset"));
        }
        Ok(self.templates.clone())
    }

    async fn find_template(&mut self, id: uuid::Uuid) -> ServiceResult<Option<T>> {
        Ok(self.templates.iter().find(|t| t.id() == id).cloned())
    }

    async fn create_occurrence(
        &mut self,
        occurrence: &T::Occurrence,
    ) -> ServiceResult<InsertOutcome<uuid::Uuid>> {
        let key = occurrence.key();
        if self.failing.contains(&key) {
            return Err(storage_error("insert rejected"));
        }
        if self.rows.contains_key(&key) {
            return Ok(InsertOutcome::AlreadyExists);
        }
        let id = uuid::Uuid::new_v4();
        self.rows.insert(key, id);
        Ok(InsertOutcome::Created(id))
    }
}

/// Sink whose consumer disconnects after `remaining` events.
pub struct HangupSink {
    pub received: Vec<ProgressEvent>,
    pub remaining: usize,
}

impl ProgressSink for HangupSink {
    async fn emit(&mut self, event: ProgressEvent) -> Result<(), SinkClosed> {
        if self.remaining == 0 {
            return Err(SinkClosed);
        }
        self.remaining -= 1;
        self.received.push(event);
        Ok(())
    }
}
