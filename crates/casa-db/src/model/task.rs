use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A recurring chore scheduled by a five-field cron expression.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::task_installments)]
#[diesel(check_for_backend(Pg))]
pub struct TaskInstallment {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub recurrence_cron: String,
    /// Opaque checklist copied onto each occurrence.
    pub subtasks: serde_json::Value,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
}

fn empty_subtasks() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = schema::task_installments)]
pub struct NewTaskInstallment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub recurrence_cron: String,
    #[serde(default = "empty_subtasks")]
    pub subtasks: serde_json::Value,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
}

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::task_occurrences)]
#[diesel(check_for_backend(Pg))]
pub struct TaskOccurrence {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub date: DateTime<Utc>,
    /// Done.
    pub status: bool,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
    pub subtasks: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::task_occurrences)]
pub struct NewTaskOccurrence {
    pub task_id: uuid::Uuid,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: bool,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
    #[serde(default = "empty_subtasks")]
    pub subtasks: serde_json::Value,
}

/// Partial update of a task occurrence. Absent or `null` fields are left
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = schema::task_occurrences)]
pub struct TaskOccurrencePatch {
    pub status: Option<bool>,
    pub user_id: Option<uuid::Uuid>,
    pub payer_group_id: Option<uuid::Uuid>,
    pub subtasks: Option<serde_json::Value>,
}

impl TaskOccurrencePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.user_id.is_none()
            && self.payer_group_id.is_none()
            && self.subtasks.is_none()
    }
}
