use chrono::NaiveDate;
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

pub use crate::db::enums::FinanceKind;

/// A recurring income or expense, repeating every `recurrence_days` days.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::finance_installments)]
#[diesel(check_for_backend(Pg))]
pub struct FinanceInstallment {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub kind: FinanceKind,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub recurrence_days: i32,
    pub amount: f64,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
    pub cost_center_id: uuid::Uuid,
    pub currency_id: uuid::Uuid,
}

/// Insert payload, also used as a full-replace changeset on update.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = schema::finance_installments)]
#[diesel(treat_none_as_null = true)]
pub struct NewFinanceInstallment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: FinanceKind,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub recurrence_days: i32,
    pub amount: f64,
    pub user_id: uuid::Uuid,
    pub payer_group_id: uuid::Uuid,
    pub cost_center_id: uuid::Uuid,
    pub currency_id: uuid::Uuid,
}

#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::finance_occurrences)]
#[diesel(check_for_backend(Pg))]
pub struct FinanceOccurrence {
    pub id: uuid::Uuid,
    pub finance_id: uuid::Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    /// Settled.
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::finance_occurrences)]
pub struct NewFinanceOccurrence {
    pub finance_id: uuid::Uuid,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub status: bool,
}

/// Partial update of a finance occurrence. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = schema::finance_occurrences)]
pub struct FinanceOccurrencePatch {
    pub amount: Option<f64>,
    pub status: Option<bool>,
}

impl FinanceOccurrencePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount.is_none() && self.status.is_none()
    }
}
