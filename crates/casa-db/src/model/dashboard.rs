use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::enums::OccurrenceType;
use crate::db::schema;

/// A row of the `occurrences_dashboard` view.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Serialize)]
#[diesel(table_name = schema::occurrences_dashboard)]
#[diesel(check_for_backend(Pg))]
pub struct DashboardRow {
    pub occurrence_type: OccurrenceType,
    pub id: uuid::Uuid,
    pub date: DateTime<Utc>,
    pub status: bool,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_converted: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    pub payer_group: String,
    pub responsible_user: String,
}
