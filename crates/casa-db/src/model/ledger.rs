use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// One entry of a user's append-only balance ledger.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::wallets)]
#[diesel(check_for_backend(Pg))]
pub struct Wallet {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

/// Money moved against a finance occurrence.
#[derive(Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::transactions)]
#[diesel(check_for_backend(Pg))]
pub struct Transaction {
    pub id: uuid::Uuid,
    pub finance_occurrence_id: uuid::Uuid,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}
