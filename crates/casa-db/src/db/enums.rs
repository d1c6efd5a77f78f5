//! Text-backed enums stored behind CHECK constraints.

use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use std::fmt;
use std::io::Write;

use casa_core::types::TemplateKind;

/// Direction of money for a finance installment.
///
/// Maps to `finance_installments.kind`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum FinanceKind {
    Income,
    Expense,
}

impl FinanceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl ToSql<Text, Pg> for FinanceKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for FinanceKind {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"income" => Ok(Self::Income),
            b"expense" => Ok(Self::Expense),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl fmt::Display for FinanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source table of a dashboard row.
///
/// Maps to `occurrences_dashboard.occurrence_type`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    serde::Serialize,
    serde::Deserialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceType {
    Finance,
    Task,
}

impl ToSql<Text, Pg> for OccurrenceType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            Self::Finance => "finance",
            Self::Task => "task",
        };
        out.write_all(s.as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for OccurrenceType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        match bytes.as_bytes() {
            b"finance" => Ok(Self::Finance),
            b"task" => Ok(Self::Task),
            _ => Err("Unrecognized enum variant".into()),
        }
    }
}

impl From<OccurrenceType> for TemplateKind {
    fn from(db_type: OccurrenceType) -> Self {
        match db_type {
            OccurrenceType::Finance => Self::Finance,
            OccurrenceType::Task => Self::Task,
        }
    }
}

impl From<TemplateKind> for OccurrenceType {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Finance => Self::Finance,
            TemplateKind::Task => Self::Task,
        }
    }
}
