//! Create-or-skip classification for occurrence inserts.
//!
//! Occurrences are unique per `(template, date)`. A second insert of the same
//! pair fails on the table's dedup constraint; that failure is a benign skip,
//! while every other error is a genuine failure.

use diesel::result::{DatabaseErrorKind, Error};

/// Dedup constraint on `finance_occurrences (finance_id, date)`.
pub const FINANCE_OCCURRENCE_DEDUP: &str = "finance_occurrence_dedup";
/// Dedup constraint on `task_occurrences (task_id, date)`.
pub const TASK_OCCURRENCE_DEDUP: &str = "task_occurrence_dedup";

/// Result of a create-or-skip insert.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<T> {
    Created(T),
    AlreadyExists,
}

impl<T> InsertOutcome<T> {
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// ## Summary
/// Maps a unique violation on `constraint` to [`InsertOutcome::AlreadyExists`].
///
/// ## Errors
/// Passes through every other error, including unique violations on other
/// constraints.
pub fn classify_insert<T>(
    result: diesel::QueryResult<T>,
    constraint: &str,
) -> diesel::QueryResult<InsertOutcome<T>> {
    match result {
        Ok(row) => Ok(InsertOutcome::Created(row)),
        Err(Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info))
            if info.constraint_name() == Some(constraint) =>
        {
            Ok(InsertOutcome::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

/// Whether `err` is a foreign key violation, e.g. an unknown user id on
/// insert or a delete of a template that still has occurrences.
#[must_use]
pub fn is_foreign_key_violation(err: &Error) -> bool {
    matches!(
        err,
        Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
