use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] casa_db::error::DbError),

    #[error(transparent)]
    RecurError(#[from] casa_recur::RecurError),

    #[error(transparent)]
    CoreError(#[from] casa_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl ServiceError {
    /// ## Summary
    /// Maps a failed insert or update. A foreign key violation means the
    /// payload names a row that does not exist.
    #[must_use]
    pub fn from_write(err: diesel::result::Error, what: &str) -> Self {
        if casa_db::db::dedup::is_foreign_key_violation(&err) {
            Self::ValidationError(format!("{what} references a record that does not exist"))
        } else {
            Self::DieselError(err)
        }
    }

    /// ## Summary
    /// Maps a failed delete. A foreign key violation means other rows still
    /// depend on the one being removed.
    #[must_use]
    pub fn from_delete(err: diesel::result::Error, what: &str) -> Self {
        if casa_db::db::dedup::is_foreign_key_violation(&err) {
            Self::Conflict(format!("{what} is still referenced by other records"))
        } else {
            Self::DieselError(err)
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
