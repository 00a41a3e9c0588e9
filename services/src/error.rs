//! Error type shared by every workflow in this crate.
//!
//! Each variant corresponds to exactly one HTTP status in the api layer:
//! `Validation` 400, `Unauthenticated` 401, `Forbidden` 403, `NotFound` 404,
//! `Conflict` 409 and `Database` 500.

use sea_orm::{DbErr, SqlErr};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{what} not found"))
    }

    /// Turns a unique-constraint violation into `Conflict(message)`; any other
    /// store error stays a `Database` error.
    pub fn conflict_on_unique(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(message.to_owned()),
            _ => ServiceError::Database(err),
        }
    }
}
