//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQL details from service orchestration.
//! - Translate SQLite constraint failures into semantic errors
//!   (`Conflict`, `MissingReference`).
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Grade rows are only ever inserted, never updated.

use crate::db::DbError;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod catalog_repo;
pub mod enrollment_repo;
pub mod grade_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for academic record persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(Uuid),
    /// A uniqueness constraint rejected the write.
    Conflict(String),
    /// A foreign key points at a row that does not exist.
    MissingReference(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Conflict(details) => write!(f, "constraint conflict: {details}"),
            Self::MissingReference(details) => write!(f, "missing referenced record: {details}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        classify_constraint(&value).unwrap_or(Self::Db(DbError::Sqlite(value)))
    }
}

fn classify_constraint(err: &rusqlite::Error) -> Option<RepoError> {
    let rusqlite::Error::SqliteFailure(failure, message) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }

    let details = message
        .clone()
        .unwrap_or_else(|| "constraint violation".to_string());
    match failure.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(RepoError::Conflict(details))
        }
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(RepoError::MissingReference(details)),
        _ => None,
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
