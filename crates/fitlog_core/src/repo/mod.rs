//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the workout log.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must call `validate()` on models before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

use crate::db::DbError;
use crate::model::workout::WorkoutValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod workout_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Kind of record a [`RepoError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Workout,
    Exercise,
    Set,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Exercise => "exercise",
            Self::Set => "set",
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    Validation(WorkoutValidationError),
    Db(DbError),
    NotFound { kind: RecordKind, id: Uuid },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.label()),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "workout repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted workout data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::UninitializedConnection { .. } | Self::InvalidData(_) => {
                None
            }
        }
    }
}

impl From<WorkoutValidationError> for RepoError {
    fn from(value: WorkoutValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
