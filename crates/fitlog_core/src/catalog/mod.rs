//! Searchable exercise catalog backed by its own SQLite file.
//!
//! # Responsibility
//! - Own the `exercises` table: schema, one-time seeding, search and insert.
//! - Degrade storage failures to empty results instead of surfacing them.
//!
//! # Invariants
//! - `name` is unique with case-sensitive (binary) comparison.
//! - Entries are never updated or deleted.
//! - Seeding runs only when the table is empty.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod seed;
pub mod store;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub enum CatalogError {
    /// `open()` has not succeeded on this store.
    NotReady,
    Db(DbError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "exercise catalog is not open"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotReady => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for CatalogError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
