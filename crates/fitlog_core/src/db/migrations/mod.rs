//! SQLite migration registries and executor.
//!
//! # Responsibility
//! - Register schema migrations per database file in strictly increasing order.
//! - Apply pending migrations atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic within one registry.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Catalog migration 1 is `CREATE TABLE IF NOT EXISTS` so files created
//!   before versioning existed are adopted without data loss.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const CATALOG_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_exercise_catalog.sql"),
}];

const WORKOUT_LOG_MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_workouts.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_workout_indexes.sql"),
    },
];

/// Database file kinds owned by core, each with its own migration registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbSchema {
    /// `exercises.sqlite`: searchable exercise name catalog.
    Catalog,
    /// `workouts.sqlite`: workouts, exercise entries and sets.
    WorkoutLog,
}

impl DbSchema {
    /// Stable label used in log events and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::WorkoutLog => "workout_log",
        }
    }

    fn migrations(self) -> &'static [Migration] {
        match self {
            Self::Catalog => CATALOG_MIGRATIONS,
            Self::WorkoutLog => WORKOUT_LOG_MIGRATIONS,
        }
    }
}

/// Returns the latest migration version known by this binary for `schema`.
pub fn latest_version(schema: DbSchema) -> u32 {
    schema
        .migrations()
        .last()
        .map_or(0, |migration| migration.version)
}

/// Applies all pending migrations of `schema` on the provided connection.
pub fn apply_migrations(conn: &mut Connection, schema: DbSchema) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version(schema);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            schema,
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in schema.migrations() {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
