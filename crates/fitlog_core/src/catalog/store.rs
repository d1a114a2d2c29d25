//! Exercise catalog store.
//!
//! # Responsibility
//! - Lazily open the catalog file and seed it once.
//! - Serve picker search and "use custom name" inserts.
//!
//! # Invariants
//! - `open()` is idempotent; only the first successful call creates schema and seeds.
//! - A failed `open()` is final for this instance; later calls do not retry.
//! - Public operations never return errors; failures are logged and yield
//!   empty results or no-ops.

use super::seed::DEFAULT_CATALOG;
use super::{CatalogError, CatalogResult};
use crate::db::{open_db, open_db_in_memory, DbSchema};
use crate::model::catalog::{CatalogEntry, CATEGORY_FILTER_ALL};
use log::{debug, error, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, TransactionBehavior};
use std::path::PathBuf;
use std::time::Instant;

/// Catalog file name inside the application data directory.
pub const CATALOG_DB_FILE_NAME: &str = "exercises.sqlite";
/// Maximum rows returned by one search.
pub const SEARCH_LIMIT: u32 = 200;

const INSERT_OR_IGNORE_SQL: &str =
    "INSERT OR IGNORE INTO exercises (name, category) VALUES (?1, ?2);";

/// Where the catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    File(PathBuf),
    InMemory,
}

enum CatalogState {
    Closed,
    Ready(Connection),
    Failed,
}

/// Explicitly constructed catalog handle; construct once at startup and pass
/// it to consumers.
pub struct ExerciseCatalogStore {
    location: CatalogLocation,
    state: CatalogState,
}

impl ExerciseCatalogStore {
    /// Creates a closed store backed by the SQLite file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: CatalogLocation::File(path.into()),
            state: CatalogState::Closed,
        }
    }

    /// Creates a closed store backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: CatalogLocation::InMemory,
            state: CatalogState::Closed,
        }
    }

    pub fn location(&self) -> &CatalogLocation {
        &self.location
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, CatalogState::Ready(_))
    }

    /// Opens the catalog, creating schema and seeding defaults on first use.
    ///
    /// Returns whether the store is ready.
    ///
    /// # Side effects
    /// - May create the parent directory and the database file.
    /// - Emits `catalog_open` logging events.
    pub fn open(&mut self) -> bool {
        match self.state {
            CatalogState::Ready(_) => return true,
            CatalogState::Failed => {
                debug!("event=catalog_open module=catalog status=skipped reason=previous_failure");
                return false;
            }
            CatalogState::Closed => {}
        }

        let started_at = Instant::now();
        match self.open_and_seed() {
            Ok((conn, seeded)) => {
                self.state = CatalogState::Ready(conn);
                info!(
                    "event=catalog_open module=catalog status=ok seeded={} rows={} duration_ms={}",
                    seeded,
                    self.count_exercises(),
                    started_at.elapsed().as_millis()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=catalog_open module=catalog status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.state = CatalogState::Failed;
                false
            }
        }
    }

    /// Case-insensitive substring search on `name`, ordered by name, capped at
    /// [`SEARCH_LIMIT`] rows.
    ///
    /// A blank query matches every entry. `category` of `None`, blank, or
    /// `"All"` disables the category filter; otherwise it must match exactly.
    /// Returns an empty list when the store is not open or the query fails.
    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<CatalogEntry> {
        match self.try_search(query, category) {
            Ok(entries) => entries,
            Err(CatalogError::NotReady) => {
                debug!("event=catalog_search module=catalog status=skipped reason=not_ready");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=catalog_search module=catalog status=error query_len={} error={}",
                    query.chars().count(),
                    err
                );
                Vec::new()
            }
        }
    }

    /// Inserts a user-provided entry unless one with the same name exists.
    ///
    /// The name is trimmed and blank names are ignored. A blank or `"All"`
    /// category is stored as `NULL`. Returns whether a new row was written.
    pub fn insert_custom(&self, name: &str, category: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let result = self
            .connection()
            .and_then(|conn| insert_or_ignore(conn, name, category_filter(category)));
        match result {
            Ok(inserted) => {
                debug!(
                    "event=catalog_insert module=catalog status=ok inserted={}",
                    inserted
                );
                inserted
            }
            Err(CatalogError::NotReady) => {
                debug!("event=catalog_insert module=catalog status=skipped reason=not_ready");
                false
            }
            Err(err) => {
                warn!(
                    "event=catalog_insert module=catalog status=error error={}",
                    err
                );
                false
            }
        }
    }

    /// Number of catalog rows; `0` when not open or on query failure.
    pub(crate) fn count_exercises(&self) -> u64 {
        self.connection()
            .and_then(count_exercises)
            .unwrap_or_else(|err| {
                debug!(
                    "event=catalog_count module=catalog status=error error={}",
                    err
                );
                0
            })
    }

    fn try_search(&self, query: &str, category: Option<&str>) -> CatalogResult<Vec<CatalogEntry>> {
        let conn = self.connection()?;

        let mut sql = String::from(
            "SELECT name, category
             FROM exercises
             WHERE name LIKE ? ESCAPE '\\'",
        );
        let mut bind_values: Vec<Value> = vec![Value::Text(like_pattern(query))];

        if let Some(category) = category_filter(category) {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.to_string()));
        }

        sql.push_str(" ORDER BY name ASC LIMIT ?;");
        bind_values.push(Value::Integer(i64::from(SEARCH_LIMIT)));

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(CatalogEntry {
                name: row.get("name")?,
                category: row.get("category")?,
            });
        }
        Ok(entries)
    }

    fn connection(&self) -> CatalogResult<&Connection> {
        match &self.state {
            CatalogState::Ready(conn) => Ok(conn),
            CatalogState::Closed | CatalogState::Failed => Err(CatalogError::NotReady),
        }
    }

    fn open_and_seed(&self) -> CatalogResult<(Connection, usize)> {
        let mut conn = match &self.location {
            CatalogLocation::File(path) => open_db(path, DbSchema::Catalog)?,
            CatalogLocation::InMemory => open_db_in_memory(DbSchema::Catalog)?,
        };

        let seeded = if count_exercises(&conn)? == 0 {
            seed_defaults(&mut conn)?
        } else {
            0
        };
        Ok((conn, seeded))
    }
}

fn count_exercises(conn: &Connection) -> CatalogResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM exercises;", [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

fn seed_defaults(conn: &mut Connection) -> CatalogResult<usize> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(INSERT_OR_IGNORE_SQL)?;
        for (name, category) in DEFAULT_CATALOG {
            inserted += stmt.execute(params![name, category.label()])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

fn insert_or_ignore(conn: &Connection, name: &str, category: Option<&str>) -> CatalogResult<bool> {
    let changed = conn.execute(INSERT_OR_IGNORE_SQL, params![name, category])?;
    Ok(changed > 0)
}

/// Effective category for filtering and storage; `None` for blank or `"All"`.
fn category_filter(category: Option<&str>) -> Option<&str> {
    category
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != CATEGORY_FILTER_ALL)
}

/// Builds a `LIKE` pattern matching `query` as a literal substring.
fn like_pattern(query: &str) -> String {
    let trimmed = query.trim();
    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for ch in trimmed.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
