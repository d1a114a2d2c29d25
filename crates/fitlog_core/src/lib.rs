//! Core domain logic for FitLog.
//! This crate is the single source of truth for business invariants.

pub mod calendar;
pub mod catalog;
pub mod db;
pub mod logging;
pub mod model;
pub mod paths;
pub mod repo;
pub mod service;

pub use calendar::day_groups::{day_cells, group_by_day, DayCell};
pub use calendar::month_grid::{
    build_month_grid, leading_filler_count, shift_month, weekday_symbols, MonthGrid,
};
pub use calendar::{is_same_month, CalendarConfig, CalendarError};
pub use catalog::store::{CatalogLocation, ExerciseCatalogStore};
pub use catalog::{CatalogError, CatalogResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::catalog::{picker_labels, CatalogEntry, ExerciseCategory, CATEGORY_FILTER_ALL};
pub use model::workout::{
    ExerciseEntry, ExerciseEntryId, Workout, WorkoutId, WorkoutSet, WorkoutSetId,
    WorkoutValidationError,
};
pub use paths::AppPaths;
pub use repo::workout_repo::{SqliteWorkoutRepository, WorkoutRepository};
pub use repo::{RecordKind, RepoError, RepoResult};
pub use service::workout_service::WorkoutService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
