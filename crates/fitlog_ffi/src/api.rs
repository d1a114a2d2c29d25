//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the process-wide catalog handle and data directory for the UI.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in response envelopes, never thrown.
//! - The data directory is fixed by the first `init_app` (or first use).

use chrono::{Datelike, FixedOffset, NaiveDate};
use fitlog_core::db::{open_db, DbSchema};
use fitlog_core::{
    core_version as core_version_inner, day_cells, group_by_day,
    init_logging as init_logging_inner, picker_labels, ping as ping_inner,
    weekday_symbols as weekday_symbols_inner,
    AppPaths, CalendarConfig, ExerciseCatalogStore, MonthGrid, RepoResult,
    SqliteWorkoutRepository, Workout, WorkoutService,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const DATA_DIR_ENV: &str = "FITLOG_DATA_DIR";
static APP_STATE: OnceLock<AppState> = OnceLock::new();

struct AppState {
    paths: AppPaths,
    catalog: Mutex<ExerciseCatalogStore>,
}

impl AppState {
    fn new(paths: AppPaths) -> Self {
        let mut catalog = ExerciseCatalogStore::new(paths.catalog_db());
        catalog.open();
        Self {
            paths,
            catalog: Mutex::new(catalog),
        }
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Fixes the application data directory and opens the exercise catalog.
///
/// # FFI contract
/// - Call once at startup, before any catalog or workout call.
/// - Repeating with the same directory is a no-op.
/// - Returns empty string on success, error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_app(data_dir: String) -> String {
    let requested = PathBuf::from(data_dir.trim());
    if requested.as_os_str().is_empty() {
        return "data_dir cannot be empty".to_string();
    }

    let state = APP_STATE.get_or_init(|| AppState::new(AppPaths::new(requested.clone())));
    if state.paths.data_dir() != requested {
        return format!(
            "app already initialized at `{}`; refusing to switch to `{}`",
            state.paths.data_dir().display(),
            requested.display()
        );
    }
    if !lock_catalog(state).is_ready() {
        return "exercise catalog unavailable; search will return no results".to_string();
    }
    String::new()
}

/// One rendered calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCellItem {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub in_month: bool,
    pub workout_count: u32,
}

/// Month grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    /// Day cells in display order; length is a multiple of 7 (or 0).
    pub cells: Vec<DayCellItem>,
    /// Header labels rotated to match grid columns.
    pub weekday_symbols: Vec<String>,
    pub message: String,
}

impl MonthGridResponse {
    fn empty(message: impl Into<String>) -> Self {
        Self {
            cells: Vec::new(),
            weekday_symbols: Vec::new(),
            message: message.into(),
        }
    }
}

/// Builds the calendar grid for one month with workout counts per day.
///
/// Input semantics:
/// - `first_weekday`: 1 = Sunday ... 7 = Saturday, from the device locale.
/// - `locale_weekday_symbols`: optional 7 Sunday-first labels.
/// - `utc_offset_minutes`: device offset used to bucket workouts by day.
///
/// # FFI contract
/// - Never panics; invalid input yields an empty grid with a message.
#[flutter_rust_bridge::frb(sync)]
pub fn month_grid(
    year: i32,
    month: u32,
    first_weekday: u8,
    locale_weekday_symbols: Option<Vec<String>>,
    utc_offset_minutes: i32,
) -> MonthGridResponse {
    let Some(anchor) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return MonthGridResponse::empty(format!("invalid month {year}-{month}"));
    };
    let calendar = match calendar_config(first_weekday, locale_weekday_symbols) {
        Ok(calendar) => calendar,
        Err(message) => return MonthGridResponse::empty(message),
    };
    let Some(offset) = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) else {
        return MonthGridResponse::empty(format!("invalid utc offset {utc_offset_minutes}"));
    };

    let grid = match MonthGrid::build(anchor, &calendar) {
        Ok(grid) => grid,
        Err(err) => {
            warn!(
                "event=month_grid_build module=ffi status=degraded first_weekday={} error={}",
                first_weekday, err
            );
            return MonthGridResponse::empty("month grid unavailable");
        }
    };

    let (workouts, message) = match with_workout_service(|service| service.list_workouts()) {
        Ok(workouts) => (workouts, String::new()),
        Err(err) => (Vec::new(), format!("workout counts unavailable: {err}")),
    };
    let groups = group_by_day(&workouts, &offset);
    let cells = day_cells(&grid, &groups)
        .into_iter()
        .map(|cell| DayCellItem {
            year: cell.date.year(),
            month: cell.date.month(),
            day: cell.date.day(),
            in_month: cell.in_month,
            workout_count: u32::try_from(cell.workout_count).unwrap_or(u32::MAX),
        })
        .collect();

    MonthGridResponse {
        cells,
        weekday_symbols: weekday_symbols_inner(&calendar),
        message,
    }
}

/// Weekday header labels rotated to start at `first_weekday`.
///
/// # FFI contract
/// - Returns an empty list for invalid input.
#[flutter_rust_bridge::frb(sync)]
pub fn weekday_symbols(
    first_weekday: u8,
    locale_weekday_symbols: Option<Vec<String>>,
) -> Vec<String> {
    match calendar_config(first_weekday, locale_weekday_symbols) {
        Ok(calendar) => weekday_symbols_inner(&calendar),
        Err(message) => {
            warn!(
                "event=weekday_symbols module=ffi status=error first_weekday={} error={}",
                first_weekday, message
            );
            Vec::new()
        }
    }
}

fn calendar_config(
    first_weekday: u8,
    locale_weekday_symbols: Option<Vec<String>>,
) -> Result<CalendarConfig, String> {
    let calendar = CalendarConfig::new(first_weekday).map_err(|err| err.to_string())?;
    match locale_weekday_symbols {
        None => Ok(calendar),
        Some(symbols) => <[String; 7]>::try_from(symbols)
            .map(|symbols| calendar.with_weekday_symbols(symbols))
            .map_err(|symbols| format!("expected 7 weekday symbols, got {}", symbols.len())),
    }
}

/// Catalog row returned to the exercise picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,
    pub category: Option<String>,
}

/// Searches the exercise catalog.
///
/// # FFI contract
/// - Returns an empty list when the catalog is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_search(query: String, category: Option<String>) -> Vec<CatalogItem> {
    let state = app_state();
    lock_catalog(state)
        .search(query.as_str(), category.as_deref())
        .into_iter()
        .map(|entry| CatalogItem {
            name: entry.name,
            category: entry.category,
        })
        .collect()
}

/// Category labels for the picker, starting with `All`.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_categories() -> Vec<String> {
    picker_labels().into_iter().map(str::to_string).collect()
}

/// Generic action response envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Created record ID, when the action creates one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Adds a user-typed exercise name to the catalog ("use custom name").
///
/// Existing names are kept unchanged; the call still succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn catalog_insert_custom(name: String, category: Option<String>) -> ActionResponse {
    if name.trim().is_empty() {
        return ActionResponse::failure("Exercise name is empty.");
    }
    let state = app_state();
    let catalog = lock_catalog(state);
    if !catalog.is_ready() {
        return ActionResponse::failure("Exercise catalog unavailable.");
    }
    if catalog.insert_custom(name.as_str(), category.as_deref()) {
        ActionResponse::success("Exercise added.", None)
    } else {
        ActionResponse::success("Exercise already in catalog.", None)
    }
}

/// Workout summary for the flat list view.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutItem {
    pub id: String,
    pub performed_at_ms: i64,
    pub title: String,
    pub exercise_count: u32,
    pub set_count: u32,
    pub total_volume_kg: f64,
}

/// Workout list response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutListResponse {
    /// Newest first.
    pub items: Vec<WorkoutItem>,
    pub message: String,
}

/// Starts a workout at `performed_at_ms`; blank titles become `Workout`.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_start(performed_at_ms: i64, title: String) -> ActionResponse {
    match with_workout_service(|service| service.start_workout(performed_at_ms, title.as_str())) {
        Ok(workout) => ActionResponse::success("Workout started.", Some(workout.id.to_string())),
        Err(err) => ActionResponse::failure(format!("workout_start failed: {err}")),
    }
}

/// Lists all workouts newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_list() -> WorkoutListResponse {
    match with_workout_service(|service| service.list_workouts()) {
        Ok(workouts) => {
            let items = workouts.iter().map(to_workout_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No workouts.".to_string()
            } else {
                format!("Found {} workout(s).", items.len())
            };
            WorkoutListResponse { items, message }
        }
        Err(err) => WorkoutListResponse {
            items: Vec::new(),
            message: format!("workout_list failed: {err}"),
        },
    }
}

/// Appends an exercise to a workout.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_log_exercise(
    workout_id: String,
    name: String,
    muscle_group: Option<String>,
) -> ActionResponse {
    let workout_id = match parse_id(&workout_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| {
        service.log_exercise(workout_id, name.as_str(), muscle_group.as_deref())
    }) {
        Ok((exercise_id, _)) => {
            ActionResponse::success("Exercise logged.", Some(exercise_id.to_string()))
        }
        Err(err) => ActionResponse::failure(format!("workout_log_exercise failed: {err}")),
    }
}

/// Appends a weighted set to an exercise entry.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_log_set(exercise_id: String, weight_kg: f64, reps: u32) -> ActionResponse {
    let exercise_id = match parse_id(&exercise_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.log_set(exercise_id, weight_kg, reps)) {
        Ok(set_id) => ActionResponse::success("Set logged.", Some(set_id.to_string())),
        Err(err) => ActionResponse::failure(format!("workout_log_set failed: {err}")),
    }
}

/// Deletes a workout with all of its exercises and sets.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_delete(workout_id: String) -> ActionResponse {
    let workout_id = match parse_id(&workout_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.delete_workout(workout_id)) {
        Ok(()) => ActionResponse::success("Workout deleted.", None),
        Err(err) => ActionResponse::failure(format!("workout_delete failed: {err}")),
    }
}

/// Logged set inside a workout detail.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSetItem {
    pub id: String,
    pub weight_kg: f64,
    pub reps: u32,
}

/// Exercise entry with its sets in logging order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntryItem {
    pub id: String,
    pub name: String,
    pub muscle_group: Option<String>,
    pub sets: Vec<WorkoutSetItem>,
}

/// Full workout tree for the detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    pub id: String,
    pub performed_at_ms: i64,
    pub title: String,
    pub exercises: Vec<ExerciseEntryItem>,
}

/// Workout detail response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetailResponse {
    pub ok: bool,
    pub workout: Option<WorkoutDetail>,
    pub message: String,
}

impl WorkoutDetailResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            workout: None,
            message: message.into(),
        }
    }
}

/// Loads one workout with all exercises and sets.
///
/// # FFI contract
/// - Unknown ids yield `ok=false` with a not-found message.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_get(workout_id: String) -> WorkoutDetailResponse {
    let workout_id = match parse_id(&workout_id) {
        Ok(id) => id,
        Err(message) => return WorkoutDetailResponse::failure(message),
    };
    match with_workout_service(|service| service.get_workout(workout_id)) {
        Ok(Some(workout)) => WorkoutDetailResponse {
            ok: true,
            workout: Some(to_workout_detail(&workout)),
            message: String::new(),
        },
        Ok(None) => WorkoutDetailResponse::failure(format!("workout not found: {workout_id}")),
        Err(err) => WorkoutDetailResponse::failure(format!("workout_get failed: {err}")),
    }
}

/// Lists the workouts performed on one local calendar day, newest first.
///
/// `utc_offset_minutes` is the device offset used to resolve the local day.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_list_for_day(
    year: i32,
    month: u32,
    day: u32,
    utc_offset_minutes: i32,
) -> WorkoutListResponse {
    let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
        return WorkoutListResponse {
            items: Vec::new(),
            message: format!("invalid date {year}-{month}-{day}"),
        };
    };
    let Some(offset) = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60)) else {
        return WorkoutListResponse {
            items: Vec::new(),
            message: format!("invalid utc offset {utc_offset_minutes}"),
        };
    };
    match with_workout_service(|service| service.workouts_by_day(&offset)) {
        Ok(mut by_day) => {
            let items = by_day
                .remove(&date)
                .unwrap_or_default()
                .iter()
                .map(to_workout_item)
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No workouts on this day.".to_string()
            } else {
                format!("Found {} workout(s).", items.len())
            };
            WorkoutListResponse { items, message }
        }
        Err(err) => WorkoutListResponse {
            items: Vec::new(),
            message: format!("workout_list_for_day failed: {err}"),
        },
    }
}

/// Renames a workout; blank titles become `Workout`.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_rename(workout_id: String, title: String) -> ActionResponse {
    let workout_id = match parse_id(&workout_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.rename_workout(workout_id, title.as_str())) {
        Ok(workout) => ActionResponse::success("Workout renamed.", Some(workout.id.to_string())),
        Err(err) => ActionResponse::failure(format!("workout_rename failed: {err}")),
    }
}

/// Deletes an exercise entry with all of its sets.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_delete_exercise(exercise_id: String) -> ActionResponse {
    let exercise_id = match parse_id(&exercise_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.delete_exercise(exercise_id)) {
        Ok(()) => ActionResponse::success("Exercise deleted.", None),
        Err(err) => ActionResponse::failure(format!("workout_delete_exercise failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn workout_delete_set(set_id: String) -> ActionResponse {
    let set_id = match parse_id(&set_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.delete_set(set_id)) {
        Ok(()) => ActionResponse::success("Set deleted.", None),
        Err(err) => ActionResponse::failure(format!("workout_delete_set failed: {err}")),
    }
}

/// Saves edited weight and reps of a logged set.
///
/// # FFI contract
/// - Negative or non-finite weights are rejected and the set is unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn workout_update_set(set_id: String, weight_kg: f64, reps: u32) -> ActionResponse {
    let set_id = match parse_id(&set_id) {
        Ok(id) => id,
        Err(message) => return ActionResponse::failure(message),
    };
    match with_workout_service(|service| service.update_set(set_id, weight_kg, reps)) {
        Ok(()) => ActionResponse::success("Set updated.", Some(set_id.to_string())),
        Err(err) => ActionResponse::failure(format!("workout_update_set failed: {err}")),
    }
}

fn app_state() -> &'static AppState {
    APP_STATE.get_or_init(|| AppState::new(resolve_default_paths()))
}

fn resolve_default_paths() -> AppPaths {
    if let Ok(raw) = std::env::var(DATA_DIR_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return AppPaths::new(trimmed);
        }
    }
    warn!("event=app_init module=ffi status=fallback reason=init_app_not_called");
    AppPaths::platform_default()
}

fn lock_catalog(state: &AppState) -> std::sync::MutexGuard<'_, ExerciseCatalogStore> {
    state
        .catalog
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn with_workout_service<T>(
    f: impl FnOnce(&mut WorkoutService<SqliteWorkoutRepository<'_>>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = app_state().paths.workout_db();
    let mut conn = open_db(&db_path, DbSchema::WorkoutLog)
        .map_err(|err| format!("workout DB open failed: {err}"))?;
    let repo = SqliteWorkoutRepository::try_new(&mut conn)
        .map_err(|err| format!("workout repo init failed: {err}"))?;
    let mut service = WorkoutService::new(repo);
    f(&mut service).map_err(|err| err.to_string())
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{}`", value.trim()))
}

fn to_workout_item(workout: &Workout) -> WorkoutItem {
    WorkoutItem {
        id: workout.id.to_string(),
        performed_at_ms: workout.performed_at,
        title: workout.title.clone(),
        exercise_count: u32::try_from(workout.exercises.len()).unwrap_or(u32::MAX),
        set_count: u32::try_from(workout.set_count()).unwrap_or(u32::MAX),
        total_volume_kg: workout.total_volume_kg(),
    }
}

fn to_workout_detail(workout: &Workout) -> WorkoutDetail {
    WorkoutDetail {
        id: workout.id.to_string(),
        performed_at_ms: workout.performed_at,
        title: workout.title.clone(),
        exercises: workout
            .exercises
            .iter()
            .map(|entry| ExerciseEntryItem {
                id: entry.id.to_string(),
                name: entry.name.clone(),
                muscle_group: entry.muscle_group.clone(),
                sets: entry
                    .sets
                    .iter()
                    .map(|set| WorkoutSetItem {
                        id: set.id.to_string(),
                        weight_kg: set.weight_kg,
                        reps: set.reps,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        catalog_categories, catalog_insert_custom, catalog_search, core_version, init_app,
        init_logging, month_grid, ping, weekday_symbols, workout_delete, workout_delete_exercise,
        workout_delete_set, workout_get, workout_list, workout_list_for_day, workout_log_exercise,
        workout_log_set, workout_rename, workout_start, workout_update_set,
    };
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn test_data_dir() -> PathBuf {
        std::env::temp_dir().join(format!("fitlog-ffi-test-{}", std::process::id()))
    }

    fn ensure_app() {
        let message = init_app(test_data_dir().to_string_lossy().into_owned());
        assert!(message.is_empty(), "{message}");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_app_is_idempotent_and_rejects_switching_dirs() {
        ensure_app();
        ensure_app();
        let error = init_app(
            std::env::temp_dir()
                .join("fitlog-ffi-other")
                .to_string_lossy()
                .into_owned(),
        );
        assert!(error.contains("refusing to switch"));
        assert!(!init_app("  ".to_string()).is_empty());
    }

    #[test]
    fn catalog_search_returns_seeded_entries() {
        ensure_app();
        let results = catalog_search("bench".to_string(), Some("All".to_string()));
        assert!(results.iter().any(|item| item.name == "Bench Press"
            && item.category.as_deref() == Some("Chest")));
        assert!(catalog_search("xyz123".to_string(), None).is_empty());
    }

    #[test]
    fn catalog_insert_custom_is_findable_and_blank_names_fail() {
        ensure_app();
        let name = unique_token("Custom Lift");
        let response = catalog_insert_custom(name.clone(), Some("Arms".to_string()));
        assert!(response.ok, "{}", response.message);

        let again = catalog_insert_custom(name.clone(), Some("Legs".to_string()));
        assert!(again.ok);
        assert_eq!(again.message, "Exercise already in catalog.");

        let results = catalog_search(name.clone(), None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category.as_deref(), Some("Arms"));

        assert!(!catalog_insert_custom("  ".to_string(), None).ok);
    }

    #[test]
    fn catalog_categories_start_with_all() {
        let categories = catalog_categories();
        assert_eq!(categories.first().map(String::as_str), Some("All"));
        assert!(categories.iter().any(|label| label == "Full Body"));
    }

    #[test]
    fn workout_flow_logs_children_and_counts_in_grid() {
        ensure_app();
        // 1999-01-15T12:00:00Z, a month no other test writes to.
        let performed_at_ms = 916_401_600_000;
        let started = workout_start(performed_at_ms, String::new());
        assert!(started.ok, "{}", started.message);
        let workout_id = started.id.expect("workout_start should return id");

        let exercise = workout_log_exercise(workout_id.clone(), "Squat".to_string(), None);
        assert!(exercise.ok, "{}", exercise.message);
        let exercise_id = exercise.id.expect("exercise should return id");
        assert!(workout_log_set(exercise_id.clone(), 100.0, 5).ok);
        assert!(!workout_log_set(exercise_id, -1.0, 5).ok);

        let listed = workout_list();
        let item = listed
            .items
            .iter()
            .find(|item| item.id == workout_id)
            .expect("started workout should be listed");
        assert_eq!(item.title, "Workout");
        assert_eq!(item.exercise_count, 1);
        assert_eq!(item.set_count, 1);

        let grid = month_grid(1999, 1, 2, None, 0);
        assert_eq!(grid.cells.len() % 7, 0);
        assert_eq!(grid.weekday_symbols[0], "M");
        let jan_15 = grid
            .cells
            .iter()
            .find(|cell| cell.in_month && cell.day == 15)
            .unwrap();
        assert!(jan_15.workout_count >= 1);

        assert!(workout_delete(workout_id.clone()).ok);
        assert!(!workout_delete(workout_id).ok);
    }

    #[test]
    fn month_grid_rejects_invalid_input() {
        assert!(month_grid(2024, 13, 1, None, 0).cells.is_empty());
        assert!(month_grid(2024, 5, 0, None, 0).cells.is_empty());
        let short_symbols = month_grid(2024, 5, 1, Some(vec!["S".to_string()]), 0);
        assert!(short_symbols.cells.is_empty());
        assert!(short_symbols.message.contains("7 weekday symbols"));
    }

    #[test]
    fn workout_calls_reject_malformed_ids() {
        let response = workout_log_set("not-a-uuid".to_string(), 10.0, 1);
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix} {nanos}")
    }

    #[test]
    fn weekday_symbols_rotates_for_monday_first() {
        let symbols = weekday_symbols(2, None);
        assert_eq!(symbols, vec!["M", "T", "W", "T", "F", "S", "S"]);
        assert!(weekday_symbols(0, None).is_empty());
        assert!(weekday_symbols(1, Some(vec!["S".to_string()])).is_empty());
    }

    fn start_workout_with_set(performed_at_ms: i64) -> (String, String, String) {
        ensure_app();
        let started = workout_start(performed_at_ms, "Detail".to_string());
        assert!(started.ok, "{}", started.message);
        let workout_id = started.id.expect("workout_start should return id");
        let exercise = workout_log_exercise(
            workout_id.clone(),
            "Bench Press".to_string(),
            Some("Chest".to_string()),
        );
        let exercise_id = exercise.id.expect("exercise should return id");
        let set = workout_log_set(exercise_id.clone(), 60.0, 10);
        let set_id = set.id.expect("set should return id");
        (workout_id, exercise_id, set_id)
    }

    #[test]
    fn workout_get_returns_full_tree_and_rejects_unknown_ids() {
        // 1998-03-02T09:00:00Z
        let (workout_id, exercise_id, set_id) = start_workout_with_set(888_829_200_000);

        let detail = workout_get(workout_id.clone());
        assert!(detail.ok, "{}", detail.message);
        let workout = detail.workout.expect("detail should carry workout");
        assert_eq!(workout.title, "Detail");
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.exercises[0].id, exercise_id);
        assert_eq!(workout.exercises[0].muscle_group.as_deref(), Some("Chest"));
        assert_eq!(workout.exercises[0].sets[0].id, set_id);
        assert_eq!(workout.exercises[0].sets[0].reps, 10);

        let missing = workout_get(uuid::Uuid::new_v4().to_string());
        assert!(!missing.ok);
        assert!(missing.workout.is_none());
        assert!(missing.message.contains("not found"));
        assert!(!workout_get("bogus".to_string()).ok);
    }

    #[test]
    fn workout_rename_updates_title_and_blank_falls_back() {
        // 1998-04-06T09:00:00Z
        let (workout_id, _, _) = start_workout_with_set(891_853_200_000);

        assert!(workout_rename(workout_id.clone(), " Chest day ".to_string()).ok);
        let detail = workout_get(workout_id.clone()).workout.unwrap();
        assert_eq!(detail.title, "Chest day");

        assert!(workout_rename(workout_id.clone(), "   ".to_string()).ok);
        assert_eq!(workout_get(workout_id).workout.unwrap().title, "Workout");
        assert!(!workout_rename(uuid::Uuid::new_v4().to_string(), "x".to_string()).ok);
    }

    #[test]
    fn workout_update_set_edits_in_place_and_validates() {
        // 1998-05-04T09:00:00Z
        let (workout_id, _, set_id) = start_workout_with_set(894_272_400_000);

        let updated = workout_update_set(set_id.clone(), 62.5, 8);
        assert!(updated.ok, "{}", updated.message);
        let set = &workout_get(workout_id.clone()).workout.unwrap().exercises[0].sets[0];
        assert_eq!((set.weight_kg, set.reps), (62.5, 8));

        assert!(!workout_update_set(set_id, f64::NAN, 8).ok);
        let set = &workout_get(workout_id).workout.unwrap().exercises[0].sets[0];
        assert_eq!(set.weight_kg, 62.5);
        assert!(!workout_update_set(uuid::Uuid::new_v4().to_string(), 1.0, 1).ok);
    }

    #[test]
    fn workout_delete_set_and_exercise_remove_children() {
        // 1998-06-01T09:00:00Z
        let (workout_id, exercise_id, set_id) = start_workout_with_set(896_691_600_000);

        assert!(workout_delete_set(set_id.clone()).ok);
        assert!(!workout_delete_set(set_id).ok);
        let detail = workout_get(workout_id.clone()).workout.unwrap();
        assert!(detail.exercises[0].sets.is_empty());

        assert!(workout_delete_exercise(exercise_id.clone()).ok);
        assert!(!workout_delete_exercise(exercise_id).ok);
        assert!(workout_get(workout_id).workout.unwrap().exercises.is_empty());
    }

    #[test]
    fn workout_list_for_day_uses_local_offset() {
        // 1998-07-05T23:30:00Z, already July 6th at UTC+2.
        let (workout_id, _, _) = start_workout_with_set(899_681_400_000);

        let utc_day = workout_list_for_day(1998, 7, 5, 0);
        assert!(utc_day.items.iter().any(|item| item.id == workout_id));
        let local_day = workout_list_for_day(1998, 7, 6, 120);
        assert!(local_day.items.iter().any(|item| item.id == workout_id));
        let wrong_day = workout_list_for_day(1998, 7, 5, 120);
        assert!(wrong_day.items.iter().all(|item| item.id != workout_id));

        let invalid = workout_list_for_day(1998, 2, 30, 0);
        assert!(invalid.items.is_empty());
        assert!(invalid.message.contains("invalid date"));
    }
}
