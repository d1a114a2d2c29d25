use fitlog_core::db::migrations::latest_version;
use fitlog_core::db::{open_db, open_db_in_memory, DbError, DbSchema};
use rusqlite::Connection;

#[test]
fn open_catalog_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(DbSchema::Catalog).unwrap();

    assert_eq!(schema_version(&conn), latest_version(DbSchema::Catalog));
    assert_table_exists(&conn, "exercises");
}

#[test]
fn open_workout_log_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(DbSchema::WorkoutLog).unwrap();

    assert_eq!(schema_version(&conn), latest_version(DbSchema::WorkoutLog));
    assert_table_exists(&conn, "workouts");
    assert_table_exists(&conn, "workout_exercises");
    assert_table_exists(&conn, "workout_sets");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workouts.sqlite");

    let conn_first = open_db(&path, DbSchema::WorkoutLog).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version(DbSchema::WorkoutLog));
    drop(conn_first);

    let conn_second = open_db(&path, DbSchema::WorkoutLog).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version(DbSchema::WorkoutLog));
    assert_table_exists(&conn_second, "workouts");
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("exercises.sqlite");

    let conn = open_db(&path, DbSchema::Catalog).unwrap();
    assert_table_exists(&conn, "exercises");
    assert!(path.exists());
}

#[test]
fn catalog_migration_adopts_unversioned_existing_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exercises.sqlite");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                category TEXT
            );
            INSERT INTO exercises (name, category) VALUES ('Farmer Carry', NULL);",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path, DbSchema::Catalog).unwrap();
    assert_eq!(schema_version(&conn), latest_version(DbSchema::Catalog));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM exercises;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, DbSchema::Catalog).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            schema,
            db_version,
            latest_supported,
        } => {
            assert_eq!(schema, DbSchema::Catalog);
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(DbSchema::Catalog));
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
