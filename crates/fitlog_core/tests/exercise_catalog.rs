use fitlog_core::{CatalogEntry, ExerciseCatalogStore};
use rusqlite::Connection;

fn opened_store() -> ExerciseCatalogStore {
    let mut store = ExerciseCatalogStore::in_memory();
    assert!(store.open());
    store
}

fn names(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.name.as_str()).collect()
}

#[test]
fn open_seeds_fifteen_default_entries() {
    let store = opened_store();
    let all = store.search("", None);
    assert_eq!(all.len(), 15);
    assert!(all.iter().all(|entry| entry.category.is_some()));
}

#[test]
fn open_twice_does_not_seed_twice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exercises.sqlite");

    let mut store = ExerciseCatalogStore::new(&path);
    assert!(store.open());
    assert!(store.open());
    assert_eq!(store.search("", Some("All")).len(), 15);
    drop(store);

    let mut reopened = ExerciseCatalogStore::new(&path);
    assert!(reopened.open());
    assert_eq!(reopened.search("", None).len(), 15);

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM exercises;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 15);
}

#[test]
fn search_is_case_insensitive_substring_match() {
    let store = opened_store();
    assert_eq!(
        store.search("bench", Some("All")),
        vec![CatalogEntry::new("Bench Press", Some("Chest"))]
    );
    assert_eq!(
        names(&store.search("  DEADLIFT ", None)),
        vec!["Deadlift", "Romanian Deadlift"]
    );
}

#[test]
fn search_filters_by_exact_category_in_name_order() {
    let store = opened_store();
    assert_eq!(
        names(&store.search("", Some("Legs"))),
        vec!["Leg Press", "Romanian Deadlift", "Squat"]
    );
    assert!(store.search("", Some("legs")).is_empty());
    assert!(store.search("bench", Some("Back")).is_empty());
}

#[test]
fn search_without_match_returns_empty() {
    let store = opened_store();
    assert!(store.search("xyz123", Some("All")).is_empty());
}

#[test]
fn search_treats_like_wildcards_literally() {
    let store = opened_store();
    assert!(store.search("%", None).is_empty());
    assert!(store.search("_", None).is_empty());

    store.insert_custom("50% Squat", Some("Legs"));
    assert_eq!(names(&store.search("50%", None)), vec!["50% Squat"]);
}

#[test]
fn search_is_capped_at_two_hundred_rows() {
    let store = opened_store();
    for index in 0..250 {
        store.insert_custom(&format!("Drill {index:03}"), Some("Other"));
    }
    let results = store.search("drill", None);
    assert_eq!(results.len(), 200);
    assert_eq!(results[0].name, "Drill 000");
    assert_eq!(results[199].name, "Drill 199");
}

#[test]
fn insert_custom_uniqueness_is_case_sensitive_and_existing_row_wins() {
    let store = opened_store();

    assert!(!store.insert_custom("Squat", Some("Legs")));
    assert!(store.insert_custom("squat", Some("Legs")));
    assert!(!store.insert_custom("Squat", Some("Arms")));

    let squats = store.search("squat", None);
    assert_eq!(
        squats,
        vec![
            CatalogEntry::new("Squat", Some("Legs")),
            CatalogEntry::new("squat", Some("Legs")),
        ]
    );
    assert_eq!(store.search("", None).len(), 16);
}

#[test]
fn insert_custom_trims_name_and_ignores_blank() {
    let store = opened_store();

    assert!(!store.insert_custom("   ", Some("Core")));
    assert!(store.insert_custom("  Hanging Leg Raise  ", Some("Core")));
    assert_eq!(
        names(&store.search("", Some("Core"))),
        vec!["Hanging Leg Raise", "Plank"]
    );
}

#[test]
fn insert_custom_stores_all_sentinel_and_missing_category_as_null() {
    let store = opened_store();

    store.insert_custom("Sled Push", Some("All"));
    store.insert_custom("Turkish Get-Up", None);

    assert_eq!(
        store.search("sled", None),
        vec![CatalogEntry::new("Sled Push", None)]
    );
    assert_eq!(
        store.search("turkish", None),
        vec![CatalogEntry::new("Turkish Get-Up", None)]
    );
}

#[test]
fn closed_store_returns_empty_and_ignores_inserts() {
    let store = ExerciseCatalogStore::in_memory();
    assert!(!store.is_ready());
    assert!(store.search("", None).is_empty());
    assert!(!store.insert_custom("Bench Press", Some("Chest")));
}

#[test]
fn failed_open_leaves_store_not_ready_without_retry() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    std::fs::write(&blocker, b"file").unwrap();

    let mut store = ExerciseCatalogStore::new(blocker.join("exercises.sqlite"));
    assert!(!store.open());
    assert!(!store.is_ready());

    std::fs::remove_file(&blocker).unwrap();
    assert!(!store.open());
    assert!(store.search("", None).is_empty());
    assert!(!store.insert_custom("Bench Press", None));
}

#[test]
fn query_failure_on_open_store_degrades_to_empty_and_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exercises.sqlite");
    let mut store = ExerciseCatalogStore::new(&path);
    assert!(store.open());

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("DROP TABLE exercises;").unwrap();

    assert!(store.is_ready());
    assert!(store.search("bench", None).is_empty());
    assert!(!store.insert_custom("Hip Thrust", Some("Legs")));
}
