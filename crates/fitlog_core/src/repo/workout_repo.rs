//! Workout log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist workouts with their owned exercise entries and sets.
//! - Perform cascading deletes explicitly, children first, in one transaction.
//!
//! # Invariants
//! - Workout listing is deterministic: `performed_at DESC, uuid ASC`.
//! - Children are returned in insertion order (`position ASC`).
//! - A read never returns a partially deleted workout.

use super::{RecordKind, RepoError, RepoResult};
use crate::db::migrations::latest_version;
use crate::db::DbSchema;
use crate::model::workout::{
    normalize_title, ExerciseEntry, ExerciseEntryId, Workout, WorkoutId, WorkoutSet, WorkoutSetId,
};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

const WORKOUT_SELECT_SQL: &str = "SELECT uuid, performed_at, title FROM workouts";

/// Repository interface for the workout log.
pub trait WorkoutRepository {
    /// Inserts a workout together with all of its children.
    fn create_workout(&mut self, workout: &Workout) -> RepoResult<WorkoutId>;
    /// Replaces the title; blank titles fall back to the default title.
    fn rename_workout(&self, id: WorkoutId, title: &str) -> RepoResult<()>;
    /// Appends an exercise entry (and its sets) to a workout.
    fn add_exercise(
        &mut self,
        workout_id: WorkoutId,
        entry: &ExerciseEntry,
    ) -> RepoResult<ExerciseEntryId>;
    /// Appends a set to an exercise entry.
    fn add_set(
        &mut self,
        exercise_id: ExerciseEntryId,
        set: &WorkoutSet,
    ) -> RepoResult<WorkoutSetId>;
    /// Overwrites weight and reps of an existing set in place.
    fn update_set(&self, set: &WorkoutSet) -> RepoResult<()>;
    fn get_workout(&self, id: WorkoutId) -> RepoResult<Option<Workout>>;
    /// Lists every workout, newest first, children fully loaded.
    fn list_workouts(&self) -> RepoResult<Vec<Workout>>;
    /// Deletes a workout with all of its exercises and sets.
    fn delete_workout(&mut self, id: WorkoutId) -> RepoResult<()>;
    /// Deletes an exercise entry with all of its sets.
    fn delete_exercise(&mut self, id: ExerciseEntryId) -> RepoResult<()>;
    fn delete_set(&self, id: WorkoutSetId) -> RepoResult<()>;
}

/// SQLite-backed workout repository.
pub struct SqliteWorkoutRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteWorkoutRepository<'conn> {
    /// Constructs a repository from a connection migrated to the latest
    /// workout-log schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        let expected_version = latest_version(DbSchema::WorkoutLog);
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    fn immediate_transaction(&mut self) -> RepoResult<Transaction<'_>> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}

impl WorkoutRepository for SqliteWorkoutRepository<'_> {
    fn create_workout(&mut self, workout: &Workout) -> RepoResult<WorkoutId> {
        workout.validate()?;

        let tx = self.immediate_transaction()?;
        tx.execute(
            "INSERT INTO workouts (uuid, performed_at, title) VALUES (?1, ?2, ?3);",
            params![
                workout.id.to_string(),
                workout.performed_at,
                normalize_title(&workout.title),
            ],
        )?;
        for (position, entry) in workout.exercises.iter().enumerate() {
            insert_exercise(&tx, workout.id, position as i64, entry)?;
        }
        tx.commit()?;

        Ok(workout.id)
    }

    fn rename_workout(&self, id: WorkoutId, title: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE workouts SET title = ?2 WHERE uuid = ?1;",
            params![id.to_string(), normalize_title(title)],
        )?;
        if changed == 0 {
            return Err(not_found(RecordKind::Workout, id));
        }
        Ok(())
    }

    fn add_exercise(
        &mut self,
        workout_id: WorkoutId,
        entry: &ExerciseEntry,
    ) -> RepoResult<ExerciseEntryId> {
        entry.validate()?;

        let tx = self.immediate_transaction()?;
        if !row_exists(&tx, "workouts", workout_id)? {
            return Err(not_found(RecordKind::Workout, workout_id));
        }
        let position = next_position(&tx, "workout_exercises", "workout_uuid", workout_id)?;
        insert_exercise(&tx, workout_id, position, entry)?;
        tx.commit()?;

        Ok(entry.id)
    }

    fn add_set(
        &mut self,
        exercise_id: ExerciseEntryId,
        set: &WorkoutSet,
    ) -> RepoResult<WorkoutSetId> {
        set.validate()?;

        let tx = self.immediate_transaction()?;
        if !row_exists(&tx, "workout_exercises", exercise_id)? {
            return Err(not_found(RecordKind::Exercise, exercise_id));
        }
        let position = next_position(&tx, "workout_sets", "exercise_uuid", exercise_id)?;
        insert_set(&tx, exercise_id, position, set)?;
        tx.commit()?;

        Ok(set.id)
    }

    fn update_set(&self, set: &WorkoutSet) -> RepoResult<()> {
        set.validate()?;

        let changed = self.conn.execute(
            "UPDATE workout_sets SET weight_kg = ?2, reps = ?3 WHERE uuid = ?1;",
            params![set.id.to_string(), set.weight_kg, i64::from(set.reps)],
        )?;
        if changed == 0 {
            return Err(not_found(RecordKind::Set, set.id));
        }
        Ok(())
    }

    fn get_workout(&self, id: WorkoutId) -> RepoResult<Option<Workout>> {
        let header = self
            .conn
            .query_row(
                &format!("{WORKOUT_SELECT_SQL} WHERE uuid = ?1;"),
                [id.to_string()],
                parse_workout_header,
            )
            .optional()?;

        match header {
            Some(header) => Ok(Some(load_children(self.conn, header?)?)),
            None => Ok(None),
        }
    }

    fn list_workouts(&self) -> RepoResult<Vec<Workout>> {
        let mut stmt = self.conn.prepare(&format!(
            "{WORKOUT_SELECT_SQL} ORDER BY performed_at DESC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut workouts = Vec::new();
        while let Some(row) = rows.next()? {
            let header = parse_workout_header(row)??;
            workouts.push(load_children(self.conn, header)?);
        }
        Ok(workouts)
    }

    fn delete_workout(&mut self, id: WorkoutId) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self.immediate_transaction()?;
        tx.execute(
            "DELETE FROM workout_sets
             WHERE exercise_uuid IN (
                SELECT uuid FROM workout_exercises WHERE workout_uuid = ?1
             );",
            [id_text.as_str()],
        )?;
        tx.execute(
            "DELETE FROM workout_exercises WHERE workout_uuid = ?1;",
            [id_text.as_str()],
        )?;
        let changed = tx.execute("DELETE FROM workouts WHERE uuid = ?1;", [id_text.as_str()])?;
        if changed == 0 {
            return Err(not_found(RecordKind::Workout, id));
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_exercise(&mut self, id: ExerciseEntryId) -> RepoResult<()> {
        let id_text = id.to_string();
        let tx = self.immediate_transaction()?;
        tx.execute(
            "DELETE FROM workout_sets WHERE exercise_uuid = ?1;",
            [id_text.as_str()],
        )?;
        let changed = tx.execute(
            "DELETE FROM workout_exercises WHERE uuid = ?1;",
            [id_text.as_str()],
        )?;
        if changed == 0 {
            return Err(not_found(RecordKind::Exercise, id));
        }
        tx.commit()?;
        Ok(())
    }

    fn delete_set(&self, id: WorkoutSetId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM workout_sets WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(not_found(RecordKind::Set, id));
        }
        Ok(())
    }
}

fn insert_exercise(
    tx: &Transaction<'_>,
    workout_id: WorkoutId,
    position: i64,
    entry: &ExerciseEntry,
) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO workout_exercises (uuid, workout_uuid, position, name, muscle_group)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            entry.id.to_string(),
            workout_id.to_string(),
            position,
            entry.name.trim(),
            entry.muscle_group.as_deref(),
        ],
    )?;
    for (set_position, set) in entry.sets.iter().enumerate() {
        insert_set(tx, entry.id, set_position as i64, set)?;
    }
    Ok(())
}

fn insert_set(
    tx: &Transaction<'_>,
    exercise_id: ExerciseEntryId,
    position: i64,
    set: &WorkoutSet,
) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO workout_sets (uuid, exercise_uuid, position, weight_kg, reps)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            set.id.to_string(),
            exercise_id.to_string(),
            position,
            set.weight_kg,
            i64::from(set.reps),
        ],
    )?;
    Ok(())
}

/// Workout row without children; inner result carries decode failures.
type WorkoutHeader = RepoResult<Workout>;

fn parse_workout_header(row: &Row<'_>) -> rusqlite::Result<WorkoutHeader> {
    let uuid_text: String = row.get("uuid")?;
    let performed_at: i64 = row.get("performed_at")?;
    let title: String = row.get("title")?;
    Ok(parse_uuid(&uuid_text, "workouts.uuid").map(|id| Workout {
        id,
        performed_at,
        title,
        exercises: Vec::new(),
    }))
}

fn load_children(conn: &Connection, mut workout: Workout) -> RepoResult<Workout> {
    let mut stmt = conn.prepare(
        "SELECT uuid, name, muscle_group
         FROM workout_exercises
         WHERE workout_uuid = ?1
         ORDER BY position ASC, uuid ASC;",
    )?;
    let mut rows = stmt.query([workout.id.to_string()])?;
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let id = parse_uuid(&uuid_text, "workout_exercises.uuid")?;
        let sets = load_sets(conn, &uuid_text)?;
        workout.exercises.push(ExerciseEntry {
            id,
            name: row.get("name")?,
            muscle_group: row.get("muscle_group")?,
            sets,
        });
    }
    Ok(workout)
}

fn load_sets(conn: &Connection, exercise_uuid: &str) -> RepoResult<Vec<WorkoutSet>> {
    let mut stmt = conn.prepare(
        "SELECT uuid, weight_kg, reps
         FROM workout_sets
         WHERE exercise_uuid = ?1
         ORDER BY position ASC, uuid ASC;",
    )?;
    let mut rows = stmt.query([exercise_uuid])?;
    let mut sets = Vec::new();
    while let Some(row) = rows.next()? {
        let uuid_text: String = row.get("uuid")?;
        let reps_raw: i64 = row.get("reps")?;
        let reps = u32::try_from(reps_raw).map_err(|_| {
            RepoError::InvalidData(format!("invalid reps value `{reps_raw}` in workout_sets.reps"))
        })?;
        sets.push(WorkoutSet {
            id: parse_uuid(&uuid_text, "workout_sets.uuid")?,
            weight_kg: row.get("weight_kg")?,
            reps,
        });
    }
    Ok(sets)
}

fn row_exists(tx: &Transaction<'_>, table: &str, id: Uuid) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE uuid = ?1);"),
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn next_position(
    tx: &Transaction<'_>,
    table: &str,
    parent_column: &str,
    parent_id: Uuid,
) -> RepoResult<i64> {
    let position: i64 = tx.query_row(
        &format!("SELECT COALESCE(MAX(position) + 1, 0) FROM {table} WHERE {parent_column} = ?1;"),
        [parent_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(position)
}

fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn not_found(kind: RecordKind, id: Uuid) -> RepoError {
    RepoError::NotFound { kind, id }
}
