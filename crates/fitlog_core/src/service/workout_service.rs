//! Workout log use-case service.
//!
//! # Responsibility
//! - Start workouts, log exercises and sets, and remove them again.
//! - Provide the flat list and the per-day grouping used by the calendar.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Workout-level mutations return the freshly read-back workout.

use crate::calendar::day_groups::group_by_day;
use crate::model::workout::{
    ExerciseEntry, ExerciseEntryId, Workout, WorkoutId, WorkoutSet, WorkoutSetId,
};
use crate::repo::workout_repo::WorkoutRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::{NaiveDate, TimeZone};
use log::info;
use std::collections::BTreeMap;

/// Use-case service wrapper for the workout log.
pub struct WorkoutService<R: WorkoutRepository> {
    repo: R,
}

impl<R: WorkoutRepository> WorkoutService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Starts an empty workout at `performed_at` (epoch ms).
    ///
    /// A blank title becomes `"Workout"`.
    pub fn start_workout(&mut self, performed_at: i64, title: &str) -> RepoResult<Workout> {
        let workout = Workout::new(performed_at, title);
        let id = self.repo.create_workout(&workout)?;
        info!("event=workout_start module=workout status=ok workout_id={id}");
        self.read_back(id)
    }

    pub fn rename_workout(&mut self, id: WorkoutId, title: &str) -> RepoResult<Workout> {
        self.repo.rename_workout(id, title)?;
        self.read_back(id)
    }

    /// Appends an exercise to a workout and returns the updated workout.
    pub fn log_exercise(
        &mut self,
        workout_id: WorkoutId,
        name: &str,
        muscle_group: Option<&str>,
    ) -> RepoResult<(ExerciseEntryId, Workout)> {
        let entry = ExerciseEntry::new(name, muscle_group)?;
        let entry_id = self.repo.add_exercise(workout_id, &entry)?;
        Ok((entry_id, self.read_back(workout_id)?))
    }

    /// Appends a weighted set to an exercise entry.
    pub fn log_set(
        &mut self,
        exercise_id: ExerciseEntryId,
        weight_kg: f64,
        reps: u32,
    ) -> RepoResult<WorkoutSetId> {
        let set = WorkoutSet::new(weight_kg, reps)?;
        self.repo.add_set(exercise_id, &set)
    }

    /// Edits a logged set in place with new weight and reps.
    pub fn update_set(
        &mut self,
        set_id: WorkoutSetId,
        weight_kg: f64,
        reps: u32,
    ) -> RepoResult<()> {
        let set = WorkoutSet {
            id: set_id,
            weight_kg,
            reps,
        };
        self.repo.update_set(&set)
    }

    pub fn get_workout(&self, id: WorkoutId) -> RepoResult<Option<Workout>> {
        self.repo.get_workout(id)
    }

    /// Flat list view: newest first.
    pub fn list_workouts(&self) -> RepoResult<Vec<Workout>> {
        self.repo.list_workouts()
    }

    /// Workouts grouped by local day in `tz`, each day newest first.
    pub fn workouts_by_day<Tz: TimeZone>(
        &self,
        tz: &Tz,
    ) -> RepoResult<BTreeMap<NaiveDate, Vec<Workout>>> {
        let workouts = self.repo.list_workouts()?;
        let grouped = group_by_day(&workouts, tz)
            .into_iter()
            .map(|(day, bucket)| (day, bucket.into_iter().cloned().collect()))
            .collect();
        Ok(grouped)
    }

    /// Deletes a workout with every exercise and set it owns.
    pub fn delete_workout(&mut self, id: WorkoutId) -> RepoResult<()> {
        self.repo.delete_workout(id)?;
        info!("event=workout_delete module=workout status=ok workout_id={id}");
        Ok(())
    }

    pub fn delete_exercise(&mut self, id: ExerciseEntryId) -> RepoResult<()> {
        self.repo.delete_exercise(id)
    }

    pub fn delete_set(&mut self, id: WorkoutSetId) -> RepoResult<()> {
        self.repo.delete_set(id)
    }

    fn read_back(&self, id: WorkoutId) -> RepoResult<Workout> {
        self.repo.get_workout(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("workout {id} missing in read-back"))
        })
    }
}
