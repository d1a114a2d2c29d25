//! Workout log domain model.
//!
//! # Responsibility
//! - Define workouts, their exercise entries and weighted repetition sets.
//! - Validate values before they reach persistence.
//!
//! # Invariants
//! - IDs are never nil.
//! - Exercise names are trimmed and non-empty.
//! - Set weight is finite and `>= 0`.
//! - Child order is the order of the owning `Vec`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type WorkoutId = Uuid;
pub type ExerciseEntryId = Uuid;
pub type WorkoutSetId = Uuid;

/// Title used when a workout is started without one.
pub const DEFAULT_WORKOUT_TITLE: &str = "Workout";

#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutValidationError {
    NilId,
    EmptyExerciseName,
    InvalidWeight(f64),
}

impl Display for WorkoutValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "id must not be nil"),
            Self::EmptyExerciseName => write!(f, "exercise name must not be empty"),
            Self::InvalidWeight(value) => {
                write!(f, "weight_kg ({value}) must be a finite value >= 0")
            }
        }
    }
}

impl Error for WorkoutValidationError {}

/// One workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: WorkoutId,
    /// Unix epoch milliseconds.
    pub performed_at: i64,
    pub title: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl Workout {
    /// Creates an empty workout; a blank title becomes [`DEFAULT_WORKOUT_TITLE`].
    pub fn new(performed_at: i64, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            performed_at,
            title: normalize_title(&title.into()),
            exercises: Vec::new(),
        }
    }

    /// Validates this workout and all owned children.
    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if self.id.is_nil() {
            return Err(WorkoutValidationError::NilId);
        }
        self.exercises.iter().try_for_each(ExerciseEntry::validate)
    }

    /// Total number of sets across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|exercise| exercise.sets.len()).sum()
    }

    /// Sum of `weight_kg * reps` across all sets.
    pub fn total_volume_kg(&self) -> f64 {
        self.exercises.iter().map(ExerciseEntry::volume_kg).sum()
    }
}

/// One exercise performed within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: ExerciseEntryId,
    pub name: String,
    pub muscle_group: Option<String>,
    pub sets: Vec<WorkoutSet>,
}

impl ExerciseEntry {
    /// Creates an entry with a trimmed name and no sets.
    ///
    /// A blank `muscle_group` is stored as `None`.
    pub fn new(name: &str, muscle_group: Option<&str>) -> Result<Self, WorkoutValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkoutValidationError::EmptyExerciseName);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            muscle_group: muscle_group
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            sets: Vec::new(),
        })
    }

    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if self.id.is_nil() {
            return Err(WorkoutValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(WorkoutValidationError::EmptyExerciseName);
        }
        self.sets.iter().try_for_each(WorkoutSet::validate)
    }

    pub fn volume_kg(&self) -> f64 {
        self.sets.iter().map(WorkoutSet::volume_kg).sum()
    }
}

/// One weighted repetition set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: WorkoutSetId,
    pub weight_kg: f64,
    pub reps: u32,
}

impl WorkoutSet {
    pub fn new(weight_kg: f64, reps: u32) -> Result<Self, WorkoutValidationError> {
        let set = Self {
            id: Uuid::new_v4(),
            weight_kg,
            reps,
        };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if self.id.is_nil() {
            return Err(WorkoutValidationError::NilId);
        }
        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(WorkoutValidationError::InvalidWeight(self.weight_kg));
        }
        Ok(())
    }

    pub fn volume_kg(&self) -> f64 {
        self.weight_kg * f64::from(self.reps)
    }
}

/// Trims a workout title, falling back to [`DEFAULT_WORKOUT_TITLE`] when blank.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        DEFAULT_WORKOUT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}
