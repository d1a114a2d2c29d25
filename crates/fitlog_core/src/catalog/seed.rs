//! Built-in catalog entries inserted into an empty store.

use crate::model::catalog::ExerciseCategory;

pub const DEFAULT_CATALOG: [(&str, ExerciseCategory); 15] = [
    ("Bench Press", ExerciseCategory::Chest),
    ("Incline Dumbbell Press", ExerciseCategory::Chest),
    ("Push-Up", ExerciseCategory::Chest),
    ("Overhead Press", ExerciseCategory::Shoulders),
    ("Lateral Raise", ExerciseCategory::Shoulders),
    ("Pull-Up", ExerciseCategory::Back),
    ("Lat Pulldown", ExerciseCategory::Back),
    ("Barbell Row", ExerciseCategory::Back),
    ("Deadlift", ExerciseCategory::Back),
    ("Squat", ExerciseCategory::Legs),
    ("Leg Press", ExerciseCategory::Legs),
    ("Romanian Deadlift", ExerciseCategory::Legs),
    ("Biceps Curl", ExerciseCategory::Arms),
    ("Triceps Pushdown", ExerciseCategory::Arms),
    ("Plank", ExerciseCategory::Core),
];
