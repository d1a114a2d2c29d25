use fitlog_core::{ExerciseEntry, Workout, WorkoutSet, WorkoutValidationError};
use uuid::Uuid;

#[test]
fn workout_new_sets_defaults() {
    let workout = Workout::new(1_700_000_000_000, "  Leg day ");

    assert!(!workout.id.is_nil());
    assert_eq!(workout.title, "Leg day");
    assert!(workout.exercises.is_empty());
    assert_eq!(workout.set_count(), 0);
    assert_eq!(Workout::new(0, "").title, "Workout");
}

#[test]
fn exercise_entry_trims_name_and_drops_blank_muscle_group() {
    let entry = ExerciseEntry::new("  Pull-Up ", Some(" ")).unwrap();
    assert_eq!(entry.name, "Pull-Up");
    assert_eq!(entry.muscle_group, None);

    let err = ExerciseEntry::new("\t", Some("Back")).unwrap_err();
    assert_eq!(err, WorkoutValidationError::EmptyExerciseName);
}

#[test]
fn set_rejects_negative_and_non_finite_weight() {
    assert!(WorkoutSet::new(0.0, 0).is_ok());
    assert_eq!(
        WorkoutSet::new(-1.0, 5).unwrap_err(),
        WorkoutValidationError::InvalidWeight(-1.0)
    );
    assert!(WorkoutSet::new(f64::INFINITY, 5).is_err());
}

#[test]
fn validate_walks_owned_children() {
    let mut workout = Workout::new(0, "Nested");
    let mut entry = ExerciseEntry::new("Row", None).unwrap();
    let mut set = WorkoutSet::new(50.0, 8).unwrap();
    set.id = Uuid::nil();
    entry.sets.push(set);
    workout.exercises.push(entry);

    assert_eq!(workout.validate().unwrap_err(), WorkoutValidationError::NilId);
}

#[test]
fn workout_serialization_uses_expected_wire_fields() {
    let workout_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut workout = Workout::new(1_715_328_000_000, "Push");
    workout.id = workout_id;
    let mut entry = ExerciseEntry::new("Bench Press", Some("Chest")).unwrap();
    entry.sets.push(WorkoutSet::new(80.0, 5).unwrap());
    workout.exercises.push(entry);

    let json = serde_json::to_value(&workout).unwrap();
    assert_eq!(json["id"], workout_id.to_string());
    assert_eq!(json["performed_at"], 1_715_328_000_000_i64);
    assert_eq!(json["title"], "Push");
    assert_eq!(json["exercises"][0]["name"], "Bench Press");
    assert_eq!(json["exercises"][0]["muscle_group"], "Chest");
    assert_eq!(json["exercises"][0]["sets"][0]["weight_kg"], 80.0);
    assert_eq!(json["exercises"][0]["sets"][0]["reps"], 5);

    let decoded: Workout = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, workout);
}
