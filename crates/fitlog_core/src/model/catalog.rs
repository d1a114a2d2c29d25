//! Exercise catalog entries and muscle-group categories.
//!
//! # Invariants
//! - `CatalogEntry::name` is non-empty once persisted.
//! - `CATEGORY_FILTER_ALL` is a filter sentinel, never a stored category.

use serde::{Deserialize, Serialize};

/// Filter sentinel meaning "no category filter".
pub const CATEGORY_FILTER_ALL: &str = "All";

/// One selectable exercise type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub category: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            name: name.into(),
            category: category.map(str::to_string),
        }
    }
}

/// Fixed muscle-group labels offered by the exercise picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseCategory {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    FullBody,
    Other,
}

impl ExerciseCategory {
    /// All categories in picker order.
    pub const ALL: [ExerciseCategory; 9] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::Cardio,
        Self::FullBody,
        Self::Other,
    ];

    /// Display label, also the value stored in `exercises.category`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Core => "Core",
            Self::Cardio => "Cardio",
            Self::FullBody => "Full Body",
            Self::Other => "Other",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value.trim())
    }
}

/// Picker labels: the `All` sentinel followed by every category label.
pub fn picker_labels() -> Vec<&'static str> {
    std::iter::once(CATEGORY_FILTER_ALL)
        .chain(ExerciseCategory::ALL.into_iter().map(ExerciseCategory::label))
        .collect()
}
