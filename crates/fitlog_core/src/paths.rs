//! Application file locations.
//!
//! # Invariants
//! - Both database files live directly under one data directory.

use crate::catalog::store::CATALOG_DB_FILE_NAME;
use std::path::{Path, PathBuf};

pub const WORKOUT_DB_FILE_NAME: &str = "workouts.sqlite";
const APP_DIR_NAME: &str = "FitLog";

/// Resolved on-disk locations for core storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Per-user application data directory, or the temp dir when the
    /// platform reports none.
    pub fn platform_default() -> Self {
        let base = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(APP_DIR_NAME))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn catalog_db(&self) -> PathBuf {
        self.data_dir.join(CATALOG_DB_FILE_NAME)
    }

    pub fn workout_db(&self) -> PathBuf {
        self.data_dir.join(WORKOUT_DB_FILE_NAME)
    }
}
