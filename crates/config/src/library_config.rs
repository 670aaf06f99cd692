//! Catalog storage configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Snapshot file used when nothing else is configured, relative to the
/// working directory
pub const DEFAULT_DATA_FILE: &str = "library_data.json";

/// Where and how the book catalog is stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Snapshot file holding the whole catalog
    pub data_file: PathBuf,

    /// Copy the previous snapshot to `<data_file>.backup` before overwriting
    pub keep_backup: bool,

    /// Undo an in-memory change when it cannot be written to disk
    pub rollback_on_save_failure: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            keep_backup: true,
            rollback_on_save_failure: true,
        }
    }
}

impl LibraryConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Default::default()
        }
    }

    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.keep_backup = enabled;
        self
    }

    pub fn with_rollback(mut self, enabled: bool) -> Self {
        self.rollback_on_save_failure = enabled;
        self
    }
}

impl ConfigSection for LibraryConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![Validator::not_empty(
            &self.data_file.to_string_lossy(),
            "library.data_file",
        )];

        if self.data_file.file_name().is_none() {
            results.push(Err(ValidationError::with_value(
                "library.data_file",
                "must name a file",
                self.data_file.display(),
            )));
        }

        Validator::collect_errors(results)
    }

    fn merge(&mut self, other: Self) {
        self.data_file = other.data_file;
        self.keep_backup = other.keep_backup;
        self.rollback_on_save_failure = other.rollback_on_save_failure;
    }

    fn section_name(&self) -> &'static str {
        "library"
    }
}
