//! On-disk snapshot of the whole catalog
//!
//! The snapshot is a single JSON document holding a format version and the
//! ordered list of books. It is rewritten in full after every change through
//! [`atomic_file::write`], so a crash never leaves a half-written file behind.

use crate::error::LibraryResult;
use bookshelf_config::atomic_file;
use bookshelf_core::{AppError, Book, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Newest snapshot format this build reads and the one it writes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    books: &'a [Book],
}

#[derive(Deserialize)]
struct SnapshotHeader {
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotIn {
    #[serde(default)]
    books: Vec<Book>,
}

/// Reads and writes the catalog snapshot at a fixed path
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    keep_backup: bool,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            keep_backup: false,
        }
    }

    /// Copy the previous snapshot to [`Self::backup_path`] before each overwrite
    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.keep_backup = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<snapshot>.backup`, next to the snapshot itself
    pub fn backup_path(&self) -> PathBuf {
        atomic_file::backup_path(&self.path)
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Loads the stored books
    ///
    /// Returns `Ok(None)` when no snapshot has been written yet. A file that
    /// exists but cannot be decoded is an error; callers decide whether to
    /// fall back to an empty catalog.
    pub fn load(&self) -> LibraryResult<Option<Vec<Book>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| AppError::IoError {
            message: format!("Failed to read snapshot {}", self.path.display()),
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Err(AppError::SnapshotCorrupted {
                path: self.path.clone(),
                reason: "file is empty".to_string(),
            }
            .into());
        }

        let header: SnapshotHeader = serde_json::from_str(&contents)
            .map_err(|e| AppError::snapshot_corrupted(&self.path, e))?;

        if header.version > SNAPSHOT_VERSION {
            return Err(AppError::UnsupportedSnapshotVersion {
                path: self.path.clone(),
                found: header.version,
                supported: SNAPSHOT_VERSION,
            }
            .into());
        }

        let snapshot: SnapshotIn = serde_json::from_str(&contents)
            .map_err(|e| AppError::snapshot_corrupted(&self.path, e))?;

        log::debug!(
            "Read {} books from {} (format v{})",
            snapshot.books.len(),
            self.path.display(),
            header.version
        );
        Ok(Some(snapshot.books))
    }

    /// Replaces the snapshot with `books`
    ///
    /// Every book must survive a reload, so a rating that JSON cannot carry
    /// (NaN or infinite) fails the save before anything is written.
    pub fn save(&self, books: &[Book]) -> LibraryResult<()> {
        check_storable(books)?;
        let json = serde_json::to_string_pretty(&SnapshotOut {
            version: SNAPSHOT_VERSION,
            books,
        })?;

        if self.keep_backup && self.exists() {
            if let Err(e) = atomic_file::write_backup(&self.path) {
                log::warn!("Could not back up {}: {}", self.path.display(), e);
            }
        }

        atomic_file::write(&self.path, json.as_bytes()).map_err(|source| {
            AppError::SnapshotWriteFailed {
                path: self.path.clone(),
                source,
            }
        })?;

        log::debug!("Saved {} books to {}", books.len(), self.path.display());
        Ok(())
    }
}

fn check_storable(books: &[Book]) -> LibraryResult<()> {
    let errors: Vec<ValidationError> = books
        .iter()
        .filter(|book| !book.rating.is_finite())
        .map(|book| {
            ValidationError::with_value(
                "rating",
                format!("'{}' has a rating that cannot be stored", book.title),
                book.rating,
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::invalid_book(errors).into())
    }
}
