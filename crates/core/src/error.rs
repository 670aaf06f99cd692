//! Error types for Bookshelf
//!
//! Nothing in the catalog is fatal to the process. Input errors are fixed by
//! the user and retried; snapshot and file errors are reported while the app
//! keeps running on whatever it has in memory.

use crate::validation::ValidationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Bookshelf
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Input Errors =====
    /// One or more book fields failed validation
    #[error("Invalid book: {}", join_errors(.errors))]
    InvalidBook { errors: Vec<ValidationError> },

    /// Invalid argument supplied by the caller
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// No book at the given position
    #[error("No book at index {index} (library has {len} books)")]
    BookNotFound { index: usize, len: usize },

    // ===== Snapshot Errors =====
    /// Snapshot file exists but cannot be decoded
    #[error("Snapshot corrupted at {path}: {reason}")]
    SnapshotCorrupted { path: PathBuf, reason: String },

    /// Snapshot was written by a newer format version
    #[error("Snapshot at {path} has version {found}, newest supported is {supported}")]
    UnsupportedSnapshotVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    /// Snapshot could not be written
    #[error("Failed to write snapshot to {path}: {source}")]
    SnapshotWriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ===== File System Errors =====
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Book has no file attached
    #[error("No file attached to '{title}'")]
    NoFileAttached { title: String },

    /// The OS refused to open a file with its default handler
    #[error("Failed to open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Returns a user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidBook { errors } => {
                let fields = errors
                    .iter()
                    .map(|e| e.field.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Please check the following fields: {}.", fields)
            }
            Self::InvalidArgument { argument, .. } => {
                format!("Invalid value for {}.", argument)
            }
            Self::BookNotFound { .. } => "There is no book at that position.".to_string(),

            Self::SnapshotCorrupted { .. } => {
                "The library file is damaged. Starting with an empty library; a backup may be available.".to_string()
            }
            Self::UnsupportedSnapshotVersion { .. } => {
                "The library file was written by a newer version of Bookshelf.".to_string()
            }
            Self::SnapshotWriteFailed { .. } => {
                "Your changes could not be saved. Please check disk space and permissions."
                    .to_string()
            }

            Self::FileNotFound { .. } => {
                "The book file was not found. It may have been moved or deleted.".to_string()
            }
            Self::NoFileAttached { title } => format!("'{}' has no file attached.", title),
            Self::OpenFailed { .. } => {
                "The file could not be opened with the default application.".to_string()
            }
            Self::IoError { .. } => "A file operation failed. Please try again.".to_string(),
        }
    }

    /// Returns true if the user can fix this by changing the input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBook { .. }
                | Self::InvalidArgument { .. }
                | Self::BookNotFound { .. }
                | Self::NoFileAttached { .. }
        )
    }

    /// Helper to create an invalid-book error from validation output
    pub fn invalid_book(errors: Vec<ValidationError>) -> Self {
        Self::InvalidBook { errors }
    }

    /// Helper to create a snapshot-corruption error from any error type
    pub fn snapshot_corrupted<E: std::error::Error>(path: impl Into<PathBuf>, source: E) -> Self {
        Self::SnapshotCorrupted {
            path: path.into(),
            reason: source.to_string(),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::invalid_book(errors)
    }
}
