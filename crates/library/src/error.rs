// FILE: crates/library/src/error.rs

use bookshelf_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Snapshot encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    /// Returns the underlying application error, if there is one
    pub fn as_app_error(&self) -> Option<&AppError> {
        match self {
            Self::App(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the user can fix this by changing the input
    pub fn is_user_error(&self) -> bool {
        self.as_app_error().is_some_and(AppError::is_user_error)
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            Self::App(err) => err.user_message(),
            Self::Encoding(_) => "The library could not be encoded for saving.".to_string(),
            Self::Csv(_) | Self::Io(_) => "A file operation failed. Please try again.".to_string(),
        }
    }
}

impl From<Vec<bookshelf_core::ValidationError>> for LibraryError {
    fn from(errors: Vec<bookshelf_core::ValidationError>) -> Self {
        Self::App(AppError::invalid_book(errors))
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;
