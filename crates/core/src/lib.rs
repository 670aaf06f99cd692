pub mod error;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::{
    format_display_date, parse_display_date, Book, LibraryStats, DATE_FORMAT, MAX_RATING,
};
pub use validation::{BookInput, ValidationError, Validator};
