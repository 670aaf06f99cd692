//! Validation of raw user input
//!
//! Books are never validated once constructed. Whatever front end collects
//! the fields (a form, CLI flags) hands them over as text in a [`BookInput`]
//! and gets back either a [`Book`] or every field error at once.

use crate::types::{parse_display_date, Book, MAX_RATING};
use std::fmt;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the field (e.g., "title", "library.data_file")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Common validators
pub struct Validator;

impl Validator {
    /// Validates that a numeric value is within a range
    pub fn in_range<T>(value: T, min: T, max: T, field: &str) -> Result<(), ValidationError>
    where
        T: PartialOrd + fmt::Display + Copy,
    {
        if value < min || value > max {
            Err(ValidationError::with_value(
                field,
                format!("must be between {} and {}", min, max),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a value is one of the allowed options
    pub fn one_of<T>(value: &T, allowed: &[T], field: &str) -> Result<(), ValidationError>
    where
        T: PartialEq + fmt::Display,
    {
        if !allowed.contains(value) {
            let allowed_str = allowed
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            Err(ValidationError::with_value(
                field,
                format!("must be one of: {}", allowed_str),
                value,
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Raw, unvalidated book fields as typed by a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// `dd.mm.yyyy`
    pub publication_date: String,
    pub file_path: String,
    /// Empty means 0
    pub pages: String,
    /// Empty means 0.0
    pub rating: String,
    pub description: String,
}

impl BookInput {
    /// Pre-fills the input from an existing book, e.g. for editing
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            publication_date: book.formatted_date(),
            file_path: book.file_path.clone(),
            pages: book.pages.to_string(),
            rating: book.rating_label(),
            description: book.description.clone(),
        }
    }

    /// Validates every field and builds the book
    ///
    /// Text fields are trimmed. The rating is snapped to one decimal.
    pub fn into_book(self) -> Result<Book, Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (value, field) in [
            (&self.title, "title"),
            (&self.author, "author"),
            (&self.genre, "genre"),
        ] {
            if let Err(e) = Validator::not_empty(value, field) {
                errors.push(e);
            }
        }

        let date = parse_display_date(&self.publication_date)
            .map_err(|e| errors.push(e))
            .ok();
        let pages = parse_pages(&self.pages).map_err(|e| errors.push(e)).ok();
        let rating = parse_rating(&self.rating).map_err(|e| errors.push(e)).ok();

        match (date, pages, rating) {
            (Some(date), Some(pages), Some(rating)) if errors.is_empty() => Ok(Book {
                title: self.title.trim().to_string(),
                author: self.author.trim().to_string(),
                genre: self.genre.trim().to_string(),
                publication_date: date,
                file_path: self.file_path.trim().to_string(),
                pages,
                rating,
                description: self.description,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_pages(input: &str) -> Result<u32, ValidationError> {
    let text = input.trim();
    if text.is_empty() {
        return Ok(0);
    }

    text.parse::<u32>().map_err(|_| {
        ValidationError::with_value("pages", "must be a non-negative whole number", text)
    })
}

fn parse_rating(input: &str) -> Result<f64, ValidationError> {
    let text = input.trim();
    if text.is_empty() {
        return Ok(0.0);
    }

    let rating = text
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
        .ok_or_else(|| ValidationError::with_value("rating", "must be a number", text))?;

    Validator::in_range(rating, 0.0, MAX_RATING, "rating")?;
    Ok((rating * 10.0).round() / 10.0)
}
