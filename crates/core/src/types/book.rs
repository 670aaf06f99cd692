//! Book domain model

use crate::types::common::format_display_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest rating a book can carry
pub const MAX_RATING: f64 = 5.0;

/// One catalog entry
///
/// Books carry no identity of their own. Two books are the same entry when
/// every field matches, which is what `remove_by_value` relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_date: NaiveDate,
    /// Path of the attached e-book file, empty when nothing is attached
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub pages: u32,
    /// 0.0 to 5.0 in steps of 0.1
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

impl Book {
    /// Creates a book with the required fields and no file, pages, rating or description
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        publication_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            publication_date,
            file_path: String::new(),
            pages: 0,
            rating: 0.0,
            description: String::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn with_pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the "title - author" label used in lists
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.title, self.author)
    }

    /// Returns the publication date as `dd.mm.yyyy`
    pub fn formatted_date(&self) -> String {
        format_display_date(self.publication_date)
    }

    /// Returns the rating with one decimal, e.g. `4.5`
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Returns true if a file path is attached
    ///
    /// Only the empty string means "no file"; `BookInput` trims paths before
    /// a book is built.
    pub fn has_file(&self) -> bool {
        !self.file_path.is_empty()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.author)
    }
}
