//! Catalog search predicates

use bookshelf_core::{AppError, Book};
use std::fmt;
use std::str::FromStr;

/// Book field a search matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    /// Case-insensitive substring of the title
    #[default]
    Title,
    /// Case-insensitive substring of the author
    Author,
    /// Case-insensitive equality with the genre
    Genre,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [Self::Title, Self::Author, Self::Genre];

    /// Returns true if `book` matches `query` on this field
    pub fn matches(self, book: &Book, query: &str) -> bool {
        match self {
            Self::Title => contains_ignore_case(&book.title, query),
            Self::Author => contains_ignore_case(&book.author, query),
            Self::Genre => book.genre.to_lowercase() == query.to_lowercase(),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
            Self::Genre => write!(f, "genre"),
        }
    }
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.to_string() == wanted)
            .ok_or_else(|| AppError::InvalidArgument {
                argument: "search field".to_string(),
                reason: format!("'{}' is not one of title, author, genre", s),
            })
    }
}
