//! Library statistics

use crate::types::Book;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Library-wide statistics
///
/// `LibraryStats::empty()` doubles as the "no books" result: every counter is
/// zero and `is_empty()` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub unique_authors: usize,
    pub total_pages: u64,
    pub average_rating: f64,
}

impl LibraryStats {
    /// Creates empty statistics
    pub fn empty() -> Self {
        Self {
            total_books: 0,
            unique_authors: 0,
            total_pages: 0,
            average_rating: 0.0,
        }
    }

    /// Computes statistics over a slice of books in a single pass
    pub fn from_books(books: &[Book]) -> Self {
        if books.is_empty() {
            return Self::empty();
        }

        let mut authors = HashSet::new();
        let mut total_pages = 0u64;
        let mut rating_sum = 0.0;

        for book in books {
            authors.insert(book.author.as_str());
            total_pages += u64::from(book.pages);
            rating_sum += book.rating;
        }

        Self {
            total_books: books.len(),
            unique_authors: authors.len(),
            total_pages,
            average_rating: rating_sum / books.len() as f64,
        }
    }

    /// Returns true if there are no books
    pub fn is_empty(&self) -> bool {
        self.total_books == 0
    }

    /// Returns the average page count per book
    pub fn average_pages(&self) -> f64 {
        if self.total_books == 0 {
            return 0.0;
        }
        self.total_pages as f64 / self.total_books as f64
    }
}

impl Default for LibraryStats {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for LibraryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No books in the library");
        }
        writeln!(f, "Total books: {}", self.total_books)?;
        writeln!(f, "Authors: {}", self.unique_authors)?;
        writeln!(f, "Total pages: {}", self.total_pages)?;
        write!(f, "Average rating: {:.1}/5.0", self.average_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn book(title: &str, author: &str, pages: u32, rating: f64) -> Book {
        Book::new(
            title,
            author,
            "Novel",
            NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        )
        .with_pages(pages)
        .with_rating(rating)
    }

    #[test]
    fn test_empty_stats() {
        let stats = LibraryStats::from_books(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats, LibraryStats::empty());
        assert_eq!(stats.to_string(), "No books in the library");
        assert_eq!(stats.average_pages(), 0.0);
    }

    #[test]
    fn test_single_book() {
        let stats = LibraryStats::from_books(&[book("A", "X", 300, 4.0)]);
        assert_eq!(stats.total_books, 1);
        assert_eq!(stats.total_pages, 300);
        assert_eq!(stats.unique_authors, 1);
        assert!((stats.average_rating - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_authors_compared_exactly() {
        let stats = LibraryStats::from_books(&[
            book("A", "Orwell", 100, 3.0),
            book("B", "Orwell", 100, 3.0),
            book("C", "orwell", 100, 3.0),
        ]);
        assert_eq!(stats.unique_authors, 2);
    }

    #[test]
    fn test_average_rating_and_pages() {
        let stats = LibraryStats::from_books(&[
            book("Dune", "Herbert", 412, 4.5),
            book("1984", "Orwell", 328, 4.8),
        ]);
        assert_eq!(stats.total_pages, 740);
        assert!((stats.average_rating - 4.65).abs() < 1e-9);
        assert!((stats.average_pages() - 370.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_summary() {
        let stats = LibraryStats::from_books(&[book("A", "X", 300, 4.0)]);
        let text = stats.to_string();
        assert!(text.contains("Total books: 1"));
        assert!(text.contains("Average rating: 4.0/5.0"));
    }
}
