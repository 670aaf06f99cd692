//! Catalog export to JSON or CSV

use crate::error::LibraryResult;
use bookshelf_core::{AppError, Book};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output format for [`export_books`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty-printed array of book objects
    #[default]
    Json,
    /// One header row plus one row per book, dates as `dd.mm.yyyy`
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(AppError::InvalidArgument {
                argument: "format".to_string(),
                reason: format!("'{}' is not one of json, csv", other),
            }),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    author: &'a str,
    genre: &'a str,
    publication_date: String,
    pages: u32,
    rating: String,
    file_path: &'a str,
    description: &'a str,
}

impl<'a> From<&'a Book> for CsvRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: &book.title,
            author: &book.author,
            genre: &book.genre,
            publication_date: book.formatted_date(),
            pages: book.pages,
            rating: book.rating_label(),
            file_path: &book.file_path,
            description: &book.description,
        }
    }
}

/// Writes `books` to `writer` in the given format
pub fn write_books<W: Write>(books: &[Book], format: ExportFormat, writer: W) -> LibraryResult<()> {
    match format {
        ExportFormat::Json => {
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, books)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        ExportFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for book in books {
                csv_writer.serialize(CsvRow::from(book))?;
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}

/// Writes `books` to a new file at `path`, returning how many were written
pub fn export_books(books: &[Book], path: &Path, format: ExportFormat) -> LibraryResult<usize> {
    let file = File::create(path).map_err(|e| AppError::IoError {
        message: format!("Failed to create {}", path.display()),
        source: e,
    })?;

    write_books(books, format, BufWriter::new(file))?;
    log::info!(
        "Exported {} books to {} as {}",
        books.len(),
        path.display(),
        format
    );
    Ok(books.len())
}
