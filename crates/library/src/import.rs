// FILE: crates/library/src/import.rs

use crate::error::LibraryResult;
use crate::manager::Library;
use bookshelf_core::{AppError, Book, BookInput};
use std::path::Path;

/// Field values for an imported book
///
/// The file itself only supplies a title (its stem) and a path. Everything
/// else comes from here; `None` keeps the pre-filled value.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    /// `dd.mm.yyyy`
    pub publication_date: Option<String>,
    pub pages: Option<String>,
    pub rating: Option<String>,
    pub description: Option<String>,
}

impl ImportOptions {
    fn apply(self, input: &mut BookInput) {
        let fields = [
            (self.title, &mut input.title),
            (self.author, &mut input.author),
            (self.genre, &mut input.genre),
            (self.publication_date, &mut input.publication_date),
            (self.pages, &mut input.pages),
            (self.rating, &mut input.rating),
            (self.description, &mut input.description),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// Turns e-book files into catalog entries
pub struct BookImporter;

impl BookImporter {
    /// Pre-fills a book form from an e-book file
    ///
    /// The title is the file name without its extension and the file path is
    /// made absolute when possible.
    pub fn prepare<P: AsRef<Path>>(path: P) -> LibraryResult<BookInput> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(BookInput {
            title,
            file_path: absolute.to_string_lossy().into_owned(),
            ..Default::default()
        })
    }

    /// Validates the file plus `options` as a book and adds it to `library`
    pub fn import_file<P: AsRef<Path>>(
        library: &mut Library,
        path: P,
        options: ImportOptions,
    ) -> LibraryResult<Book> {
        let mut input = Self::prepare(path)?;
        options.apply(&mut input);

        let book = input.into_book()?;
        library.add(book.clone())?;
        Ok(book)
    }

    /// Imports several files with the same options, stopping at the first failure
    pub fn import_files<P: AsRef<Path>>(
        library: &mut Library,
        paths: &[P],
        options: ImportOptions,
    ) -> LibraryResult<Vec<Book>> {
        paths
            .iter()
            .map(|path| Self::import_file(library, path, options.clone()))
            .collect()
    }
}
