// FILE: crates/library/src/manager.rs

use crate::error::LibraryResult;
use crate::search::SearchField;
use crate::snapshot::SnapshotFile;
use bookshelf_config::LibraryConfig;
use bookshelf_core::{Book, LibraryStats};
use log::{info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Genres offered when the catalog has none of its own
pub const FALLBACK_GENRES: [&str; 8] = [
    "Fiction",
    "Science Fiction",
    "Detective",
    "Novel",
    "Science",
    "Biography",
    "Poetry",
    "Adventure",
];

/// The book catalog
///
/// An ordered list of books addressed by position, mirrored to a snapshot
/// file. Every mutation rewrites the snapshot before it returns.
pub struct Library {
    books: Vec<Book>,
    snapshot: SnapshotFile,
    rollback_on_save_failure: bool,
}

impl Library {
    /// Opens the catalog stored at `path` with default settings
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::from_config(&LibraryConfig::new(path))
    }

    /// Opens the catalog described by `config`
    ///
    /// A missing snapshot gives an empty catalog. So does one that cannot be
    /// read; the problem is logged and the bad file is left untouched until
    /// the next successful save replaces it.
    pub fn from_config(config: &LibraryConfig) -> Self {
        let snapshot = SnapshotFile::new(&config.data_file).with_backup(config.keep_backup);

        let books = match snapshot.load() {
            Ok(Some(books)) => {
                info!(
                    "Loaded {} books from {}",
                    books.len(),
                    snapshot.path().display()
                );
                books
            }
            Ok(None) => {
                info!(
                    "No library at {}, starting empty",
                    snapshot.path().display()
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Could not load library, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            books,
            snapshot,
            rollback_on_save_failure: config.rollback_on_save_failure,
        }
    }

    /// Snapshot file backing this catalog
    pub fn path(&self) -> &Path {
        self.snapshot.path()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Appends a book and saves
    pub fn add(&mut self, book: Book) -> LibraryResult<()> {
        info!("Adding '{}'", book.display_label());
        self.books.push(book);
        self.commit(|books| {
            books.pop();
        })
    }

    /// Replaces the book at `index` and saves
    ///
    /// Returns `Ok(false)` without touching anything when `index` is out of
    /// range.
    pub fn update(&mut self, index: usize, book: Book) -> LibraryResult<bool> {
        let Some(slot) = self.books.get_mut(index) else {
            return Ok(false);
        };

        let previous = std::mem::replace(slot, book);
        info!("Updated book {} (was '{}')", index, previous.display_label());
        self.commit(move |books| books[index] = previous)?;
        Ok(true)
    }

    /// Removes the book at `index` and saves
    ///
    /// Returns `Ok(false)` without touching anything when `index` is out of
    /// range.
    pub fn remove(&mut self, index: usize) -> LibraryResult<bool> {
        if index >= self.books.len() {
            return Ok(false);
        }

        let removed = self.books.remove(index);
        info!("Removed '{}'", removed.display_label());
        self.commit(move |books| books.insert(index, removed))?;
        Ok(true)
    }

    /// Removes the first book equal to `book` and saves
    pub fn remove_by_value(&mut self, book: &Book) -> LibraryResult<bool> {
        match self.books.iter().position(|b| b == book) {
            Some(index) => self.remove(index),
            None => Ok(false),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Borrowed view of every book in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Copy of every book in insertion order
    pub fn list(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Books whose title contains `substr`, ignoring case
    pub fn search_by_title(&self, substr: &str) -> Vec<Book> {
        self.filter(SearchField::Title, substr)
    }

    /// Books whose author contains `substr`, ignoring case
    pub fn search_by_author(&self, substr: &str) -> Vec<Book> {
        self.filter(SearchField::Author, substr)
    }

    /// Books whose genre equals `genre`, ignoring case
    pub fn search_by_genre(&self, genre: &str) -> Vec<Book> {
        self.filter(SearchField::Genre, genre)
    }

    /// Searches one field; a blank query returns every book
    pub fn search(&self, field: SearchField, query: &str) -> Vec<Book> {
        self.find(field, query)
            .into_iter()
            .map(|(_, book)| book.clone())
            .collect()
    }

    /// Like [`Self::search`], keeping each match's position
    pub fn find(&self, field: SearchField, query: &str) -> Vec<(usize, &Book)> {
        let query = query.trim();
        self.books
            .iter()
            .enumerate()
            .filter(|(_, book)| query.is_empty() || field.matches(book, query))
            .collect()
    }

    /// Genres in use, sorted and deduplicated
    ///
    /// Falls back to [`FALLBACK_GENRES`] when no book has a genre.
    pub fn distinct_genres(&self) -> Vec<String> {
        let genres: BTreeSet<&str> = self.books.iter().map(|b| b.genre.as_str()).collect();

        if genres.is_empty() {
            return FALLBACK_GENRES.iter().map(|g| g.to_string()).collect();
        }
        genres.into_iter().map(str::to_string).collect()
    }

    pub fn statistics(&self) -> LibraryStats {
        LibraryStats::from_books(&self.books)
    }

    fn filter(&self, field: SearchField, query: &str) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| field.matches(book, query))
            .cloned()
            .collect()
    }

    /// Saves the current list, undoing the pending change if that fails and
    /// rollback is enabled
    fn commit<F>(&mut self, undo: F) -> LibraryResult<()>
    where
        F: FnOnce(&mut Vec<Book>),
    {
        match self.snapshot.save(&self.books) {
            Ok(()) => Ok(()),
            Err(e) => {
                if self.rollback_on_save_failure {
                    undo(&mut self.books);
                    warn!("Save failed, change rolled back: {}", e);
                } else {
                    warn!("Save failed, change kept in memory only: {}", e);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibraryError;
    use bookshelf_core::AppError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup_test_library() -> (TempDir, Library) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let library = Library::open(temp_dir.path().join("library_data.json"));
        (temp_dir, library)
    }

    fn book(title: &str, author: &str, genre: &str) -> Book {
        Book::new(
            title,
            author,
            genre,
            NaiveDate::from_ymd_opt(2001, 2, 3).unwrap(),
        )
    }

    #[test]
    fn test_new_library_is_empty() {
        let (_dir, library) = setup_test_library();
        assert!(library.is_empty());
        assert_eq!(library.len(), 0);
        assert!(library.list().is_empty());
        assert!(!library.path().exists());
    }

    #[test]
    fn test_add_persists() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();

        assert_eq!(library.len(), 1);
        assert!(library.path().exists());
    }

    #[test]
    fn test_update_in_range() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();

        let updated = library
            .update(0, book("Dune Messiah", "Herbert", "Sci-Fi"))
            .unwrap();
        assert!(updated);
        assert_eq!(library.get(0).unwrap().title, "Dune Messiah");
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();

        assert!(!library.update(1, book("X", "Y", "Z")).unwrap());
        assert!(!library.update(1000, book("X", "Y", "Z")).unwrap());
        assert!(!library.update(usize::MAX, book("X", "Y", "Z")).unwrap());
        assert_eq!(library.list(), vec![book("Dune", "Herbert", "Sci-Fi")]);
    }

    #[test]
    fn test_remove() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("A", "x", "g")).unwrap();
        library.add(book("B", "x", "g")).unwrap();
        library.add(book("C", "x", "g")).unwrap();

        assert!(library.remove(1).unwrap());
        let titles: Vec<_> = library.list().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["A", "C"]);

        assert!(!library.remove(1000).unwrap());
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_remove_by_value_takes_first_match() {
        let (_dir, mut library) = setup_test_library();
        let twin = book("Twin", "x", "g");
        library.add(twin.clone()).unwrap();
        library.add(book("Other", "x", "g")).unwrap();
        library.add(twin.clone()).unwrap();

        assert!(library.remove_by_value(&twin).unwrap());
        let titles: Vec<_> = library.list().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Other", "Twin"]);

        assert!(!library.remove_by_value(&book("Missing", "x", "g")).unwrap());
    }

    #[test]
    fn test_list_is_a_copy() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();

        let mut copy = library.list();
        copy[0].title = "Changed".to_string();
        copy.clear();

        assert_eq!(library.get(0).unwrap().title, "Dune");
    }

    #[test]
    fn test_search_by_title_and_author() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Dune", "Frank Herbert", "Sci-Fi")).unwrap();
        library.add(book("1984", "George Orwell", "Dystopia")).unwrap();

        assert_eq!(library.search_by_title("dun").len(), 1);
        assert_eq!(library.search_by_author("ORWELL")[0].title, "1984");
        assert_eq!(library.search_by_title("").len(), 2);
        assert_eq!(library.search_by_author("").len(), 2);
        assert!(library.search_by_title("zzz").is_empty());
    }

    #[test]
    fn test_search_by_genre_is_exact() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("A", "x", "Fantasy")).unwrap();

        assert_eq!(library.search_by_genre("fantasy").len(), 1);
        assert!(library.search_by_genre("Fant").is_empty());
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("A", "x", "Fantasy")).unwrap();
        library.add(book("B", "y", "Drama")).unwrap();

        assert_eq!(library.search(SearchField::Genre, "   ").len(), 2);
        assert_eq!(library.search(SearchField::Genre, "drama")[0].title, "B");
    }

    #[test]
    fn test_find_keeps_positions() {
        let (_dir, mut library) = setup_test_library();
        library.add(book("Alpha", "x", "g")).unwrap();
        library.add(book("Beta", "x", "g")).unwrap();
        library.add(book("Alphabet", "x", "g")).unwrap();

        let hits: Vec<usize> = library
            .find(SearchField::Title, "alpha")
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_distinct_genres() {
        let (_dir, mut library) = setup_test_library();
        assert_eq!(library.distinct_genres(), FALLBACK_GENRES.to_vec());

        library.add(book("A", "x", "Sci-Fi")).unwrap();
        library.add(book("B", "x", "Drama")).unwrap();
        library.add(book("C", "x", "Sci-Fi")).unwrap();

        assert_eq!(library.distinct_genres(), vec!["Drama", "Sci-Fi"]);
    }

    #[test]
    fn test_statistics() {
        let (_dir, mut library) = setup_test_library();
        assert!(library.statistics().is_empty());

        library
            .add(book("A", "x", "g").with_pages(300).with_rating(4.0))
            .unwrap();

        let stats = library.statistics();
        assert_eq!(stats.total_books, 1);
        assert_eq!(stats.unique_authors, 1);
        assert_eq!(stats.total_pages, 300);
        assert!((stats.average_rating - 4.0).abs() < 1e-9);
    }

    fn unwritable_config(dir: &TempDir) -> LibraryConfig {
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        LibraryConfig::new(blocker.join("library_data.json"))
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let dir = TempDir::new().unwrap();
        let mut library = Library::from_config(&unwritable_config(&dir));

        let err = library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap_err();
        assert!(matches!(
            err,
            LibraryError::App(AppError::SnapshotWriteFailed { .. })
        ));
        assert!(library.is_empty());
    }

    #[test]
    fn test_failed_save_can_keep_change() {
        let dir = TempDir::new().unwrap();
        let config = unwritable_config(&dir).with_rollback(false);
        let mut library = Library::from_config(&config);

        assert!(library.add(book("Dune", "Herbert", "Sci-Fi")).is_err());
        assert_eq!(library.len(), 1);
    }

    /// Two saved books, then the snapshot's directory turns into a plain
    /// file so every later save fails
    fn library_that_stops_saving(dir: &TempDir, rollback: bool) -> Library {
        let shelf = dir.path().join("shelf");
        let config = LibraryConfig::new(shelf.join("library_data.json")).with_rollback(rollback);
        let mut library = Library::from_config(&config);
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();
        library.add(book("Emma", "Austen", "Novel")).unwrap();

        std::fs::remove_dir_all(&shelf).unwrap();
        std::fs::write(&shelf, "not a directory").unwrap();
        library
    }

    fn titles(library: &Library) -> Vec<&str> {
        library.books().iter().map(|b| b.title.as_str()).collect()
    }

    fn is_write_failure(result: LibraryResult<bool>) -> bool {
        matches!(
            result,
            Err(LibraryError::App(AppError::SnapshotWriteFailed { .. }))
        )
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let dir = TempDir::new().unwrap();
        let mut library = library_that_stops_saving(&dir, true);

        assert!(is_write_failure(
            library.update(0, book("Dune Messiah", "Herbert", "Sci-Fi"))
        ));
        assert_eq!(titles(&library), vec!["Dune", "Emma"]);
    }

    #[test]
    fn test_failed_remove_rolls_back() {
        let dir = TempDir::new().unwrap();
        let mut library = library_that_stops_saving(&dir, true);

        assert!(is_write_failure(library.remove(0)));
        assert_eq!(titles(&library), vec!["Dune", "Emma"]);
    }

    #[test]
    fn test_failed_remove_by_value_rolls_back() {
        let dir = TempDir::new().unwrap();
        let mut library = library_that_stops_saving(&dir, true);

        let emma = book("Emma", "Austen", "Novel");
        assert!(is_write_failure(library.remove_by_value(&emma)));
        assert_eq!(titles(&library), vec!["Dune", "Emma"]);
    }

    #[test]
    fn test_failed_saves_keep_every_change_without_rollback() {
        let dir = TempDir::new().unwrap();
        let mut library = library_that_stops_saving(&dir, false);

        assert!(is_write_failure(
            library.update(0, book("Dune Messiah", "Herbert", "Sci-Fi"))
        ));
        assert_eq!(titles(&library), vec!["Dune Messiah", "Emma"]);

        assert!(is_write_failure(library.remove(1)));
        assert_eq!(titles(&library), vec!["Dune Messiah"]);

        let messiah = book("Dune Messiah", "Herbert", "Sci-Fi");
        assert!(is_write_failure(library.remove_by_value(&messiah)));
        assert!(library.is_empty());
    }

    #[test]
    fn test_unstorable_rating_is_rolled_back() {
        let (dir, mut library) = setup_test_library();
        library.add(book("Dune", "Herbert", "Sci-Fi")).unwrap();

        let err = library
            .add(book("Broken", "Nobody", "Drama").with_rating(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, LibraryError::App(AppError::InvalidBook { .. })));
        assert_eq!(titles(&library), vec!["Dune"]);

        let reopened = Library::open(dir.path().join("library_data.json"));
        assert_eq!(titles(&reopened), vec!["Dune"]);
    }
}
