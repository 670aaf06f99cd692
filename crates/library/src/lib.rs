//! Bookshelf Library
//!
//! The book catalog store: an ordered list of books kept in memory and
//! mirrored to a JSON snapshot, plus search, import and export on top of it.

pub mod error;
pub mod export;
pub mod import;
pub mod manager;
pub mod search;
pub mod snapshot;

pub use error::{LibraryError, LibraryResult};
pub use export::{export_books, write_books, ExportFormat};
pub use import::{BookImporter, ImportOptions};
pub use manager::{Library, FALLBACK_GENRES};
pub use search::SearchField;
pub use snapshot::{SnapshotFile, SNAPSHOT_VERSION};

pub use bookshelf_config::LibraryConfig;
