//! Domain types for Bookshelf
//!
//! - `book`: the catalog entry
//! - `stats`: library statistics
//! - `common`: date display helpers

mod book;
mod common;
mod stats;

pub use book::{Book, MAX_RATING};
pub use common::{format_display_date, parse_display_date, DATE_FORMAT};
pub use stats::LibraryStats;
