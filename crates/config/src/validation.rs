//! Validation system for configuration values
//!
//! Field-level errors and the common validators are shared with book input
//! validation in `bookshelf-core`; this module adds the per-section trait.

pub use bookshelf_core::validation::{ValidationError, Validator};

/// Trait for configuration sections that can validate themselves
///
/// Each config section (AppConfig, LibraryConfig) implements this trait
/// to provide validation logic.
pub trait ConfigSection: Default {
    /// Validates the configuration section
    ///
    /// Returns a list of validation errors. Empty list means valid.
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another config section into this one
    ///
    /// Values from `other` take precedence. This is used for override chains.
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}
