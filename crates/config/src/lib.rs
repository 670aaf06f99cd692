//! Bookshelf Configuration System
//!
//! Settings live in a single `config.toml`. Each section implements the
//! `ConfigSection` trait so it validates and merges itself.
//!
//! A missing file means defaults. A broken file is reported and the caller
//! decides whether to continue with defaults. Writes go through
//! [`atomic_file`], which the catalog snapshot uses as well.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf_config::ConfigManager;
//!
//! let manager = ConfigManager::new().expect("Failed to locate config directory");
//! let config = manager
//!     .update(|config| config.set("library.keep_backup", "false"))
//!     .expect("Failed to update config");
//!
//! println!("Library file: {}", config.library.data_file.display());
//! ```

pub mod atomic_file;
mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod library_config;

pub use error::{ConfigError, ConfigResult};
pub use manager::{env_var_name, ConfigManager, CONFIG_FILE};
pub use validation::{ConfigSection, ValidationError, Validator};

// Re-export config sections
pub use app_config::{AppConfig, LogLevel};
pub use library_config::{LibraryConfig, DEFAULT_DATA_FILE};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Catalog storage settings
    pub library: LibraryConfig,
}

impl Config {
    /// Keys accepted by [`Config::set`]
    pub const KEYS: [&'static str; 5] = [
        "app.log_level",
        "app.color_output",
        "library.data_file",
        "library.keep_backup",
        "library.rollback_on_save_failure",
    ];

    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one value from its text form, e.g. `set("app.log_level", "debug")`
    ///
    /// Booleans accept `true/false`, `yes/no`, `on/off` and `1/0`. The result
    /// is not validated as a whole; saving does that.
    pub fn set(&mut self, key: &str, value: &str) -> ConfigResult<()> {
        match key {
            "app.log_level" => self.app.log_level = value.parse()?,
            "app.color_output" => self.app.color_output = parse_switch(key, value)?,
            "library.data_file" => self.library.data_file = PathBuf::from(value.trim()),
            "library.keep_backup" => self.library.keep_backup = parse_switch(key, value)?,
            "library.rollback_on_save_failure" => {
                self.library.rollback_on_save_failure = parse_switch(key, value)?
            }
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// The config as it would be written to `config.toml`
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.version > CONFIG_VERSION {
            errors.push(ValidationError::with_value(
                "version",
                format!("must be at most {}", CONFIG_VERSION),
                self.version,
            ));
        }

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.library.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    ///
    /// This is used for override chains: defaults < file < env vars < CLI args
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.library.merge(other.library);
    }
}

fn parse_switch(key: &str, value: &str) -> Result<bool, ValidationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ValidationError::with_value(
            key,
            "must be true or false",
            value,
        )),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            library: LibraryConfig::default(),
        }
    }
}
