//! Locating `config.toml` and applying changes to it

use crate::persistence::{read_config, write_config};
use crate::{Config, ConfigError, ConfigResult, ValidationError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the settings file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// Owns the location of `config.toml` and every operation on it
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
}

impl ConfigManager {
    /// Uses the per-user config directory
    ///
    /// - Linux: `~/.config/bookshelf/`
    /// - macOS: `~/Library/Application Support/bookshelf/`
    /// - Windows: `%APPDATA%\bookshelf\config\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = ProjectDirs::from("", "", "bookshelf").ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_directory(dirs.config_dir()))
    }

    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        Self {
            config_path: config_dir.join(CONFIG_FILE),
            config_dir,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the file; defaults when it does not exist yet
    pub fn load(&self) -> ConfigResult<Config> {
        read_config(&self.config_path)
    }

    /// Validates and writes `config`
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        write_config(&self.config_path, config)
    }

    /// Loads the file, applies `change` and writes the result back
    ///
    /// Nothing is written when `change` fails or leaves the config invalid.
    pub fn update<F>(&self, change: F) -> ConfigResult<Config>
    where
        F: FnOnce(&mut Config) -> ConfigResult<()>,
    {
        let mut config = self.load()?;
        change(&mut config)?;
        self.save(&config)?;
        Ok(config)
    }

    /// Writes a default file if none exists; `Ok(false)` when one already does
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path.exists() {
            log::info!("Config already exists at {}", self.config_path.display());
            return Ok(false);
        }

        self.save(&Config::default())?;
        Ok(true)
    }

    /// Overwrites the file with defaults; the old file is kept as a backup
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Problems in the stored file; empty when it is valid
    ///
    /// A file that cannot be read or parsed is an error, not a problem list.
    pub fn check(&self) -> ConfigResult<Vec<ValidationError>> {
        Ok(self.load()?.validate().err().unwrap_or_default())
    }

    /// Loads the file, then applies `BOOKSHELF_*` environment overrides
    ///
    /// Every key in [`Config::KEYS`] has a variable named after it:
    /// `library.data_file` is read from `BOOKSHELF_LIBRARY_DATA_FILE`.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |name| std::env::var(name).ok());

        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("After environment overrides: {}", error);
            }
        }
        Ok(config)
    }
}

/// `BOOKSHELF_` followed by the key in upper case, dots turned into underscores
pub fn env_var_name(key: &str) -> String {
    format!("BOOKSHELF_{}", key.replace('.', "_").to_ascii_uppercase())
}

/// Applies overrides read through `lookup`; blank or unusable values are skipped
fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    for key in Config::KEYS {
        let name = env_var_name(key);
        let Some(value) = lookup(&name).filter(|v| !v.trim().is_empty()) else {
            continue;
        };

        match config.set(key, &value) {
            Ok(()) => log::debug!("{} overrides {}", name, key),
            Err(e) => log::warn!("Ignoring {}: {}", name, e),
        }
    }
}
