//! Reading and writing `config.toml`

use crate::atomic_file;
use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::path::Path;

/// Reads the config at `path`
///
/// A missing file yields the defaults. Values that fail validation are logged
/// and kept, so a hand-edited file can still be repaired with `config set`.
pub(crate) fn read_config(path: &Path) -> ConfigResult<Config> {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.version < CONFIG_VERSION {
        log::info!(
            "Config format v{} predates v{}, missing keys use defaults",
            config.version,
            CONFIG_VERSION
        );
    }
    if let Err(errors) = config.validate() {
        for error in &errors {
            log::warn!("{}: {}", path.display(), error);
        }
    }

    Ok(config)
}

/// Validates `config` and writes it to `path`, keeping a `.backup` of the
/// file it replaces
pub(crate) fn write_config(path: &Path, config: &Config) -> ConfigResult<()> {
    config.validate()?;
    let contents = config.to_toml()?;

    if path.is_file() {
        if let Err(e) = atomic_file::write_backup(path) {
            log::warn!("Could not back up {}: {}", path.display(), e);
        }
    }

    atomic_file::write(path, contents.as_bytes()).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Config saved to {}", path.display());
    Ok(())
}
