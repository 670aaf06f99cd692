//! Errors raised while reading, changing or writing `config.toml`

use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing but blank file is treated as damaged, not as defaults
    #[error("Config file {path} is empty")]
    Empty { path: PathBuf },

    #[error("Config file {path} is not valid TOML: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to encode config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not determine a config directory for this user")]
    NoConfigDir,

    #[error("Unknown config key '{key}' (known keys: {})", crate::Config::KEYS.join(", "))]
    UnknownKey { key: String },
}

impl ConfigError {
    /// Field-level problems behind an [`ConfigError::Invalid`] error
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

impl From<ValidationError> for ConfigError {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(vec![error])
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
