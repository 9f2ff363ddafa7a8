use std::path::PathBuf;

use thiserror::Error;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("toml error: {0}")]
    TomlDeError(#[from] toml::de::Error),
    #[error("config not found at {}", .0.display())]
    ConfigNotFound(PathBuf),
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(key: &'static str, reason: S) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}
