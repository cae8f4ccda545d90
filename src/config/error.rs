//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving and loading harness configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read configuration file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the schema.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// An override variable held an unparseable value.
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse { var: String, message: String },

    /// A value the current command needs was never provided.
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

impl ConfigError {
    /// Create an env parse error.
    pub fn env_parse<V: Into<String>, M: Into<String>>(var: V, message: M) -> Self {
        Self::EnvParse {
            var: var.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
