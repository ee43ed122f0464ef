//! Failures while assembling [`Settings`](super::Settings) from the
//! `config/` TOML layers, `MARCENARIA_*` variables and command-line flags.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicit `--config` path or `MARCENARIA_CONFIG_FILE` points nowhere
    #[error("Configuration file not found: {0}")]
    MissingFile(String),

    /// The merged layers do not deserialize into the settings sections
    #[error("Malformed configuration: {0}")]
    Malformed(String),

    /// A value in `[application]`, `[api]`, `[session]`, `[listing]` or
    /// `[logger]` is out of range; `field` is its dotted path.
    #[error("Invalid setting {field}: {message}")]
    InvalidSetting { field: String, message: String },

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Two sources that select the configuration layout were both given
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    /// Reading or merging a layer failed inside the `config` crate
    #[error("Could not read configuration layer: {0}")]
    Layer(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::InvalidSetting {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_file<S: Into<String>>(path: S) -> Self {
        ConfigError::MissingFile(path.into())
    }

    pub fn conflicting_sources<S: Into<String>>(message: S) -> Self {
        ConfigError::ConflictingSources(message.into())
    }

    /// Dotted settings path the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidSetting { field, .. } => Some(field),
            _ => None,
        }
    }
}
