//! Configuration validation logic
//!
//! Every configuration section validates itself; `Settings::validate`
//! returns the first error encountered.

use reqwest::Url;

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::{
    ApiConfig, FileSettings, ListingConfig, LoggerSettings, SessionConfig, Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound the backend accepts for `limit`
pub const MAX_PAGE_SIZE: u32 = 100;

impl ApiConfig {
    /// Validate API configuration
    ///
    /// # Validation Rules
    /// - Base URL must parse and use http or https
    /// - Plain http is rejected in staging and production
    /// - Both timeouts must be greater than 0, connect not above the total
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidSetting {
            field: "api.base_url".to_string(),
            message: format!("Invalid base URL '{}': {}", self.base_url, e),
        })?;

        match url.scheme() {
            "https" => {}
            "http" if environment.allows_plain_http() => {}
            "http" => {
                return Err(ConfigError::InvalidSetting {
                    field: "api.base_url".to_string(),
                    message: format!(
                        "Plain http is not allowed in the {} environment. Use an https URL.",
                        environment
                    ),
                });
            }
            other => {
                return Err(ConfigError::InvalidSetting {
                    field: "api.base_url".to_string(),
                    message: format!("Unsupported URL scheme '{}'. Use http or https.", other),
                });
            }
        }

        if self.timeout == 0 {
            return Err(ConfigError::invalid(
                "api.timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::invalid(
                "api.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout > self.timeout {
            return Err(ConfigError::InvalidSetting {
                field: "api.connect_timeout".to_string(),
                message: format!(
                    "Connect timeout ({}s) cannot exceed the request timeout ({}s).",
                    self.connect_timeout, self.timeout
                ),
            });
        }

        Ok(())
    }
}

impl SessionConfig {
    /// Validate session storage configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_dir.trim().is_empty() {
            return Err(ConfigError::invalid(
                "session.storage_dir",
                "Session storage directory cannot be empty.",
            ));
        }
        Ok(())
    }
}

impl ListingConfig {
    /// Validate listing defaults
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidSetting {
                field: "listing.page_size".to_string(),
                message: format!(
                    "Page size must be between 1 and {}, got {}.",
                    MAX_PAGE_SIZE, self.page_size
                ),
            });
        }
        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::invalid(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidSetting {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidSetting {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::invalid(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate all configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate(self.application.environment)?;
        self.session.validate()?;
        self.listing.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
