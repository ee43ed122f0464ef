//! Configuration settings structures for marcenaria-admin
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "marcenaria-admin".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("marcenaria-admin/{}", crate::pkg_version())
}

fn default_storage_dir() -> String {
    ".marcenaria-admin".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/marcenaria-admin.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,

    /// Environment the configuration was resolved for (set by the loader)
    #[serde(skip)]
    pub environment: Environment,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: Environment::default(),
        }
    }
}

// ============================================================================
// API Configuration
// ============================================================================

/// Marketplace REST backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, e.g. `https://host/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Session Configuration
// ============================================================================

/// Where the persisted credential and local settings live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding one file per stored key
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

impl SessionConfig {
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
        }
    }
}

// ============================================================================
// Listing Configuration
// ============================================================================

/// List view defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Records requested per page when `--limit` is not given
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level).map_err(|e| ConfigError::InvalidSetting {
            field: "logger".to_string(),
            message: e.to_string(),
        })
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidSetting {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::InvalidSetting {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_api_config() -> impl Strategy<Value = ApiConfig> {
        (
            prop_oneof![Just("http"), Just("https")],
            "[a-z]{3,12}\\.[a-z]{2,3}",
            1u64..600,
            1u64..60,
        )
            .prop_map(|(scheme, host, timeout, connect_timeout)| ApiConfig {
                base_url: format!("{}://{}/api", scheme, host),
                timeout,
                connect_timeout,
                user_agent: "test-agent".to_string(),
            })
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (arb_api_config(), "[a-z./_-]{1,20}", 1u32..=100).prop_map(
            |(api, storage_dir, page_size)| Settings {
                api,
                session: SessionConfig { storage_dir },
                listing: ListingConfig { page_size },
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).expect("serialize");
            let back: Settings = toml::from_str(&toml_str).expect("deserialize");
            prop_assert_eq!(settings, back);
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "marcenaria-admin");
        assert_eq!(settings.api.base_url, "http://localhost:3001/api");
        assert_eq!(settings.api.timeout, 30);
        assert_eq!(settings.api.connect_timeout, 10);
        assert_eq!(settings.session.storage_dir, ".marcenaria-admin");
        assert_eq!(settings.listing.page_size, 10);
        assert_eq!(settings.logger.level, "warn");
        assert!(!settings.logger.file.enabled);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
            [api]
            base_url = "https://api.marcenariapp.com.br/api"

            [listing]
            page_size = 25
        "#;

        let settings: Settings = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(settings.api.base_url, "https://api.marcenariapp.com.br/api");
        assert_eq!(settings.api.timeout, 30);
        assert_eq!(settings.listing.page_size, 25);
        assert_eq!(settings.session.storage_dir, ".marcenaria-admin");
    }

    #[test]
    fn test_environment_is_not_serialized() {
        let mut settings = Settings::default();
        settings.application.environment = Environment::Production;
        let toml_str = toml::to_string(&settings).unwrap();
        assert!(!toml_str.contains("production"));
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings::default(),
        };
        let config = settings.into_logger_config().expect("valid logger settings");
        assert_eq!(config.level, "debug");
        assert!(!config.console.colored);
        assert!(!config.file.enabled);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                enabled: true,
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        match settings.into_logger_config() {
            Err(ConfigError::InvalidSetting { field, .. }) => {
                assert_eq!(field, "logger.file.format")
            }
            other => panic!("Expected format validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_logger_settings_both_outputs_disabled() {
        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_session_storage_path() {
        let config = SessionConfig {
            storage_dir: "/tmp/admin".to_string(),
        };
        assert_eq!(config.storage_path(), PathBuf::from("/tmp/admin"));
    }
}
