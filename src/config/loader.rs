//! Configuration loader for marcenaria-admin
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "MARCENARIA_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "MARCENARIA_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "MARCENARIA";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml`
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `MARCENARIA_*` environment variables
///
/// All files are optional: the admin client is usually run from an
/// arbitrary working directory and must still start with built-in defaults.
/// An explicitly requested file (`--config` or `MARCENARIA_CONFIG_FILE`) is
/// required.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `MARCENARIA_CONFIG_DIR`, `MARCENARIA_CONFIG_FILE`
    /// and `MARCENARIA_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns an error if both the directory and file variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && dir_var.is_some() {
            return Err(ConfigError::conflicting_sources(
                "MARCENARIA_CONFIG_DIR and MARCENARIA_CONFIG_FILE cannot both be set. \
                 Use MARCENARIA_CONFIG_DIR for layered configuration or \
                 MARCENARIA_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load exactly one file instead of the layered directory.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the detected environment.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load, deserialize and validate the configuration.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and deserialize without validating, for callers that apply
    /// further overrides before validation.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::Malformed(format!("Failed to deserialize configuration: {}", e))
        })?;
        settings.application.environment = self.environment;

        tracing::debug!(
            environment = %self.environment,
            base_url = %settings.api.base_url,
            "configuration loaded"
        );
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref file) => Self::add_file_source(builder, file, true)?,
            None => self.build_layered_config(builder),
        };

        // MARCENARIA_API__BASE_URL -> api.base_url
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> ConfigBuilder<DefaultState> {
        let layers = [
            "default.toml".to_string(),
            format!("{}.toml", self.environment.as_str()),
            "local.toml".to_string(),
        ];

        layers.iter().fold(builder, |builder, name| {
            let path = self.config_dir.join(name);
            builder.add_source(
                File::new(&path.to_string_lossy(), FileFormat::Toml).required(false),
            )
        })
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::missing_file(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
        ))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Loader tests mutate process-wide environment variables
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores every touched environment variable on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clean_env() -> EnvGuard {
        let mut env = EnvGuard::new();
        env.remove(CONFIG_DIR_ENV);
        env.remove(CONFIG_FILE_ENV);
        env.remove(AppEnvironment::ENV_VAR);
        env.remove("MARCENARIA_API__BASE_URL");
        env.remove("MARCENARIA_LISTING__PAGE_SIZE");
        env
    }

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_loader_rejects_dir_and_file_together() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::ConflictingSources(msg)) => {
                assert!(msg.contains("MARCENARIA_CONFIG_DIR"));
                assert!(msg.contains("MARCENARIA_CONFIG_FILE"));
            }
            other => panic!("Expected ConflictingSources, got {:?}", other),
        }
    }

    #[test]
    fn test_load_empty_dir_uses_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("defaults load");
        assert_eq!(settings, {
            let mut expected = Settings::default();
            expected.application.environment = AppEnvironment::Development;
            expected
        });
    }

    #[test]
    fn test_load_layers_in_priority_order() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                "[api]\nbase_url = \"http://localhost:3001/api\"\ntimeout = 20\n[listing]\npage_size = 10\n",
            ),
            ("test.toml", "[listing]\npage_size = 25\n"),
            ("local.toml", "[api]\ntimeout = 45\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "test");

        let settings = ConfigLoader::new().unwrap().load().expect("layered load");
        assert_eq!(settings.application.environment, AppEnvironment::Test);
        assert_eq!(settings.listing.page_size, 25);
        assert_eq!(settings.api.timeout, 45);
        assert_eq!(settings.api.base_url, "http://localhost:3001/api");
    }

    #[test]
    fn test_env_vars_override_files() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = clean_env();
        let temp_dir = setup_config_dir(&[("default.toml", "[listing]\npage_size = 10\n")]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("MARCENARIA_LISTING__PAGE_SIZE", "50");
        env.set("MARCENARIA_API__BASE_URL", "https://api.example.com");

        let settings = ConfigLoader::new().unwrap().load().expect("env override load");
        assert_eq!(settings.listing.page_size, 50);
        assert_eq!(settings.api.base_url, "https://api.example.com");
    }

    #[test]
    fn test_with_file_requires_existing_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();

        let result = ConfigLoader::new()
            .unwrap()
            .with_file("/definitely/missing/admin.toml")
            .load();
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_with_file_loads_single_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();
        let temp_dir = setup_config_dir(&[(
            "admin.toml",
            "[session]\nstorage_dir = \"/tmp/marcenaria\"\n",
        )]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_file(temp_dir.path().join("admin.toml"))
            .load()
            .expect("single file load");
        assert_eq!(settings.session.storage_dir, "/tmp/marcenaria");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();
        let temp_dir = setup_config_dir(&[("bad.toml", "[listing]\npage_size = 0\n")]);

        let result = ConfigLoader::new()
            .unwrap()
            .with_file(temp_dir.path().join("bad.toml"))
            .load();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { ref field, .. }) if field == "listing.page_size"
        ));
    }

    #[test]
    fn test_production_environment_rejects_plain_http_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = clean_env();
        let temp_dir = setup_config_dir(&[]);

        let result = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Production)
            .with_file({
                let path = temp_dir.path().join("prod.toml");
                fs::write(&path, "").unwrap();
                path
            })
            .load();
        assert!(result.is_err());
    }
}
