//! Check command handler
//!
//! Validates the merged configuration without contacting the backend.

use std::fmt::Write;

use super::CommandOutput;
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates the configuration and reports what the client would use.
    ///
    /// # Errors
    /// Returns the first configuration validation error
    pub fn execute(&self) -> AppResult<CommandOutput> {
        self.config.validate()?;

        let mut out = String::new();
        let _ = writeln!(out, "✓ Configuration is valid");
        let _ = writeln!(
            out,
            "✓ Environment: {}",
            self.config.application.environment
        );
        let _ = writeln!(out, "✓ Backend: {}", self.config.api.base_url);
        let _ = writeln!(
            out,
            "✓ Timeouts: {}s request, {}s connect",
            self.config.api.timeout, self.config.api.connect_timeout
        );
        let _ = writeln!(
            out,
            "✓ Session storage: {}",
            self.config.session.storage_path().display()
        );
        let _ = writeln!(out, "✓ Page size: {}", self.config.listing.page_size);
        let _ = writeln!(out, "✓ Log level: {}", self.config.logger.level);
        Ok(CommandOutput::ok(out))
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    #[test]
    fn test_check_valid_config() {
        let handler = CheckCommandHandler::new(Settings::default());
        let output = handler.execute().unwrap();
        assert!(output.success);
        assert!(output.text.contains("✓ Backend: http://localhost:3001/api"));
        assert!(output.text.contains("✓ Environment: development"));
    }

    #[test]
    fn test_check_invalid_config() {
        let mut config = Settings::default();
        config.application.environment = Environment::Production;
        let handler = CheckCommandHandler::new(config);
        assert!(handler.execute().is_err());
    }
}
