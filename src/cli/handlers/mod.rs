//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod check;
pub mod dashboard;
pub mod list;
pub mod session;
pub mod settings;

pub use check::CheckCommandHandler;
pub use dashboard::DashboardCommandHandler;
pub use list::ListCommandHandler;
pub use session::SessionCommandHandler;
pub use settings::SettingsCommandHandler;

/// Text printed by a command and whether the view loaded successfully.
///
/// A view whose fetch failed still prints its empty state, but the process
/// exits non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}
