//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::services::SettingsTab;

/// Administrative client for the Marcenaria services marketplace
#[derive(Parser, Debug)]
#[command(name = "marcenaria-admin")]
#[command(about = "Administrative client for the Marcenaria services marketplace")]
#[command(long_about = "
marcenaria-admin signs in to the marketplace backend with an admin account
and shows the dashboard, the user, service, quote and payment lists, and the
platform settings. The session is kept on disk between runs.

EXAMPLES:
    # Sign in (the password may also come from MARCENARIA_PASSWORD)
    marcenaria-admin login --email admin@marcenaria.com

    # Overview numbers
    marcenaria-admin dashboard

    # Second page of clients named Maria
    marcenaria-admin clients --search Maria --page 2

    # Pending furniture services
    marcenaria-admin services --status pending --category moveis

    # Change the platform fee
    marcenaria-admin settings set financial.platform_fee_percentage 12

    # Validate the configuration against production
    marcenaria-admin --env production check
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load exactly this TOML file instead of the layered `config/`
    /// directory. The file must exist and be readable.
    ///
    /// Example: --config /etc/marcenaria-admin/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` overlay and whether plain http
    /// backends are accepted.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Backend base URL, e.g. https://api.marcenariapp.com.br/api
    #[arg(long, value_name = "URL", value_parser = super::validation::validate_api_url)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    ///
    /// Increases log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress everything but errors in the log output
    ///
    /// Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Paging and filters shared by the list commands
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Page to show, starting at 1
    #[arg(long, value_name = "N", default_value = "1", value_parser = super::validation::validate_page)]
    pub page: u32,

    /// Records per page (default from `[listing] page_size`)
    #[arg(long, value_name = "N", value_parser = super::validation::validate_limit)]
    pub limit: Option<u32>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with an admin account
    ///
    /// Only accounts with the admin role are accepted. The token and the
    /// user are stored under `[session] storage_dir`.
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,

        /// Account password
        #[arg(long, value_name = "PASSWORD", env = "MARCENARIA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in admin and the available views
    Whoami,
    /// Overview numbers (default)
    Dashboard,
    /// List client accounts
    Clients {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by name
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// List professional accounts
    Professionals {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by name
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// List service requests
    Services {
        #[command(flatten)]
        list: ListArgs,

        /// pending, accepted, in_progress, completed or cancelled
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,

        /// moveis, reparos, instalacao, portas or janelas
        #[arg(long, value_name = "CATEGORY")]
        category: Option<String>,
    },
    /// List quotes
    Quotes {
        #[command(flatten)]
        list: ListArgs,

        /// pending, accepted, rejected or expired
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },
    /// List payment transactions
    Payments {
        #[command(flatten)]
        list: ListArgs,

        /// pending, completed, failed or refunded
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },
    /// Platform settings kept on this machine
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
    /// Validate the configuration and exit
    Check,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Show one tab (default: general)
    Show {
        #[arg(long, value_enum, default_value = "general")]
        tab: TabArg,
    },
    /// Change one value, e.g. `financial.currency BRL`
    Set { key: String, value: String },
    /// Restore the defaults
    Reset,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TabArg {
    General,
    Financial,
    Notifications,
    Security,
}

impl From<TabArg> for SettingsTab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::General => SettingsTab::General,
            TabArg::Financial => SettingsTab::Financial,
            TabArg::Notifications => SettingsTab::Notifications,
            TabArg::Security => SettingsTab::Security,
        }
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Login { email, password }) = &self.command {
            if email.trim().is_empty() {
                return Err("--email cannot be empty".to_string());
            }
            if password.is_empty() {
                return Err("--password cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["marcenaria-admin", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["marcenaria-admin"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.api_url.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_clients_command() {
        let cli = Cli::try_parse_from([
            "marcenaria-admin",
            "clients",
            "--search",
            "Maria",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Clients { list, search }) => {
                assert_eq!(list.page, 2);
                assert_eq!(list.limit, None);
                assert_eq!(search.as_deref(), Some("Maria"));
            }
            other => panic!("Expected Clients command, got {:?}", other),
        }
    }

    #[test]
    fn test_services_filters() {
        let cli = Cli::try_parse_from([
            "marcenaria-admin",
            "services",
            "--status",
            "pending",
            "--category",
            "moveis",
            "--limit",
            "25",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Services {
                list,
                status,
                category,
            }) => {
                assert_eq!(list.page, 1);
                assert_eq!(list.limit, Some(25));
                assert_eq!(status.as_deref(), Some("pending"));
                assert_eq!(category.as_deref(), Some("moveis"));
            }
            other => panic!("Expected Services command, got {:?}", other),
        }
    }

    #[test]
    fn test_clients_reject_status_filter() {
        let result =
            Cli::try_parse_from(["marcenaria-admin", "clients", "--status", "pending"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_page_and_limit() {
        assert!(Cli::try_parse_from(["marcenaria-admin", "quotes", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["marcenaria-admin", "quotes", "--limit", "500"]).is_err());
    }

    #[test]
    fn test_settings_subcommands() {
        let cli = Cli::try_parse_from(["marcenaria-admin", "settings", "show", "--tab", "financial"])
            .unwrap();
        match cli.command {
            Some(Commands::Settings {
                action: Some(SettingsAction::Show { tab }),
            }) => assert_eq!(tab, TabArg::Financial),
            other => panic!("Expected settings show, got {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "marcenaria-admin",
            "settings",
            "set",
            "financial.currency",
            "USD",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Settings {
                action: Some(SettingsAction::Set { .. })
            })
        ));
    }

    #[test]
    fn test_login_arguments() {
        let cli = Cli::try_parse_from([
            "marcenaria-admin",
            "login",
            "--email",
            "admin@marcenaria.com",
            "--password",
            "segredo",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());

        let cli = Cli::try_parse_from([
            "marcenaria-admin",
            "login",
            "--email",
            "  ",
            "--password",
            "segredo",
        ])
        .unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["marcenaria-admin", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_environment_aliases() {
        let cli = Cli::try_parse_from(["marcenaria-admin", "--env", "prod", "check"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Production)));
        assert!(matches!(cli.command, Some(Commands::Check)));
    }
}
