//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::list::ListFilters;
use super::handlers::{
    CheckCommandHandler, CommandOutput, DashboardCommandHandler, ListCommandHandler,
    SessionCommandHandler, SettingsCommandHandler,
};
use super::parser::{Cli, Commands, SettingsAction, TabArg};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::list::{Clients, Payments, Professionals, Quotes, Services};
use crate::state::AppContext;

/// Execute a CLI command with the given settings
///
/// `check` runs offline; every other command builds an [`AppContext`],
/// which restores the stored session first. No command defaults to the
/// dashboard.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<CommandOutput> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Check) => CheckCommandHandler::new(settings).execute(),
        command => {
            let ctx = AppContext::new(settings)?;
            dispatch(&ctx, command.as_ref().unwrap_or(&Commands::Dashboard)).await
        }
    }
}

/// Runs `command` against an existing context.
pub async fn dispatch(ctx: &AppContext, command: &Commands) -> AppResult<CommandOutput> {
    let lists = ListCommandHandler::new(ctx);

    match command {
        Commands::Login { email, password } => {
            SessionCommandHandler::new(ctx).login(email, password).await
        }
        Commands::Logout => Ok(SessionCommandHandler::new(ctx).logout()),
        Commands::Whoami => SessionCommandHandler::new(ctx).whoami(),
        Commands::Dashboard => DashboardCommandHandler::new(ctx).execute().await,
        Commands::Clients { list, search } => {
            let filters = ListFilters {
                search: search.as_deref(),
                ..Default::default()
            };
            lists
                .execute::<Clients>(list.page, list.limit, filters)
                .await
        }
        Commands::Professionals { list, search } => {
            let filters = ListFilters {
                search: search.as_deref(),
                ..Default::default()
            };
            lists
                .execute::<Professionals>(list.page, list.limit, filters)
                .await
        }
        Commands::Services {
            list,
            status,
            category,
        } => {
            let filters = ListFilters {
                status: status.as_deref(),
                category: category.as_deref(),
                ..Default::default()
            };
            lists
                .execute::<Services>(list.page, list.limit, filters)
                .await
        }
        Commands::Quotes { list, status } => {
            let filters = ListFilters {
                status: status.as_deref(),
                ..Default::default()
            };
            lists.execute::<Quotes>(list.page, list.limit, filters).await
        }
        Commands::Payments { list, status } => {
            let filters = ListFilters {
                status: status.as_deref(),
                ..Default::default()
            };
            lists
                .execute::<Payments>(list.page, list.limit, filters)
                .await
        }
        Commands::Settings { action } => {
            let handler = SettingsCommandHandler::new(ctx);
            match action {
                None => handler.show(TabArg::General.into()),
                Some(SettingsAction::Show { tab }) => handler.show((*tab).into()),
                Some(SettingsAction::Set { key, value }) => handler.set(key, value),
                Some(SettingsAction::Reset) => handler.reset(),
            }
        }
        Commands::Check => CheckCommandHandler::new(ctx.settings().clone()).execute(),
    }
}

/// Validate command arguments before execution
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason: msg,
    })
}
