use std::process::ExitCode;

use clap::Parser;

use marcenaria_admin::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = marcenaria_admin::pkg_version(),
        environment = %settings.application.environment,
        "Starting marcenaria-admin"
    );

    match cli::execute_command(&cli, settings).await {
        Ok(output) => {
            print!("{}", output.text);
            Ok(if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Erro: {}", e.user_message());
            if e.is_unauthorized() {
                eprintln!("Use `marcenaria-admin login --email <EMAIL>` para entrar.");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
