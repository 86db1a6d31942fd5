pub mod auth;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
#[cfg(test)]
mod test_support;
pub mod transcription;

use clap::Parser;

use crate::bootstrap::{bootstrap_env, AppPaths};
use crate::cli::{Cli, Command};
use crate::config::{load_config, validate_submission, AppConfig};
use crate::doctor::run_doctor;
use crate::error::AppResult;
use crate::transcription::{run_transcription_job, SpeechApiClient};

trait CommandExecutor {
    fn submit(&self, config: &AppConfig) -> AppResult<()>;
    fn doctor(&self, config: &AppConfig, json: bool) -> AppResult<()>;
}

struct DefaultCommandExecutor;

impl CommandExecutor for DefaultCommandExecutor {
    fn submit(&self, config: &AppConfig) -> AppResult<()> {
        validate_submission(config)?;
        bootstrap_env(config);

        let token = auth::mint_access_token()?;
        let client = SpeechApiClient::new(token);

        let runtime = tokio::runtime::Runtime::new()?;
        let outcome = runtime.block_on(run_transcription_job(&client, config))?;

        println!("Transcription complete.");
        println!("Check the output file at: {}", outcome.destination);
        Ok(())
    }

    fn doctor(&self, config: &AppConfig, json: bool) -> AppResult<()> {
        let report = run_doctor(config);
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", report.render_text());
        }
        Ok(())
    }
}

fn execute_command<E: CommandExecutor>(
    command: Command,
    config: &AppConfig,
    executor: &E,
) -> AppResult<()> {
    match command {
        Command::Submit => executor.submit(config),
        Command::Doctor { json } => executor.doctor(config, json),
    }
}

pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let paths = AppPaths::resolve()?;
    paths.ensure_dirs()?;

    let config = load_config(&paths, &cli.to_overrides())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.diagnostics.log_level)
            }),
        )
        .with_target(false)
        .with_level(true)
        .compact()
        .init();

    execute_command(cli.command, &config, &DefaultCommandExecutor)
}
