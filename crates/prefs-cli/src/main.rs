//! prefs CLI - Command-line interface for client settings
//!
//! Shows and edits focus delays, debug switches and onboarding state stored in
//! the local settings database.

mod cli;
mod commands;
mod error;


use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands, DebugCommands, FocusCommands, OnboardingCommands};
use crate::commands::common::resolve_db_path;
use crate::commands::debug::{
    run_debug_episodes, run_debug_mode, run_debug_show, run_onboarding_reset,
};
use crate::commands::focus::{run_focus_reset, run_focus_set, run_focus_show};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Some(Commands::Focus { command }) => match command {
            FocusCommands::Show { json } => run_focus_show(json, &db_path).await?,
            FocusCommands::Set { field, value } => {
                run_focus_set(field.into(), &value, &db_path).await?;
            }
            FocusCommands::Reset => run_focus_reset(&db_path).await?,
        },
        Some(Commands::Debug { command }) => match command {
            DebugCommands::Show { json } => run_debug_show(json, &db_path).await?,
            DebugCommands::Mode { state } => {
                run_debug_mode(state.is_on(), &db_path).await?;
            }
            DebugCommands::Episodes { state } => {
                run_debug_episodes(state.is_on(), &db_path).await?;
            }
        },
        Some(Commands::Onboarding { command }) => match command {
            OnboardingCommands::Reset => {
                run_onboarding_reset(&db_path).await?;
            }
        },
        None => {
            Cli::command().print_help().map_err(CliError::Io)?;
            println!();
        }
    }

    Ok(())
}

fn init_tracing() -> Result<(), CliError> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["prefs_cli=info", "prefs_core=info"] {
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?,
        );
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
