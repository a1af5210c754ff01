//! Expense Tracker CLI
//!
//! Command-line interface for recording expenses and reporting totals.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use expense_core::{Config, LedgerError, Store, SystemClock};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use output::{Output, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(cli.verbose, config.log_file.as_deref());

    let output = Output::new(
        OutputFormat::from_flags(cli.json, cli.quiet),
        config.currency.clone(),
    );

    // Config commands don't touch the ledger
    if let Commands::Config { command } = cli.command {
        return handle_config_command(command, cli.config.as_ref(), &output);
    }

    let store = match cli.file {
        Some(path) => Store::new(path),
        None => Store::from_config(&config),
    };
    debug!(path = ?store.path(), write = cli.command.is_write(), "using ledger");

    let clock = SystemClock;
    match cli.command {
        Commands::Add {
            description,
            amount,
        } => commands::expense::add(&store, description, amount, &clock, &output),
        Commands::Update {
            id,
            description,
            amount,
        } => commands::expense::update(&store, id, description, amount, &clock, &output),
        Commands::Delete { id } => commands::expense::delete(&store, id, &output),
        Commands::List => commands::expense::list(&store, &output),
        Commands::Summary { month } => commands::expense::summary(&store, month, &clock, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print the error chain and, if available, a recovery hint
fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);

    let hint = err
        .chain()
        .find_map(|e| e.downcast_ref::<LedgerError>())
        .and_then(LedgerError::recovery_suggestion);
    if let Some(hint) = hint {
        eprintln!("Hint: {}", hint);
    }
}

/// Set up tracing output
///
/// `RUST_LOG` wins over the verbosity flag. Logs go to stderr unless a log
/// file is configured.
fn init_logging(verbose: u8, log_file: Option<&Path>) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "expense_core={},expense_cli={}",
            log_level, log_level
        ))
    });

    if let Some(path) = log_file {
        match File::options().create(true).append(true).open(path) {
            Ok(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not open log file {:?}: {}", path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
