//! Typokit CLI
//!
//! Inspects locale resolution, resolved typography settings and the
//! file-backed fragment cache store.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(found) => {
            if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs a command. `Ok(false)` means the lookup found nothing.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Locale { locale, format } => commands::locale::run_locale(&locale, format),
        Commands::Language { locale, candidates } => {
            commands::locale::run_language(&locale, &candidates)
        }
        Commands::Settings {
            options,
            locale,
            hyphenation_languages,
            diacritic_languages,
        } => commands::settings::run_settings(
            options.as_deref(),
            &locale,
            &hyphenation_languages,
            &diacritic_languages,
        )
        .map(|()| true),
        Commands::Cache {
            store,
            group,
            command,
        } => commands::cache::run_cache(&store, &group, command),
    }
}
