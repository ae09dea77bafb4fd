use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cap_cli::commands::{check, render, segments};
use cap_cli::{Cli, Commands, Config, Snapshot};

/// Load config and the planning snapshot, honoring a --data override.
fn load_snapshot(config_path: Option<&Path>, data_override: Option<&Path>) -> Result<Snapshot> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let path = data_override.unwrap_or(&config.data_path);
    Snapshot::load(path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Render {
            view,
            anchor,
            data,
            member,
            json,
        }) => {
            let snapshot = load_snapshot(cli.config.as_deref(), data.as_deref())?;
            let anchor = anchor.unwrap_or_else(|| Local::now().date_naive());
            render::run(&snapshot, view.level(), anchor, member.as_deref(), *json)?;
        }
        Some(Commands::Segments { duration, json }) => {
            segments::run(*duration, *json)?;
        }
        Some(Commands::Check {
            data,
            member,
            date,
            half,
        }) => {
            let snapshot = load_snapshot(cli.config.as_deref(), data.as_deref())?;
            check::run(&snapshot, member, *date, *half)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
