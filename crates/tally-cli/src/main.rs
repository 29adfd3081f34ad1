//! Tally CLI - Spending insights from a transaction snapshot
//!
//! Usage:
//!   tally insights                 Generate insights
//!   tally top --limit 5            Top spending categories
//!   tally related "Food & Dining"  Categories bought together
//!   tally config                   Show effective thresholds

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Config => commands::cmd_config(config_path),
        Commands::Insights { json, as_of } => {
            let today = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_insights(&cli.file, config_path, today, json)
        }
        Commands::Top { limit } => commands::cmd_top(&cli.file, limit),
        Commands::Total { category } => commands::cmd_total(&cli.file, &category),
        Commands::Related { category } => commands::cmd_related(&cli.file, &category),
        Commands::Trends => commands::cmd_trends(&cli.file),
        Commands::Connections { limit } => commands::cmd_connections(&cli.file, limit),
        Commands::Patterns => commands::cmd_patterns(&cli.file),
    }
}
