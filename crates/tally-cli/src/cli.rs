//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Understand where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Spending insights and analytics from a transaction snapshot", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file containing an array of transactions
    #[arg(short, long, default_value = "transactions.json", global = true)]
    pub file: PathBuf,

    /// Insight threshold overrides (TOML)
    ///
    /// Defaults to ~/.local/share/tally/config/insights.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate spending insights
    Insights {
        /// Print the batch as JSON
        #[arg(long)]
        json: bool,

        /// Reference date for month-based insights (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show top spending categories
    Top {
        /// Number of categories to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show the total spent in one category
    Total {
        /// Category name (e.g. "Food & Dining" or food_and_dining)
        category: String,
    },

    /// Show categories usually bought on the same day as another
    Related {
        /// Category name
        category: String,
    },

    /// Show spend per day
    Trends,

    /// Show the strongest same-day category pairs
    Connections {
        /// Number of pairs to show
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Show time-of-day spending patterns
    Patterns,

    /// Show effective insight thresholds
    Config,
}
