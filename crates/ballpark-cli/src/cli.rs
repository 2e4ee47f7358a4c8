//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ballpark - Guess your own spending
#[derive(Parser)]
#[command(name = "ballpark")]
#[command(about = "A guessing game over your transaction exports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a transaction export
    Inspect {
        /// CSV file to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// Print the normalized transactions as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the years present in an export
    Years {
        /// CSV file to scan
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Rank spending by retailer or category
    Categories {
        /// CSV file to aggregate
        #[arg(short, long)]
        file: PathBuf,

        /// Grouping mode: retailer, category
        #[arg(short, long, default_value = "retailer")]
        mode: String,

        /// Date window preset: last-month, last-3-months, last-6-months,
        /// last-12-months, all-time
        #[arg(short, long)]
        preset: Option<String>,

        /// Limit to a calendar year (overrides --preset)
        #[arg(long)]
        year: Option<i32>,

        /// Limit to one month (1-12) of --year
        #[arg(long)]
        month: Option<u32>,

        /// Custom start date (YYYY-MM-DD) - overrides --preset and --year
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides --preset and --year
        #[arg(long)]
        to: Option<String>,

        /// Number of groups to show
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Drop groups whose total is below this amount
        #[arg(long, default_value = "0")]
        min_amount: f64,

        /// Group name to exclude (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Play the guessing game
    Play {
        /// CSV file to play against
        #[arg(short, long)]
        file: PathBuf,

        /// Grouping mode: retailer, category
        #[arg(short, long, default_value = "retailer")]
        mode: String,

        /// Date window preset (see `categories --help` for names)
        #[arg(short, long, default_value = "last-12-months")]
        preset: String,

        /// Limit to a calendar year (overrides --preset)
        #[arg(long)]
        year: Option<i32>,

        /// Limit to one month (1-12) of --year
        #[arg(long)]
        month: Option<u32>,

        /// Custom start date (YYYY-MM-DD) - overrides --preset and --year
        #[arg(long)]
        from: Option<String>,

        /// Custom end date (YYYY-MM-DD) - overrides --preset and --year
        #[arg(long)]
        to: Option<String>,

        /// Groups per round
        #[arg(short, long, default_value = "10")]
        top: usize,

        /// Drop groups whose total is below this amount
        #[arg(long, default_value = "50")]
        min_amount: f64,

        /// Write the scored results to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
