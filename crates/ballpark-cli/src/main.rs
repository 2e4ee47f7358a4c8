//! Ballpark CLI - How well do you know your own spending?
//!
//! Usage:
//!   ballpark inspect --file export.csv      Summarize a transaction export
//!   ballpark years --file export.csv        List years present in an export
//!   ballpark categories --file export.csv   Rank spending by retailer or category
//!   ballpark play --file export.csv         Guess your spending, get scored

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

    match cli.command {
        Commands::Inspect { file, json } => commands::cmd_inspect(&file, json),
        Commands::Years { file } => commands::cmd_years(&file),
        Commands::Categories {
            file,
            mode,
            preset,
            year,
            month,
            from,
            to,
            top,
            min_amount,
            exclude,
            json,
        } => {
            let window = commands::resolve_window(
                preset.as_deref(),
                year,
                month,
                from.as_deref(),
                to.as_deref(),
            )?;
            commands::cmd_categories(&file, &mode, window, top, min_amount, exclude, json)
        }
        Commands::Play {
            file,
            mode,
            preset,
            year,
            month,
            from,
            to,
            top,
            min_amount,
            output,
        } => {
            let window = commands::resolve_window(
                Some(&preset),
                year,
                month,
                from.as_deref(),
                to.as_deref(),
            )?;
            commands::cmd_play(&file, &mode, window, top, min_amount, output.as_deref())
        }
    }
}
