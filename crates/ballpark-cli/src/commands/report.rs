//! Ranked spending report command

use std::path::Path;

use anyhow::{Context, Result};
use ballpark_core::{
    aggregate, custom_range, preset_range, AggregateOptions, DatePreset, DateRange, GroupMode,
};
use chrono::NaiveDate;

use super::{format_currency_detailed, load_transactions, truncate};

/// Resolve the window flags to an optional date range.
///
/// Explicit --from/--to dates win over --year (optionally narrowed by
/// --month), which wins over --preset; with no flags, no window is applied.
pub fn resolve_window(
    preset: Option<&str>,
    year: Option<i32>,
    month: Option<u32>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Option<DateRange>> {
    // If custom dates provided, use those
    if let (Some(from), Some(to)) = (from, to) {
        let start = NaiveDate::parse_from_str(from, "%Y-%m-%d")
            .context("Invalid --from date format (use YYYY-MM-DD)")?;
        let end = NaiveDate::parse_from_str(to, "%Y-%m-%d")
            .context("Invalid --to date format (use YYYY-MM-DD)")?;
        return Ok(Some(DateRange::new(start, end)));
    }
    if from.is_some() || to.is_some() {
        anyhow::bail!("--from and --to must be given together");
    }
    if let Some(year) = year {
        return Ok(Some(custom_range(year, month)?));
    }
    if month.is_some() {
        anyhow::bail!("--month requires --year");
    }
    Ok(preset.map(|p| {
        // Unrecognized preset names fall back to the last-12-months default
        let preset: DatePreset = p.parse().unwrap_or_default();
        preset_range(preset)
    }))
}

pub fn cmd_categories(
    file: &Path,
    mode: &str,
    window: Option<DateRange>,
    top: usize,
    min_amount: f64,
    exclude: Vec<String>,
    json: bool,
) -> Result<()> {
    let mode: GroupMode = mode.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let transactions = load_transactions(file)?;

    let options = AggregateOptions {
        mode,
        top_n: top,
        min_amount,
        date_range: window,
        exclude_names: exclude,
    };
    let categories = aggregate(&transactions, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!();
    match options.date_range {
        Some(ref range) => println!("📊 Top spending by {} ({})", mode, range),
        None => println!("📊 Top spending by {} (all transactions)", mode),
    }
    println!("   ──────────────────────────────────────────────────────────");

    if categories.is_empty() {
        println!("   No spending matched the filters.");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:30} │ {:>12} │ {:>5}",
        "Rank", "Name", "Amount", "Count"
    );
    println!("   ─────┼────────────────────────────────┼──────────────┼───────");
    for (i, category) in categories.iter().enumerate() {
        println!(
            "   {:>4} │ {:30} │ {:>12} │ {:>5}",
            i + 1,
            truncate(&category.name, 30),
            format_currency_detailed(category.amount),
            category.transaction_count
        );
    }

    Ok(())
}
