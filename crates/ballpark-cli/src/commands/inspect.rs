//! Export inspection commands

use std::path::Path;

use anyhow::Result;
use ballpark_core::{available_years, observed_span, total_spending};

use super::{format_currency_detailed, load_transactions};

pub fn cmd_inspect(file: &Path, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    println!();
    println!("🧾 {}", file.display());
    println!("   ─────────────────────────────────────────────");
    println!("   Transactions: {}", transactions.len());
    if let Some(span) = observed_span(&transactions) {
        println!("   Date span:    {}", span);
    }
    println!(
        "   Total spent:  {}",
        format_currency_detailed(total_spending(&transactions))
    );

    let years = available_years(&transactions);
    if !years.is_empty() {
        let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        println!("   Years:        {}", years.join(", "));
    }

    Ok(())
}

pub fn cmd_years(file: &Path) -> Result<()> {
    let transactions = load_transactions(file)?;
    for year in available_years(&transactions) {
        println!("{}", year);
    }
    Ok(())
}
