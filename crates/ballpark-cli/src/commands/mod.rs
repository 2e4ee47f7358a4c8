//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `inspect` - Export summary and year listing commands
//! - `report` - Ranked spending table command + window flag resolution
//! - `play` - The interactive guessing game

pub mod inspect;
pub mod play;
pub mod report;

// Re-export command functions for main.rs
pub use inspect::*;
pub use play::*;
pub use report::*;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use ballpark_core::{parse_transactions, Transaction};

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Names come straight from user CSVs, so the cut must land on a
/// char boundary rather than a byte offset.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Open and parse a transaction export
pub fn load_transactions(file: &Path) -> Result<Vec<Transaction>> {
    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let transactions = parse_transactions(csv_file)?;
    tracing::debug!(
        "Loaded {} transactions from {}",
        transactions.len(),
        file.display()
    );
    Ok(transactions)
}

/// Format an amount as whole dollars with thousands separators, e.g. "$1,235"
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&format!("{:.0}", amount.abs())))
}

/// Format an amount with cents and thousands separators, e.g. "$1,234.56"
pub fn format_currency_detailed(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

/// Insert a comma every three digits, counting from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
