//! CSV ingestion for transaction exports
//!
//! Exports from YNAB, Mint, and most banks share the same rough shape but
//! disagree on header names, amount sign conventions, and whether spending
//! lives in one signed column or paired outflow/inflow columns. Ingestion
//! auto-detects the column layout from the header row, then normalizes each
//! record into a [`Transaction`], silently dropping rows that are not
//! spending (transfers, pure inflows, zero amounts).

use std::collections::HashMap;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;

// Accepted header spellings per canonical field, in priority order: the
// first spelling present in a file wins, so a file with both "Payee" and
// "Description" maps its description field to "Payee". Matching is
// case-insensitive. These tables also feed the missing-column error
// messages, so message and behavior cannot drift apart.
const DATE_HEADERS: &[&str] = &[
    "date",
    "transaction date",
    "posted date",
    "posting date",
    "trans date",
];
const DESCRIPTION_HEADERS: &[&str] = &["payee", "description", "merchant", "name", "memo description"];
const AMOUNT_HEADERS: &[&str] = &["amount", "debit", "withdrawal"];
const OUTFLOW_HEADERS: &[&str] = &["outflow"];
const INFLOW_HEADERS: &[&str] = &["inflow", "credit", "deposit"];
const CATEGORY_HEADERS: &[&str] = &["category", "categories"];
const ACCOUNT_HEADERS: &[&str] = &["account", "account name"];
const MEMO_HEADERS: &[&str] = &["memo", "notes", "note"];

/// Resolved column indices for one file's canonical fields.
///
/// Built once from the header row and consumed for every record. No field is
/// required to resolve here; the pipeline validates required fields before
/// normalizing rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    pub date: Option<usize>,
    pub description: Option<usize>,
    pub amount: Option<usize>,
    pub outflow: Option<usize>,
    pub inflow: Option<usize>,
    pub category: Option<usize>,
    pub account: Option<usize>,
    pub memo: Option<usize>,
}

/// Detect which columns map to the canonical fields
pub fn detect_columns(headers: &StringRecord) -> ColumnMapping {
    // Normalized header text -> column index. A duplicated header keeps the
    // rightmost column, matching plain insertion overwrite.
    let index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.trim().to_lowercase(), i))
        .collect();

    ColumnMapping {
        date: find_column(&index, DATE_HEADERS),
        description: find_column(&index, DESCRIPTION_HEADERS),
        amount: find_column(&index, AMOUNT_HEADERS),
        outflow: find_column(&index, OUTFLOW_HEADERS),
        inflow: find_column(&index, INFLOW_HEADERS),
        category: find_column(&index, CATEGORY_HEADERS),
        account: find_column(&index, ACCOUNT_HEADERS),
        memo: find_column(&index, MEMO_HEADERS),
    }
}

fn find_column(index: &HashMap<String, usize>, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|name| index.get(*name).copied())
}

/// Parse a currency string like "$1,234.56" into a number.
///
/// Currency symbols, thousands separators, and surrounding whitespace are
/// stripped before parsing. Empty, unparseable, or non-finite input yields
/// 0.0 rather than an error: a single malformed cell must not fail an
/// entire import.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.replace(['$', '€', '£', '¥', ',', ' '], "");
    // f64's grammar accepts "NaN" and "inf" (a NaN cell is a real artifact
    // of spreadsheet exports); a NaN amount would poison every total it is
    // summed into, so non-finite values read as 0 like any other bad cell.
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Fetch a cell by optional column index, trimmed; absent cells read as ""
fn cell<'a>(record: &'a StringRecord, column: Option<usize>) -> &'a str {
    column
        .and_then(|i| record.get(i))
        .map(str::trim)
        .unwrap_or("")
}

/// Promote a trimmed cell to `Some` only when non-empty
fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Normalize one raw record into a [`Transaction`], or `None` if the row is
/// not spending.
///
/// Exclusion rules, checked in order:
/// 1. empty description
/// 2. description containing "transfer" (inter-account moves are not spend)
/// 3. empty date
/// 4. unresolvable or non-positive amount
pub fn normalize_record(record: &StringRecord, mapping: &ColumnMapping) -> Option<Transaction> {
    let description = cell(record, mapping.description);
    if description.is_empty() {
        return None;
    }

    if description.to_lowercase().contains("transfer") {
        return None;
    }

    let date = cell(record, mapping.date);
    if date.is_empty() {
        return None;
    }

    let amount = if mapping.outflow.is_some() && mapping.inflow.is_some() {
        // Paired outflow/inflow model (YNAB-style): only outflows count as
        // spending; the inflow value never contributes to any aggregate.
        let outflow = parse_amount(cell(record, mapping.outflow));
        if outflow > 0.0 {
            outflow
        } else {
            return None;
        }
    } else if mapping.amount.is_some() {
        // Single amount column; some exports use negative for debits
        let amount = parse_amount(cell(record, mapping.amount)).abs();
        if amount <= 0.0 {
            return None;
        }
        amount
    } else {
        return None;
    };

    Some(Transaction {
        date: date.to_string(),
        description: description.to_string(),
        amount,
        category: optional(cell(record, mapping.category)),
        account: optional(cell(record, mapping.account)),
        memo: optional(cell(record, mapping.memo)),
    })
}

fn missing_column(label: &str, candidates: &[&str]) -> Error {
    Error::MissingColumn(format!(
        "Could not find {} column (expected: {})",
        label,
        candidates.join(", ")
    ))
}

/// Parse a transaction CSV export into normalized transactions.
///
/// The header row is required; columns are auto-detected per
/// [`detect_columns`]. A file with no data rows or with undetectable
/// date/description/amount columns is an error carrying a user-facing
/// message. Rows that fail normalization are skipped, never fatal, so an
/// empty result is a valid outcome for a file of nothing but transfers.
pub fn parse_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    if records.is_empty() {
        return Err(Error::EmptyFile);
    }

    let mapping = detect_columns(&headers);
    debug!("Detected columns: {:?}", mapping);

    if mapping.date.is_none() {
        return Err(missing_column("a date", DATE_HEADERS));
    }
    if mapping.description.is_none() {
        return Err(missing_column("a description", DESCRIPTION_HEADERS));
    }
    if mapping.amount.is_none() && mapping.outflow.is_none() {
        let accepted = [AMOUNT_HEADERS, OUTFLOW_HEADERS].concat();
        return Err(missing_column("an amount", &accepted));
    }

    let total = records.len();
    let transactions: Vec<Transaction> = records
        .iter()
        .filter_map(|record| normalize_record(record, &mapping))
        .collect();

    debug!(
        "Parsed {} transactions ({} of {} rows skipped)",
        transactions.len(),
        total - transactions.len(),
        total
    );
    Ok(transactions)
}
