//! Date windows and date-based filtering
//!
//! Transactions keep their date as raw cell text; everything here parses on
//! demand. A date that fails to parse simply never matches a window and
//! never contributes a year, mirroring the skip-don't-fail policy of
//! ingestion.

use chrono::{Datelike, Months, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::models::{DatePreset, DateRange, Transaction};

/// Parse a date string in the common export formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%Y-%m-%d", // 2024-01-15
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}

/// Resolve a preset to a concrete window anchored at today (UTC)
pub fn preset_range(preset: DatePreset) -> DateRange {
    preset_range_from(preset, Utc::now().date_naive())
}

/// Resolve a preset against an explicit anchor date.
///
/// The anchor becomes the window's end; the start is N calendar months
/// earlier, with the day clamped to the target month's last day when the
/// anchor's day does not exist there (e.g. Mar 31 minus one month).
pub fn preset_range_from(preset: DatePreset, today: NaiveDate) -> DateRange {
    let months_back = match preset {
        DatePreset::LastMonth => 1,
        DatePreset::Last3Months => 3,
        DatePreset::Last6Months => 6,
        DatePreset::Last12Months => 12,
        DatePreset::AllTime => {
            return DateRange::new(
                NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
            );
        }
    };

    let start = today
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(today);
    DateRange::new(start, today)
}

/// Build a window for a calendar year, or a single month of it.
///
/// The month's last day is found by backing up one day from the first of
/// the following month.
pub fn custom_range(year: i32, month: Option<u32>) -> Result<DateRange> {
    match month {
        Some(month) => {
            let start = NaiveDate::from_ymd_opt(year, month, 1)
                .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, month)))?;
            let end = start
                .checked_add_months(Months::new(1))
                .and_then(|d| d.pred_opt())
                .ok_or_else(|| Error::InvalidDate(format!("{}-{:02}", year, month)))?;
            Ok(DateRange::new(start, end))
        }
        None => {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .ok_or_else(|| Error::InvalidDate(format!("year {}", year)))?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)
                .ok_or_else(|| Error::InvalidDate(format!("year {}", year)))?;
            Ok(DateRange::new(start, end))
        }
    }
}

/// Keep transactions whose date falls within the window, inclusive on both
/// ends. `None` is the identity filter. Order is preserved; transactions
/// with unparseable dates are dropped.
pub fn filter_by_range(transactions: &[Transaction], range: Option<&DateRange>) -> Vec<Transaction> {
    let range = match range {
        Some(range) => range,
        None => return transactions.to_vec(),
    };

    transactions
        .iter()
        .filter(|t| parse_date(&t.date).is_some_and(|d| range.contains(d)))
        .cloned()
        .collect()
}

/// Distinct years present in the transactions, most recent first.
/// Unparseable dates are silently skipped.
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions
        .iter()
        .filter_map(|t| parse_date(&t.date))
        .map(|d| d.year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();
    years
}
