//! Domain models for Ballpark

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single spending transaction, post-normalization.
///
/// Only rows that represent actual spending survive ingestion: transfers,
/// pure inflows, and zero-amount rows are filtered out before this type is
/// ever constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Raw date cell text, trimmed; parsed on demand for range comparisons
    pub date: String,
    /// Merchant/payee label; the grouping key in retailer mode
    pub description: String,
    /// Spend magnitude, always > 0 (sign already resolved)
    pub amount: f64,
    /// Grouping key in category mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Aggregate spending for one retailer or category within a window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingCategory {
    pub name: String,
    /// Sum of transaction amounts in the group
    pub amount: f64,
    /// Number of transactions in the group
    pub transaction_count: usize,
}

/// Outcome of one guess in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub category_name: String,
    pub guess: f64,
    pub actual: f64,
    /// Signed miss: actual minus guess (positive = underestimate)
    pub difference: f64,
    /// How far off the guess was, as a percentage of actual
    pub percent_off: f64,
}

/// An inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether a date falls within the window, inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whole months between start and end, ignoring day-of-month
    pub fn months_spanned(&self) -> i32 {
        let years = self.end.year() - self.start.year();
        let months = self.end.month() as i32 - self.start.month() as i32;
        years * 12 + months
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%b %Y"),
            self.end.format("%b %Y")
        )
    }
}

/// How transactions are bucketed for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Group by transaction description (merchant/payee)
    #[default]
    Retailer,
    /// Group by the category column
    Category,
}

impl GroupMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retailer => "retailer",
            Self::Category => "category",
        }
    }
}

impl std::str::FromStr for GroupMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "retailer" => Ok(Self::Retailer),
            "category" => Ok(Self::Category),
            _ => Err(format!("Unknown mode: {} (valid: retailer, category)", s)),
        }
    }
}

impl std::fmt::Display for GroupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named date window relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DatePreset {
    #[serde(rename = "last-month")]
    LastMonth,
    #[serde(rename = "last-3-months")]
    Last3Months,
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[default]
    #[serde(rename = "last-12-months")]
    Last12Months,
    /// Sentinel wide-open window (2000-01-01 through 2099-12-31)
    #[serde(rename = "all-time")]
    AllTime,
}

impl DatePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastMonth => "last-month",
            Self::Last3Months => "last-3-months",
            Self::Last6Months => "last-6-months",
            Self::Last12Months => "last-12-months",
            Self::AllTime => "all-time",
        }
    }
}

impl std::str::FromStr for DatePreset {
    type Err = std::convert::Infallible;

    /// Unrecognized preset names resolve to `Last12Months`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "last-month" => Self::LastMonth,
            "last-3-months" => Self::Last3Months,
            "last-6-months" => Self::Last6Months,
            "last-12-months" => Self::Last12Months,
            "all-time" => Self::AllTime,
            _ => Self::Last12Months,
        })
    }
}

impl std::fmt::Display for DatePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options for one aggregation call.
///
/// Each game round passes a fresh set of options; the aggregator holds no
/// state between calls, so `exclude_names` must carry every name already
/// revealed in earlier rounds.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub mode: GroupMode,
    /// Max groups returned
    pub top_n: usize,
    /// Drop groups whose total is below this
    pub min_amount: f64,
    /// Optional inclusive filter window; `None` means no date filtering
    pub date_range: Option<DateRange>,
    /// Group keys to omit entirely (already guessed)
    pub exclude_names: Vec<String>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            mode: GroupMode::Retailer,
            top_n: 10,
            min_amount: 0.0,
            date_range: None,
            exclude_names: Vec::new(),
        }
    }
}
