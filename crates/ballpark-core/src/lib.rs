//! Ballpark Core Library
//!
//! Shared functionality for the Ballpark spending-guessing game:
//! - CSV ingestion for bank and budgeting-app transaction exports
//! - Date windows (presets, calendar years and months) and date filtering
//! - Spending aggregation by retailer or category
//! - Guess scoring (percent-off, accuracy tiers, session score)

pub mod aggregate;
pub mod daterange;
pub mod error;
pub mod import;
pub mod models;
pub mod scoring;

pub use aggregate::{aggregate, observed_span, total_spending};
pub use daterange::{
    available_years, custom_range, filter_by_range, parse_date, preset_range, preset_range_from,
};
pub use error::{Error, Result};
pub use import::{detect_columns, normalize_record, parse_amount, parse_transactions, ColumnMapping};
pub use models::{
    AggregateOptions, DatePreset, DateRange, GameResult, GroupMode, SpendingCategory, Transaction,
};
pub use scoring::{accuracy_rating, overall_score, percent_difference, score_round, Rating};
