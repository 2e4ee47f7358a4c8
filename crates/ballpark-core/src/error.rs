//! Error types for ballpark-core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// The file parsed to zero data rows
    #[error("CSV file is empty")]
    EmptyFile,

    /// A required semantic column could not be detected from the header row.
    /// The message enumerates the accepted header spellings for the field.
    #[error("{0}")]
    MissingColumn(String),

    /// A year/month pair that does not form a real calendar date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    // Reader failures surface through csv::Error, which wraps the
    // underlying io::Error; file opens happen in the CLI, not here.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
