use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Price provider error for {symbol}: {message}")]
    Provider { symbol: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Price table is empty after alignment; no date has a usable close for every pair")]
    EmptyPriceTable,

    #[error("No log-return rows survived the outlier filter")]
    NoReturns,

    #[error("Row for {date} has {got} values, table has {expected} columns")]
    Shape {
        date: NaiveDate,
        expected: usize,
        got: usize,
    },

    #[error("Invalid range [{start}, {end}] for a table of {len} rows")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
