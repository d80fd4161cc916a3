//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Expense {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Expense {index}: unable to parse date '{value}'")]
    InvalidDate { index: usize, value: String },

    #[error("Expense {index}: unable to parse amount '{value}'")]
    InvalidAmount { index: usize, value: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the request envelope itself was unusable, as opposed to a
    /// failure while analyzing the records it carried
    pub fn is_input_missing(&self) -> bool {
        matches!(self, Error::MissingInput(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
