//! Reading expense batches from request bodies and files
//!
//! Accepted shapes:
//! - JSON envelope: `{"expenses": [...], "userId": ..., "days": ...}`
//! - Bare JSON array of expenses
//! - CSV with a `date,amount,category,paymentMethod` header

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawAmount, RawExpense, RawText};

/// Message used whenever the expenses collection is absent
pub const MISSING_EXPENSES: &str = "Missing expenses data";

/// File formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Pick a format from the file extension (JSON unless `.csv`)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("Unknown input format: {}", s)),
        }
    }
}

/// An expense batch plus whatever envelope fields came with it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseBatch {
    pub expenses: Vec<RawExpense>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub days: Option<RawAmount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    expenses: Option<Vec<RawExpense>>,
    user_id: Option<String>,
    user_name: Option<String>,
    days: Option<RawAmount>,
}

/// Deserialize a request body, treating empty or malformed JSON as missing input
pub fn parse_request<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::MissingInput("Request body is empty".into()));
    }
    serde_json::from_slice(body)
        .map_err(|e| Error::MissingInput(format!("Malformed request body: {}", e)))
}

/// Unwrap the expenses collection of an envelope
pub fn require_expenses(expenses: Option<Vec<RawExpense>>) -> Result<Vec<RawExpense>> {
    expenses.ok_or_else(|| Error::MissingInput(MISSING_EXPENSES.into()))
}

/// Parse a JSON envelope or bare array
pub fn parse_json_batch(body: &[u8]) -> Result<ExpenseBatch> {
    let value: serde_json::Value = parse_request(body)?;

    if value.is_array() {
        let expenses: Vec<RawExpense> = serde_json::from_value(value)
            .map_err(|e| Error::MissingInput(format!("Malformed expense list: {}", e)))?;
        return Ok(ExpenseBatch {
            expenses,
            ..Default::default()
        });
    }

    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|e| Error::MissingInput(format!("Malformed request body: {}", e)))?;

    Ok(ExpenseBatch {
        expenses: require_expenses(envelope.expenses)?,
        user_id: envelope.user_id,
        user_name: envelope.user_name,
        days: envelope.days,
    })
}

/// CSV row; empty cells become `None`
#[derive(Debug, Deserialize)]
struct CsvExpense {
    date: Option<String>,
    amount: Option<String>,
    category: Option<String>,
    #[serde(rename = "paymentMethod", alias = "payment_method")]
    payment_method: Option<String>,
}

/// Parse CSV with a header row
pub fn parse_csv_batch<R: Read>(reader: R) -> Result<ExpenseBatch> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for row in rdr.deserialize::<CsvExpense>() {
        let row = row?;
        expenses.push(RawExpense {
            date: row.date.map(RawText::Text),
            amount: row.amount.map(RawAmount::Text),
            category: row.category.map(RawText::Text),
            payment_method: row.payment_method.map(RawText::Text),
            unrecognized: None,
        });
    }

    debug!("Parsed {} expenses from CSV", expenses.len());
    Ok(ExpenseBatch {
        expenses,
        ..Default::default()
    })
}

/// Read a batch from disk
pub fn read_batch(path: &Path, format: Option<InputFormat>) -> Result<ExpenseBatch> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    debug!(path = %path.display(), ?format, "Reading expense batch");

    match format {
        InputFormat::Csv => parse_csv_batch(File::open(path)?),
        InputFormat::Json => {
            let bytes = std::fs::read(path)?;
            parse_json_batch(&bytes)
        }
    }
}
