//! Domain models for Tally

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label used when a grouping has no entries
pub const NO_LABEL: &str = "None";

/// Amount as it arrives at the boundary: JSON number, numeric string, or
/// any other JSON value (rejected during validation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for RawAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Text field as it arrives at the boundary; non-strings are kept so the
/// record can be rejected with its position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Other(serde_json::Value),
}

impl RawText {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for RawText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawText {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for RawText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

/// An expense exactly as submitted, before validation
///
/// Deserialization never fails on a single entry: missing fields, wrongly
/// typed fields and non-object entries are all carried through so that
/// validation fails the batch as an analysis error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct RawExpense {
    pub date: Option<RawText>,
    pub amount: Option<RawAmount>,
    pub category: Option<RawText>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: Option<RawText>,
    /// The entry as received when it was not a JSON object
    #[serde(skip_serializing)]
    pub unrecognized: Option<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Record {
        date: Option<RawText>,
        amount: Option<RawAmount>,
        category: Option<RawText>,
        #[serde(rename = "paymentMethod")]
        payment_method: Option<RawText>,
    },
    Other(serde_json::Value),
}

impl From<RawEntry> for RawExpense {
    fn from(entry: RawEntry) -> Self {
        match entry {
            RawEntry::Record {
                date,
                amount,
                category,
                payment_method,
            } => Self {
                date,
                amount,
                category,
                payment_method,
                unrecognized: None,
            },
            RawEntry::Other(value) => Self {
                unrecognized: Some(value),
                ..Default::default()
            },
        }
    }
}

impl RawExpense {
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<RawAmount>,
        category: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(RawText::Text(date.into())),
            amount: Some(amount.into()),
            category: Some(RawText::Text(category.into())),
            payment_method: Some(RawText::Text(payment_method.into())),
            unrecognized: None,
        }
    }
}

/// A validated expense record
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub timestamp: NaiveDateTime,
    pub amount: f64,
    pub category: String,
    pub payment_method: String,
}

impl ExpenseRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        amount: f64,
        category: impl Into<String>,
        payment_method: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            amount,
            category: category.into(),
            payment_method: payment_method.into(),
        }
    }

    /// Calendar day of the expense (time of day dropped)
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Validate a raw expense; `index` is its position in the batch
    pub fn from_raw(index: usize, raw: &RawExpense) -> Result<Self> {
        if let Some(value) = &raw.unrecognized {
            return Err(Error::InvalidData(format!(
                "Expense {}: expected an object, got {}",
                index, value
            )));
        }

        let date = raw
            .date
            .as_ref()
            .ok_or(Error::MissingField { index, field: "date" })?;
        let timestamp = date
            .as_text()
            .and_then(parse_timestamp)
            .ok_or_else(|| Error::InvalidDate {
                index,
                value: date.to_string(),
            })?;

        let amount = raw.amount.as_ref().ok_or(Error::MissingField {
            index,
            field: "amount",
        })?;
        let amount = parse_amount(amount).ok_or_else(|| Error::InvalidAmount {
            index,
            value: amount.to_string(),
        })?;

        let category = text_field(index, "category", raw.category.as_ref())?;
        let payment_method = text_field(index, "paymentMethod", raw.payment_method.as_ref())?;

        Ok(Self {
            timestamp,
            amount,
            category,
            payment_method,
        })
    }
}

fn text_field(index: usize, field: &'static str, value: Option<&RawText>) -> Result<String> {
    match value {
        None => Err(Error::MissingField { index, field }),
        Some(RawText::Text(s)) => Ok(s.clone()),
        Some(RawText::Other(v)) => Err(Error::InvalidData(format!(
            "Expense {}: field '{}' must be a string, got {}",
            index, field, v
        ))),
    }
}

/// Validate a whole batch. The first bad record fails the batch.
pub fn parse_expenses(raw: &[RawExpense]) -> Result<Vec<ExpenseRecord>> {
    raw.iter()
        .enumerate()
        .map(|(index, expense)| ExpenseRecord::from_raw(index, expense))
        .collect()
}

/// Parse a timestamp in any of the accepted formats
///
/// Offsets are honoured by keeping the wall-clock time the string was
/// written in; date-only values land at midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    // Offsets without a colon, e.g. +0530
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = [
        "%Y-%m-%d", // 2024-01-15
        "%Y/%m/%d", // 2024/01/15
        "%m/%d/%Y", // 01/15/2024
    ];
    for fmt in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Convert a boundary amount to a finite f64
pub fn parse_amount(amount: &RawAmount) -> Option<f64> {
    let value = match amount {
        RawAmount::Number(n) => *n,
        RawAmount::Text(s) => s.trim().parse::<f64>().ok()?,
        RawAmount::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}

/// Kind of suggestion shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Info,
    Warning,
    Advice,
    Tip,
    Positive,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Advice => "advice",
            Self::Tip => "tip",
            Self::Positive => "positive",
        }
    }
}

impl std::fmt::Display for SuggestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggestion priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human-readable spending suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub suggestion_type: SuggestionType,
    pub message: String,
    pub priority: Priority,
}

impl Suggestion {
    pub fn new(suggestion_type: SuggestionType, message: impl Into<String>, priority: Priority) -> Self {
        Self {
            suggestion_type,
            message: message.into(),
            priority,
        }
    }
}

/// Label to summed amount
pub type Breakdown = BTreeMap<String, f64>;

/// Structured analysis summary
///
/// For an empty batch only the scalar fields are populated; the optional
/// fields are left out of the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_spending: f64,
    pub average_daily_spending: f64,
    pub top_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_category_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_breakdown: Option<Breakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_breakdown: Option<Breakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    pub message: String,
}

/// Result of analyzing one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub suggestions: Vec<Suggestion>,
    pub analysis: AnalysisSummary,
}

/// Read-only spending overview over a window of `days_analyzed` days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsights {
    pub total_spending: f64,
    pub average_daily_spending: f64,
    pub top_category: String,
    pub top_payment_method: String,
    pub category_breakdown: Breakdown,
    pub payment_method_breakdown: Breakdown,
    pub transaction_count: usize,
    pub days_analyzed: u64,
}

/// Request envelope for `analyze`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub expenses: Option<Vec<RawExpense>>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Request envelope for `insights`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightsRequest {
    pub expenses: Option<Vec<RawExpense>>,
    pub days: Option<RawAmount>,
}
