//! Tally Core Library
//!
//! Shared functionality for the Tally expense analyzer:
//! - Expense record validation at the boundary
//! - Expense analyzer (suggestions, efficiency score, patterns)
//! - Spending insights over a caller-chosen window
//! - Analyzer configuration (TOML with embedded defaults)
//! - JSON/CSV batch loading

pub mod analyzer;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod models;
pub mod stats;

pub use analyzer::{resolve_days, ExpenseAnalyzer, DEFAULT_INSIGHT_DAYS};
pub use config::{AnalyzerConfig, SpendingThresholds};
pub use error::{Error, Result};
pub use input::{read_batch, ExpenseBatch, InputFormat};
pub use models::{
    AnalysisReport, AnalysisSummary, AnalyzeRequest, ExpenseRecord, InsightsRequest, Priority,
    RawAmount, RawExpense, RawText, SpendingInsights, Suggestion, SuggestionType,
};
