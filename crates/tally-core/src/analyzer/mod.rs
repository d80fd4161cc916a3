//! Expense Analyzer - suggestions and analysis over a batch of expenses
//!
//! The analyzer is a stateless transform: one batch in, one report out.
//! A single pass aggregates the batch, then the stages below read from it:
//!
//! - **Suggestions** - ordered rule evaluation, capped at five
//! - **Efficiency score** - 0-100 based on daily variance and small purchases
//! - **Patterns** - weekend, frequent-category and large-transaction patterns
//! - **Insights** - a separate totals-only view over a caller-chosen window
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::{ExpenseAnalyzer, RawExpense};
//!
//! let analyzer = ExpenseAnalyzer::new();
//! let report = analyzer.analyze_raw(&expenses)?;
//! ```

pub mod aggregate;
pub mod insights;
pub mod patterns;
pub mod score;
pub mod suggestions;

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::format::format_currency;
use crate::models::{
    parse_expenses, AnalysisReport, AnalysisSummary, ExpenseRecord, Priority, RawExpense,
    SpendingInsights, Suggestion, SuggestionType, NO_LABEL,
};

pub use aggregate::{GroupEntry, GroupTotals, SpendingAggregate};
pub use insights::{resolve_days, DEFAULT_INSIGHT_DAYS};
pub use patterns::{FREQUENT_CATEGORY_PATTERN, LARGE_TRANSACTION_PATTERN, WEEKEND_PATTERN};

/// Analyzer holding an immutable configuration; safe to share across threads
#[derive(Debug, Clone, Default)]
pub struct ExpenseAnalyzer {
    config: AnalyzerConfig,
}

impl ExpenseAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with an explicit configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Validate a raw batch and analyze it relative to the current local time
    ///
    /// Any invalid record fails the whole batch.
    pub fn analyze_raw(&self, raw: &[RawExpense]) -> Result<AnalysisReport> {
        let records = parse_expenses(raw)?;
        Ok(self.analyze(&records))
    }

    /// Analyze relative to the current local time
    pub fn analyze(&self, records: &[ExpenseRecord]) -> AnalysisReport {
        self.analyze_at(records, Local::now().naive_local())
    }

    /// Analyze relative to `now` (the end of the recent-week window)
    pub fn analyze_at(&self, records: &[ExpenseRecord], now: NaiveDateTime) -> AnalysisReport {
        if records.is_empty() {
            debug!("Empty batch, returning placeholder analysis");
            return self.empty_report();
        }

        let agg = SpendingAggregate::from_records(records);
        let window_days = f64::from(self.config.window_days);
        let average_daily = agg.total / window_days;

        let suggestions = suggestions::generate_suggestions(records, &agg, &self.config, now);
        let efficiency_score = score::efficiency_score(records, &agg);
        let patterns = patterns::identify_patterns(records, &agg);

        let (top_category, top_category_amount) = agg
            .categories
            .top()
            .map(|e| (e.label.clone(), e.total))
            .unwrap_or_else(|| (NO_LABEL.to_string(), 0.0));

        debug!(
            records = agg.count,
            total = agg.total,
            categories = agg.categories.len(),
            payment_methods = agg.payment_methods.len(),
            days = agg.daily.len(),
            suggestions = suggestions.len(),
            efficiency_score,
            patterns = patterns.len(),
            "Expense analysis complete"
        );

        let analysis = AnalysisSummary {
            total_spending: agg.total,
            average_daily_spending: average_daily,
            top_category,
            top_category_amount: Some(top_category_amount),
            category_breakdown: Some(agg.categories.to_breakdown()),
            payment_method_breakdown: Some(agg.payment_methods.to_breakdown()),
            efficiency_score: Some(efficiency_score),
            patterns: Some(patterns),
            message: format!(
                "Analysis complete for {} in spending over {} days.",
                format_currency(agg.total, &self.config.currency_symbol),
                self.config.window_days
            ),
        };

        AnalysisReport {
            suggestions,
            analysis,
        }
    }

    /// Validate a raw batch and compute insights over `days`
    pub fn insights_raw(&self, raw: &[RawExpense], days: f64) -> Result<SpendingInsights> {
        let records = parse_expenses(raw)?;
        self.insights(&records, days)
    }

    /// Totals-only view; `days` must be positive
    pub fn insights(&self, records: &[ExpenseRecord], days: f64) -> Result<SpendingInsights> {
        insights::spending_insights(records, days)
    }

    fn empty_report(&self) -> AnalysisReport {
        AnalysisReport {
            suggestions: vec![Suggestion::new(
                SuggestionType::Info,
                "No expense data available for analysis.",
                Priority::Low,
            )],
            analysis: AnalysisSummary {
                total_spending: 0.0,
                average_daily_spending: 0.0,
                top_category: NO_LABEL.to_string(),
                top_category_amount: None,
                category_breakdown: None,
                payment_method_breakdown: None,
                efficiency_score: None,
                patterns: None,
                message: "Start tracking your expenses to get personalized insights!".to_string(),
            },
        }
    }
}
