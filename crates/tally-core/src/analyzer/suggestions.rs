//! Suggestion rules
//!
//! Rules run in a fixed order and each appends at most one suggestion
//! (category concentration may append one per category). The list is
//! truncated to the configured maximum only after every rule has run, so
//! truncation never changes which rules fire.

use chrono::{Duration, NaiveDateTime};

use crate::config::AnalyzerConfig;
use crate::format::format_currency;
use crate::models::{ExpenseRecord, Priority, Suggestion, SuggestionType};

use super::aggregate::SpendingAggregate;

/// Share of total spending (percent) above which a category is flagged
const CATEGORY_SHARE_PERCENT: f64 = 40.0;

/// Daily deviation, as a fraction of the daily mean, considered erratic
pub(crate) const ERRATIC_DAILY_RATIO: f64 = 0.5;

/// Week-over-rest change (percent) needed to report a trend
const TREND_CHANGE_PERCENT: f64 = 20.0;

pub(crate) fn generate_suggestions(
    records: &[ExpenseRecord],
    agg: &SpendingAggregate,
    config: &AnalyzerConfig,
    now: NaiveDateTime,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let symbol = config.currency_symbol.as_str();
    let total = agg.total;

    // Spending level
    if total > config.thresholds.high {
        suggestions.push(Suggestion::new(
            SuggestionType::Warning,
            format!(
                "Your total spending of {} in the last {} days is quite high. Consider reviewing your expenses and identifying areas to cut back.",
                format_currency(total, symbol),
                config.window_days
            ),
            Priority::High,
        ));
    } else if total > config.thresholds.medium {
        suggestions.push(Suggestion::new(
            SuggestionType::Advice,
            format!(
                "Your spending of {} is moderate. Look for opportunities to optimize your budget.",
                format_currency(total, symbol)
            ),
            Priority::Medium,
        ));
    }

    // Category concentration
    for entry in agg.categories.iter() {
        let share = entry.total / total * 100.0;
        if share > CATEGORY_SHARE_PERCENT {
            suggestions.push(Suggestion::new(
                SuggestionType::Advice,
                format!(
                    "{} accounts for {:.1}% of your spending. Consider setting a specific budget for this category.",
                    entry.label, share
                ),
                Priority::Medium,
            ));
        }
    }

    // Daily variance
    if agg.daily_stats().varies_more_than(ERRATIC_DAILY_RATIO) {
        suggestions.push(Suggestion::new(
            SuggestionType::Tip,
            "Your daily spending varies significantly. Try to maintain more consistent spending patterns.",
            Priority::Low,
        ));
    }

    // Payment diversity
    if agg.payment_methods.len() == 1 {
        if let Some(method) = agg.payment_methods.iter().next() {
            suggestions.push(Suggestion::new(
                SuggestionType::Tip,
                format!(
                    "You only use {} for payments. Consider diversifying your payment methods for better tracking.",
                    method.label
                ),
                Priority::Low,
            ));
        }
    }

    // Recent trend. "Previous" is everything outside the recent window,
    // not a true prior week. A window reaching past the calendar range
    // counts every record as recent.
    let cutoff = Duration::try_days(config.recent_days).and_then(|d| now.checked_sub_signed(d));
    let (recent_count, recent_total) = records
        .iter()
        .filter(|r| cutoff.map_or(true, |c| r.timestamp >= c))
        .fold((0usize, 0.0), |(n, sum), r| (n + 1, sum + r.amount));

    if recent_count > 0 {
        let previous_total = total - recent_total;
        if previous_total > 0.0 {
            let change = (recent_total - previous_total) / previous_total * 100.0;
            if change > TREND_CHANGE_PERCENT {
                suggestions.push(Suggestion::new(
                    SuggestionType::Warning,
                    format!(
                        "Your spending increased by {:.1}% this week compared to the previous week.",
                        change
                    ),
                    Priority::Medium,
                ));
            } else if change < -TREND_CHANGE_PERCENT {
                suggestions.push(Suggestion::new(
                    SuggestionType::Positive,
                    format!(
                        "Great job! Your spending decreased by {:.1}% this week.",
                        change.abs()
                    ),
                    Priority::Low,
                ));
            }
        }
    }

    if suggestions.len() < config.min_suggestions {
        suggestions.push(Suggestion::new(
            SuggestionType::Tip,
            "Track your expenses regularly to better understand your spending patterns and identify opportunities to save.",
            Priority::Low,
        ));
    }

    suggestions.truncate(config.max_suggestions);
    suggestions
}
