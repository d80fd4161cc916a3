//! Spending pattern detection

use chrono::Datelike;

use crate::models::ExpenseRecord;
use crate::stats::percentile;

use super::aggregate::SpendingAggregate;

pub const WEEKEND_PATTERN: &str = "Higher spending on weekends";
pub const FREQUENT_CATEGORY_PATTERN: &str = "Frequent expenses in certain categories";
pub const LARGE_TRANSACTION_PATTERN: &str = "Occasional large transactions";

/// Weekend total must exceed the weekday total by this factor
const WEEKEND_FACTOR: f64 = 1.5;

/// A category with more records than this is "frequent"
const FREQUENT_CATEGORY_COUNT: usize = 5;

/// Amounts above this quantile are "large"
const LARGE_TRANSACTION_QUANTILE: f64 = 0.9;

/// Detect patterns, in fixed order: weekend, frequent category, large transactions
pub(crate) fn identify_patterns(records: &[ExpenseRecord], agg: &SpendingAggregate) -> Vec<String> {
    let mut patterns = Vec::new();

    let (weekend, weekday) = records.iter().fold((0.0, 0.0), |(weekend, weekday), r| {
        if r.timestamp.weekday().num_days_from_monday() >= 5 {
            (weekend + r.amount, weekday)
        } else {
            (weekend, weekday + r.amount)
        }
    });
    if weekday > 0.0 && weekend > weekday * WEEKEND_FACTOR {
        patterns.push(WEEKEND_PATTERN.to_string());
    }

    if agg.categories.max_count() > FREQUENT_CATEGORY_COUNT {
        patterns.push(FREQUENT_CATEGORY_PATTERN.to_string());
    }

    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    if let Some(cutoff) = percentile(&amounts, LARGE_TRANSACTION_QUANTILE) {
        if amounts.iter().any(|&a| a > cutoff) {
            patterns.push(LARGE_TRANSACTION_PATTERN.to_string());
        }
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-06-01 is a Saturday
    fn on(day: u32, amount: f64, category: &str) -> ExpenseRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        ExpenseRecord::new(ts, amount, category, "Card")
    }

    fn patterns(records: &[ExpenseRecord]) -> Vec<String> {
        identify_patterns(records, &SpendingAggregate::from_records(records))
    }

    #[test]
    fn test_weekend_spending() {
        // Sat + Sun = 400 vs Mon = 100
        let records = vec![on(1, 200.0, "A"), on(2, 200.0, "B"), on(3, 100.0, "C")];
        assert!(patterns(&records).contains(&WEEKEND_PATTERN.to_string()));

        // weekend only: weekday total is zero, so no pattern
        let records = vec![on(1, 200.0, "A"), on(2, 200.0, "B")];
        assert!(!patterns(&records).contains(&WEEKEND_PATTERN.to_string()));

        // exactly 1.5x is not enough
        let records = vec![on(1, 150.0, "A"), on(3, 100.0, "B")];
        assert!(!patterns(&records).contains(&WEEKEND_PATTERN.to_string()));
    }

    #[test]
    fn test_frequent_category() {
        let mut records: Vec<ExpenseRecord> = (3..8).map(|d| on(d, 10.0, "Coffee")).collect();
        assert!(!patterns(&records).contains(&FREQUENT_CATEGORY_PATTERN.to_string()));

        records.push(on(10, 10.0, "Coffee"));
        assert!(patterns(&records).contains(&FREQUENT_CATEGORY_PATTERN.to_string()));
    }

    #[test]
    fn test_large_transactions() {
        let records = vec![
            on(3, 10.0, "A"),
            on(4, 12.0, "B"),
            on(5, 11.0, "C"),
            on(6, 500.0, "D"),
        ];
        assert_eq!(patterns(&records), vec![LARGE_TRANSACTION_PATTERN.to_string()]);
    }

    #[test]
    fn test_equal_amounts_have_no_outlier() {
        let records = vec![on(3, 10.0, "A"), on(4, 10.0, "B")];
        assert!(patterns(&records).is_empty());
        assert!(patterns(&[on(3, 99.0, "A")]).is_empty());
    }

    #[test]
    fn test_all_three_in_order() {
        let mut records: Vec<ExpenseRecord> = (0..6).map(|_| on(3, 10.0, "Coffee")).collect();
        records.push(on(1, 1000.0, "Party"));
        assert_eq!(
            patterns(&records),
            vec![
                WEEKEND_PATTERN.to_string(),
                FREQUENT_CATEGORY_PATTERN.to_string(),
                LARGE_TRANSACTION_PATTERN.to_string(),
            ]
        );
    }
}
