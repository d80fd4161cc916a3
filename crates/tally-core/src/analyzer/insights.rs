//! Spending insights: a plain totals view with no suggestion or pattern logic

use crate::error::{Error, Result};
use crate::models::{parse_amount, ExpenseRecord, RawAmount, SpendingInsights, NO_LABEL};

use super::aggregate::GroupTotals;

/// Default window for insights
pub const DEFAULT_INSIGHT_DAYS: f64 = 30.0;

/// Window length from a request; absent means the default
pub fn resolve_days(days: Option<&RawAmount>) -> Result<f64> {
    match days {
        None => Ok(DEFAULT_INSIGHT_DAYS),
        Some(raw) => parse_amount(raw)
            .ok_or_else(|| Error::InvalidData(format!("days must be a number, got {}", raw))),
    }
}

pub(crate) fn spending_insights(records: &[ExpenseRecord], days: f64) -> Result<SpendingInsights> {
    if !days.is_finite() || days <= 0.0 {
        return Err(Error::InvalidData(format!(
            "days must be a positive number, got {}",
            days
        )));
    }

    let mut categories = GroupTotals::new();
    let mut payment_methods = GroupTotals::new();
    let mut total = 0.0;

    for record in records {
        total += record.amount;
        categories.add(&record.category, record.amount);
        payment_methods.add(&record.payment_method, record.amount);
    }

    let top_label = |totals: &GroupTotals| {
        totals
            .top()
            .map(|e| e.label.clone())
            .unwrap_or_else(|| NO_LABEL.to_string())
    };

    Ok(SpendingInsights {
        total_spending: total,
        average_daily_spending: total / days,
        top_category: top_label(&categories),
        top_payment_method: top_label(&payment_methods),
        category_breakdown: categories.to_breakdown(),
        payment_method_breakdown: payment_methods.to_breakdown(),
        transaction_count: records.len(),
        // Fractional windows are reported by their whole days
        days_analyzed: days.trunc() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(amount: f64, category: &str, method: &str) -> ExpenseRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        ExpenseRecord::new(ts, amount, category, method)
    }

    #[test]
    fn test_insights_average_over_days() {
        let records = vec![
            record(300.0, "Food", "Card"),
            record(200.0, "Fuel", "Cash"),
        ];
        let insights = spending_insights(&records, 10.0).unwrap();

        assert_eq!(insights.total_spending, 500.0);
        assert_eq!(insights.average_daily_spending, 50.0);
        assert_eq!(insights.top_category, "Food");
        assert_eq!(insights.top_payment_method, "Card");
        assert_eq!(insights.transaction_count, 2);
        assert_eq!(insights.days_analyzed, 10);
        assert_eq!(insights.category_breakdown.get("Fuel"), Some(&200.0));
    }

    #[test]
    fn test_insights_empty_defaults_to_none_labels() {
        let insights = spending_insights(&[], DEFAULT_INSIGHT_DAYS).unwrap();
        assert_eq!(insights.total_spending, 0.0);
        assert_eq!(insights.top_category, NO_LABEL);
        assert_eq!(insights.top_payment_method, NO_LABEL);
        assert!(insights.category_breakdown.is_empty());
        assert_eq!(insights.days_analyzed, 30);
    }

    #[test]
    fn test_insights_rejects_zero_days() {
        let err = spending_insights(&[record(1.0, "A", "B")], 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_insights_rejects_negative_and_non_finite_days() {
        for days in [-3.0, f64::NAN, f64::INFINITY] {
            let err = spending_insights(&[record(1.0, "A", "B")], days).unwrap_err();
            assert!(matches!(err, Error::InvalidData(_)));
            assert!(!err.is_input_missing());
        }
    }

    #[test]
    fn test_insights_fractional_days() {
        let insights = spending_insights(&[record(150.0, "Food", "Card")], 7.5).unwrap();
        assert_eq!(insights.average_daily_spending, 20.0);
        assert_eq!(insights.days_analyzed, 7);
    }

    #[test]
    fn test_resolve_days() {
        assert_eq!(resolve_days(None).unwrap(), DEFAULT_INSIGHT_DAYS);
        assert_eq!(resolve_days(Some(&RawAmount::Number(7.5))).unwrap(), 7.5);
        assert_eq!(resolve_days(Some(&"14".into())).unwrap(), 14.0);

        let flag = RawAmount::Other(serde_json::Value::Bool(true));
        let err = resolve_days(Some(&flag)).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
