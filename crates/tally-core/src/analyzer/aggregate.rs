//! Aggregation pass shared by suggestions, scoring and patterns

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Breakdown, ExpenseRecord};
use crate::stats::DailyStats;

/// One label's running totals
#[derive(Debug, Clone, PartialEq)]
pub struct GroupEntry {
    pub label: String,
    pub total: f64,
    pub count: usize,
}

/// Amounts summed per label, kept in first-seen order
///
/// First-seen order is what makes [`GroupTotals::top`] deterministic when
/// two labels tie.
#[derive(Debug, Clone, Default)]
pub struct GroupTotals {
    entries: Vec<GroupEntry>,
    index: HashMap<String, usize>,
}

impl GroupTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, amount: f64) {
        match self.index.get(label) {
            Some(&i) => {
                let entry = &mut self.entries[i];
                entry.total += amount;
                entry.count += 1;
            }
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(GroupEntry {
                    label: label.to_string(),
                    total: amount,
                    count: 1,
                });
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&GroupEntry> {
        self.index.get(label).map(|&i| &self.entries[i])
    }

    /// Entry with the largest total; the earliest label wins a tie
    pub fn top(&self) -> Option<&GroupEntry> {
        self.entries.iter().fold(None, |best: Option<&GroupEntry>, entry| match best {
            Some(b) if entry.total <= b.total => Some(b),
            _ => Some(entry),
        })
    }

    /// Largest record count of any label
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    pub fn to_breakdown(&self) -> Breakdown {
        self.entries
            .iter()
            .map(|e| (e.label.clone(), e.total))
            .collect()
    }
}

/// Batch-wide totals computed in a single pass over the records
#[derive(Debug, Clone)]
pub struct SpendingAggregate {
    pub total: f64,
    pub count: usize,
    pub categories: GroupTotals,
    pub payment_methods: GroupTotals,
    pub daily: BTreeMap<NaiveDate, f64>,
}

impl SpendingAggregate {
    pub fn from_records(records: &[ExpenseRecord]) -> Self {
        let mut total = 0.0;
        let mut categories = GroupTotals::new();
        let mut payment_methods = GroupTotals::new();
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();

        for record in records {
            total += record.amount;
            categories.add(&record.category, record.amount);
            payment_methods.add(&record.payment_method, record.amount);
            *daily.entry(record.date()).or_insert(0.0) += record.amount;
        }

        Self {
            total,
            count: records.len(),
            categories,
            payment_methods,
            daily,
        }
    }

    /// Per-day totals in date order
    pub fn daily_totals(&self) -> Vec<f64> {
        self.daily.values().copied().collect()
    }

    pub fn daily_stats(&self) -> DailyStats {
        DailyStats::from_totals(&self.daily_totals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32, amount: f64, category: &str, method: &str) -> ExpenseRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        ExpenseRecord::new(ts, amount, category, method)
    }

    #[test]
    fn test_group_totals_first_seen_order() {
        let mut totals = GroupTotals::new();
        totals.add("Rent", 100.0);
        totals.add("Food", 20.0);
        totals.add("Rent", 50.0);

        let labels: Vec<&str> = totals.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Rent", "Food"]);
        assert_eq!(totals.get("Rent").unwrap().total, 150.0);
        assert_eq!(totals.get("Rent").unwrap().count, 2);
        assert_eq!(totals.max_count(), 2);
    }

    #[test]
    fn test_top_breaks_ties_by_first_seen() {
        let mut totals = GroupTotals::new();
        totals.add("Zeta", 30.0);
        totals.add("Alpha", 30.0);
        assert_eq!(totals.top().unwrap().label, "Zeta");

        totals.add("Alpha", 0.5);
        assert_eq!(totals.top().unwrap().label, "Alpha");

        assert!(GroupTotals::new().top().is_none());
    }

    #[test]
    fn test_aggregate_groups_by_day_ignoring_time() {
        let records = vec![
            record(1, 9, 10.0, "Food", "Cash"),
            record(1, 21, 15.0, "Food", "Card"),
            record(2, 12, 5.0, "Fuel", "Card"),
        ];
        let agg = SpendingAggregate::from_records(&records);

        assert_eq!(agg.total, 30.0);
        assert_eq!(agg.count, 3);
        assert_eq!(agg.daily.len(), 2);
        assert_eq!(agg.daily_totals(), vec![25.0, 5.0]);
        assert_eq!(agg.categories.len(), 2);
        assert_eq!(agg.payment_methods.get("Card").unwrap().total, 20.0);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let records = vec![
            record(1, 9, 10.1, "Food", "Cash"),
            record(3, 9, 20.2, "Fuel", "Card"),
            record(5, 9, 30.3, "Food", "UPI"),
        ];
        let agg = SpendingAggregate::from_records(&records);
        let sum: f64 = agg.categories.to_breakdown().values().sum();
        assert!((sum - agg.total).abs() <= 1e-9 * agg.total.abs());
    }
}
