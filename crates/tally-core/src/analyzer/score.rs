//! Spending efficiency score (0-100)

use crate::models::ExpenseRecord;

use super::aggregate::SpendingAggregate;
use super::suggestions::ERRATIC_DAILY_RATIO;

const BASE_SCORE: i32 = 100;
const ERRATIC_PENALTY: i32 = 20;
const SMALL_TRANSACTION_PENALTY: i32 = 15;
const CONSISTENCY_BONUS: i32 = 10;

/// Amounts below this count as small transactions
const SMALL_TRANSACTION_AMOUNT: f64 = 100.0;

/// Fraction of records that may be small before the penalty applies
const SMALL_TRANSACTION_SHARE: f64 = 0.3;

/// Daily deviation, as a fraction of the mean, considered consistent
const CONSISTENT_DAILY_RATIO: f64 = 0.2;

/// Score the batch; the erratic and consistent checks are independent and
/// leave a gap between 0.2 and 0.5 where neither applies.
pub(crate) fn efficiency_score(records: &[ExpenseRecord], agg: &SpendingAggregate) -> u8 {
    let mut score = BASE_SCORE;
    let daily = agg.daily_stats();

    if daily.varies_more_than(ERRATIC_DAILY_RATIO) {
        score -= ERRATIC_PENALTY;
    }

    let small = records
        .iter()
        .filter(|r| r.amount < SMALL_TRANSACTION_AMOUNT)
        .count();
    if small as f64 > records.len() as f64 * SMALL_TRANSACTION_SHARE {
        score -= SMALL_TRANSACTION_PENALTY;
    }

    if daily.varies_less_than(CONSISTENT_DAILY_RATIO) {
        score += CONSISTENCY_BONUS;
    }

    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn on_day(day: u32, amount: f64) -> ExpenseRecord {
        let ts = NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        ExpenseRecord::new(ts, amount, "Food", "Card")
    }

    fn score(records: &[ExpenseRecord]) -> u8 {
        efficiency_score(records, &SpendingAggregate::from_records(records))
    }

    #[test]
    fn test_single_small_record() {
        assert_eq!(score(&[on_day(1, 50.0)]), 85);
    }

    #[test]
    fn test_single_large_record_is_perfect() {
        assert_eq!(score(&[on_day(1, 500.0)]), 100);
    }

    #[test]
    fn test_consistent_spending_is_capped() {
        // bonus applies but the score cannot exceed 100
        let records = vec![on_day(1, 500.0), on_day(2, 505.0), on_day(3, 495.0)];
        assert_eq!(score(&records), 100);
    }

    #[test]
    fn test_consistent_bonus_offsets_small_penalty() {
        let records = vec![on_day(1, 50.0), on_day(2, 51.0), on_day(3, 49.0)];
        assert_eq!(score(&records), 95);
    }

    #[test]
    fn test_erratic_and_small() {
        let records = vec![on_day(1, 10.0), on_day(2, 20.0), on_day(3, 900.0)];
        // erratic (-20) and 2 of 3 small (-15)
        assert_eq!(score(&records), 65);
    }

    #[test]
    fn test_small_share_boundary() {
        // 3 of 10 small is exactly 30%: no penalty
        let mut records: Vec<ExpenseRecord> = (0..7).map(|_| on_day(1, 200.0)).collect();
        records.extend((0..3).map(|_| on_day(1, 50.0)));
        assert_eq!(score(&records), 100);

        records.push(on_day(1, 50.0));
        assert_eq!(score(&records), 85);
    }

    #[test]
    fn test_gap_between_thresholds() {
        // sd/mean ~0.35: neither penalty nor bonus
        let records = vec![on_day(1, 750.0), on_day(2, 1250.0)];
        assert_eq!(score(&records), 100);
    }
}
