//! Cycle length statistics.
//!
//! # Responsibility
//! - Average the start-to-start gaps of an ordered history.
//! - Predict the next start date from that average.
//!
//! # Invariants
//! - Gaps are taken between adjacent records in stored order. A history
//!   recorded out of chronological order contributes negative gaps instead
//!   of being sorted first.

use crate::model::period::PeriodRecord;
use chrono::{Duration, NaiveDate};

/// Average whole-day gap between adjacent start dates, in stored order.
///
/// Returns `None` for fewer than two records; one period has no cycle yet.
pub fn average_cycle_length(periods: &[PeriodRecord]) -> Option<f64> {
    if periods.len() < 2 {
        return None;
    }

    let gap_count = periods.len() - 1;
    let total_days: i64 = periods
        .windows(2)
        .map(|pair| (pair[1].start - pair[0].start).num_days())
        .sum();

    Some(total_days as f64 / gap_count as f64)
}

/// Predicted start date of the next period.
///
/// Adds the average gap, rounded down to whole days, to the start of the
/// last record in stored order. Returns `None` for fewer than two records,
/// or when the offset leaves the supported calendar range.
pub fn predict_next_start(periods: &[PeriodRecord]) -> Option<NaiveDate> {
    let average = average_cycle_length(periods)?;
    let last = periods.last()?;
    let offset_days = average.floor() as i64;
    last.start.checked_add_signed(Duration::days(offset_days))
}

#[cfg(test)]
mod tests {
    use super::{average_cycle_length, predict_next_start};
    use crate::model::period::PeriodRecord;
    use chrono::NaiveDate;

    fn date(text: &str) -> NaiveDate {
        text.parse().expect("valid test date")
    }

    fn record(start: &str, end: &str) -> PeriodRecord {
        PeriodRecord::new(date(start), date(end))
    }

    #[test]
    fn average_is_absent_for_zero_or_one_record() {
        assert_eq!(average_cycle_length(&[]), None);
        assert_eq!(
            average_cycle_length(&[record("2024-01-01", "2024-01-05")]),
            None
        );
        assert_eq!(predict_next_start(&[]), None);
        assert_eq!(
            predict_next_start(&[record("2024-01-01", "2024-01-05")]),
            None
        );
    }

    #[test]
    fn average_of_regular_history_is_exact() {
        let history = [
            record("2024-01-01", "2024-01-05"),
            record("2024-01-29", "2024-02-02"),
            record("2024-02-26", "2024-03-01"),
        ];

        assert_eq!(average_cycle_length(&history), Some(28.0));
    }

    #[test]
    fn prediction_adds_average_to_last_stored_start() {
        let history = [
            record("2024-01-01", "2024-01-05"),
            record("2024-01-29", "2024-02-02"),
            record("2024-02-26", "2024-03-01"),
        ];

        assert_eq!(predict_next_start(&history), Some(date("2024-03-25")));
    }

    #[test]
    fn fractional_average_rounds_down_when_predicting() {
        // Gaps of 27 and 28 days average 27.5; the prediction moves 27 days.
        let history = [
            record("2024-01-01", "2024-01-05"),
            record("2024-01-28", "2024-02-01"),
            record("2024-02-25", "2024-02-29"),
        ];

        assert_eq!(average_cycle_length(&history), Some(27.5));
        assert_eq!(predict_next_start(&history), Some(date("2024-03-23")));
    }

    #[test]
    fn out_of_order_history_averages_signed_gaps() {
        let history = [
            record("2024-01-29", "2024-02-02"),
            record("2024-01-01", "2024-01-05"),
        ];

        assert_eq!(average_cycle_length(&history), Some(-28.0));
        assert_eq!(predict_next_start(&history), Some(date("2023-12-04")));
    }

    #[test]
    fn equal_starts_average_zero_and_still_predict() {
        let history = [
            record("2024-01-01", "2024-01-05"),
            record("2024-01-01", "2024-01-04"),
        ];

        assert_eq!(average_cycle_length(&history), Some(0.0));
        assert_eq!(predict_next_start(&history), Some(date("2024-01-01")));
    }
}
