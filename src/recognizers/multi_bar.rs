//! Window recognizer predicates.

use crate::bar::DerivedBar;

/// 3-bar peak: the middle bar's high strictly exceeds both neighbours' highs.
///
/// Rejects a window that is not exactly three bars long instead of indexing
/// out of bounds; the scanner always hands over full-size windows, so the
/// check only matters for direct callers.
pub(crate) fn peak(window: &[DerivedBar]) -> bool {
    let [left, middle, right] = window else {
        return false;
    };
    middle.high() > left.high() && middle.high() > right.high()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::{Interval, RawBar};
    use rust_decimal_macros::dec;

    fn bar_with_high(offset: u64, high: &str) -> DerivedBar {
        let high: rust_decimal::Decimal = high.parse().unwrap();
        DerivedBar::derive(RawBar {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Days::new(offset),
            interval: Interval::Day,
            ticker: "TEST".into(),
            open: dec!(5),
            high,
            low: dec!(4),
            close: dec!(5),
        })
        .unwrap()
    }

    fn highs(values: &[&str]) -> Vec<DerivedBar> {
        values
            .iter()
            .enumerate()
            .map(|(i, high)| bar_with_high(i as u64, high))
            .collect()
    }

    #[test]
    fn test_strict_local_maximum_matches() {
        assert!(peak(&highs(&["10", "15", "12"])));
    }

    #[test]
    fn test_monotonic_rise_is_not_a_peak() {
        assert!(!peak(&highs(&["10", "15", "20"])));
    }

    #[test]
    fn test_flat_highs_are_not_a_peak() {
        assert!(!peak(&highs(&["10", "10", "10"])));
    }

    #[test]
    fn test_wrong_window_length_is_rejected() {
        assert!(!peak(&highs(&["10", "15"])));
        assert!(!peak(&highs(&["10", "15", "12", "11"])));
        assert!(!peak(&[]));
    }
}
