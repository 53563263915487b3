// ABOUTME: Small arithmetic helpers shared by page summaries
// ABOUTME: Completion percentages and body mass index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calisthenics Tracker Contributors

/// Whole-number percentage of `done` over `total`, 0 when `total` is 0
///
/// Halves round to the nearest even number.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn completion_percentage(done: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round_ties_even() as i64
}

/// Body mass index rounded to one decimal
///
/// `None` when either height or weight is missing or not positive.
#[must_use]
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| *h > 0.0)?;
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let meters = height / 100.0;
    Some(round_to(weight / (meters * meters), 1))
}

/// Round to `places` decimal places
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(0, 0), 0);
        assert_eq!(completion_percentage(1, 3), 33);
        assert_eq!(completion_percentage(2, 3), 67);
        assert_eq!(completion_percentage(4, 4), 100);
        // 1/8 = 12.5 rounds to even
        assert_eq!(completion_percentage(1, 8), 12);
    }

    #[test]
    fn test_bmi() {
        assert_eq!(bmi(Some(180.0), Some(81.0)), Some(25.0));
        assert_eq!(bmi(Some(175.0), Some(70.0)), Some(22.9));
        assert_eq!(bmi(None, Some(70.0)), None);
        assert_eq!(bmi(Some(175.0), None), None);
        assert_eq!(bmi(Some(0.0), Some(70.0)), None);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(1.23456, 2) - 1.23).abs() < f64::EPSILON);
    }
}
