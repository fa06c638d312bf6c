//! Tolerance-based stability primitive.
//!
//! A sequence is "stable" when no step falls below a fixed fraction of the
//! step before it. With a tolerance of 0.85 a value may drop up to 15% from
//! one period to the next without breaking stability.

/// True iff `next >= tolerance * previous` for every consecutive pair.
///
/// Empty and single-element sequences are trivially stable.
pub fn is_monotonic_within_tolerance(values: &[f64], tolerance: f64) -> bool {
    values
        .windows(2)
        .all(|pair| pair[1] >= tolerance * pair[0])
}

/// Round to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[100.0, 95.0, 90.0], 0.85, true)]
    #[case(&[100.0, 95.0, 90.0], 0.95, false)]
    #[case(&[100.0, 85.0], 0.85, true)]
    #[case(&[100.0, 84.9], 0.85, false)]
    #[case(&[1.0, 2.0, 3.0, 4.0], 1.0, true)]
    #[case(&[], 0.9, true)]
    #[case(&[42.0], 0.9, true)]
    fn test_tolerance_band(#[case] values: &[f64], #[case] tolerance: f64, #[case] expected: bool) {
        assert_eq!(is_monotonic_within_tolerance(values, tolerance), expected);
    }

    #[test]
    fn test_negative_values() {
        // -1.0 * 0.9 = -0.9, so a move from -1.0 to -0.95 is an improvement.
        assert!(is_monotonic_within_tolerance(&[-1.0, -0.95], 0.9));
        assert!(!is_monotonic_within_tolerance(&[-1.0, -1.2], 0.9));
    }

    #[rstest]
    #[case(1.234_9, 1.23)]
    #[case(2.675_1, 2.68)]
    #[case(-3.336, -3.34)]
    fn test_round2(#[case] value: f64, #[case] expected: f64) {
        assert!((round2(value) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(7.25, 1, 7.3)]
    #[case(11.549, 1, 11.5)]
    #[case(1_234.5, 0, 1_235.0)]
    fn test_round_to(#[case] value: f64, #[case] decimals: i32, #[case] expected: f64) {
        assert!((round_to(value, decimals) - expected).abs() < 1e-12);
    }
}
