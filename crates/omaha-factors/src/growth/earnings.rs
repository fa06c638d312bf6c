//! Earnings per share growth.

use crate::signal::GrowthSignal;
use crate::stability::is_monotonic_within_tolerance;
use chrono::{Datelike, NaiveDate};
use omaha_data::TimeSeries;

/// Allowed period-over-period EPS ratio.
pub const EPS_TOLERANCE: f64 = 0.9;

/// Minimum number of reported quarters for the quarterly check.
pub const MIN_QUARTERS: usize = 8;

/// Years of history the annual stability check requires.
pub const ANNUAL_HISTORY_YEARS: i32 = 6;

/// Whether annual diluted EPS held up, oldest to newest.
///
/// Requires a datapoint (defined or not) in `today.year - 6`; without one the
/// history is too short to judge and the answer is `None`.
pub fn has_stable_eps_growth(eps: &TimeSeries, today: NaiveDate) -> Option<bool> {
    if eps.is_empty() || !eps.has_period_in_year(today.year() - ANNUAL_HISTORY_YEARS) {
        return None;
    }

    Some(is_monotonic_within_tolerance(
        &eps.defined_values(),
        EPS_TOLERANCE,
    ))
}

/// Compound annual EPS growth, or a stability verdict when CAGR is undefined.
///
/// * `Unknown` without a datapoint in `today.year - 1` or without any defined value.
/// * `Stable(..)` when the first value is not positive or the last is negative.
/// * `Growth(cagr)` otherwise, with the exponent one over the number of
///   defined values.
pub fn eps_growth_cagr(eps: &TimeSeries, today: NaiveDate) -> GrowthSignal {
    if !eps.has_period_in_year(today.year() - 1) {
        return GrowthSignal::Unknown;
    }

    let values = eps.defined_values();
    let (Some(&start), Some(&end)) = (values.first(), values.last()) else {
        return GrowthSignal::Unknown;
    };

    if start <= 0.0 || end < 0.0 {
        return GrowthSignal::Stable(is_monotonic_within_tolerance(&values, EPS_TOLERANCE));
    }

    GrowthSignal::Growth((end / start).powf(1.0 / values.len() as f64) - 1.0)
}

/// Whether quarterly diluted EPS held up over at least eight quarters.
pub fn has_stable_quarterly_eps_growth(eps: &TimeSeries) -> Option<bool> {
    let values = eps.defined_values();
    if values.len() < MIN_QUARTERS {
        return None;
    }

    Some(is_monotonic_within_tolerance(&values, EPS_TOLERANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use omaha_data::Observation;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn annual(points: &[(i32, Option<f64>)]) -> TimeSeries {
        points
            .iter()
            .map(|(y, v)| Observation::new(NaiveDate::from_ymd_opt(*y, 12, 31).unwrap(), *v))
            .collect()
    }

    #[test]
    fn test_stable_requires_six_year_old_point() {
        let recent = annual(&[(2021, Some(1.0)), (2022, Some(1.1)), (2023, Some(1.2)), (2024, Some(1.3))]);
        assert_eq!(has_stable_eps_growth(&recent, today()), None);

        let long = annual(&[(2019, Some(1.0)), (2021, Some(1.1)), (2024, Some(1.3))]);
        assert_eq!(has_stable_eps_growth(&long, today()), Some(true));

        let falling = annual(&[(2019, Some(2.0)), (2021, Some(1.0)), (2024, Some(1.3))]);
        assert_eq!(has_stable_eps_growth(&falling, today()), Some(false));
    }

    #[test]
    fn test_undefined_point_counts_as_present() {
        let eps = annual(&[(2019, None), (2023, Some(1.0)), (2024, Some(1.05))]);
        assert_eq!(has_stable_eps_growth(&eps, today()), Some(true));
    }

    #[test]
    fn test_cagr_growth() {
        let eps = annual(&[(2021, Some(2.0)), (2022, Some(2.4)), (2023, Some(2.8)), (2024, Some(3.2))]);

        match eps_growth_cagr(&eps, today()) {
            GrowthSignal::Growth(g) => assert_relative_eq!(g, 1.6f64.powf(0.25) - 1.0),
            other => panic!("expected growth, got {other:?}"),
        }
    }

    #[test]
    fn test_cagr_falls_back_to_stability() {
        let turnaround = annual(&[(2022, Some(-1.0)), (2023, Some(0.5)), (2024, Some(1.0))]);
        assert_eq!(eps_growth_cagr(&turnaround, today()), GrowthSignal::Stable(true));

        let losses = annual(&[(2022, Some(1.0)), (2023, Some(0.5)), (2024, Some(-0.2))]);
        assert_eq!(eps_growth_cagr(&losses, today()), GrowthSignal::Stable(false));
    }

    #[test]
    fn test_cagr_unknown() {
        let stale = annual(&[(2020, Some(1.0)), (2022, Some(1.2))]);
        assert_eq!(eps_growth_cagr(&stale, today()), GrowthSignal::Unknown);

        let undefined = annual(&[(2024, None)]);
        assert_eq!(eps_growth_cagr(&undefined, today()), GrowthSignal::Unknown);

        assert_eq!(eps_growth_cagr(&TimeSeries::empty(), today()), GrowthSignal::Unknown);
    }

    #[test]
    fn test_quarterly() {
        let quarters: TimeSeries = (0..8)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2023, 3, 31).unwrap() + chrono::Months::new(3 * i);
                Observation::new(date, Some(1.0 + f64::from(i) * 0.1))
            })
            .collect();
        assert_eq!(has_stable_quarterly_eps_growth(&quarters), Some(true));

        let short: TimeSeries = quarters.observations()[..7].iter().copied().collect();
        assert_eq!(has_stable_quarterly_eps_growth(&short), None);
    }
}
