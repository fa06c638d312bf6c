//! Dividend growth over the last ten completed years.

use crate::stability::is_monotonic_within_tolerance;
use chrono::{Datelike, NaiveDate};
use omaha_data::TimeSeries;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for the dividend indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DividendConfig {
    /// Completed years in the window (default: 10)
    pub window_years: usize,
    /// Oldest year of the window may be at most this many years back (default: 12)
    pub max_age_years: i32,
    /// Allowed year-over-year ratio (default: 0.85)
    pub tolerance: f64,
}

impl Default for DividendConfig {
    fn default() -> Self {
        Self {
            window_years: 10,
            max_age_years: 12,
            tolerance: 0.85,
        }
    }
}

/// Dividend payments summed per calendar year.
pub fn annual_totals(dividends: &TimeSeries) -> BTreeMap<i32, f64> {
    let mut totals = BTreeMap::new();
    for observation in dividends.observations() {
        if let Some(amount) = observation.value {
            *totals.entry(observation.period.year()).or_insert(0.0) += amount;
        }
    }
    totals
}

/// The most recent `window_years` completed years with their totals, oldest first.
///
/// The current calendar year is still open and never part of the window.
/// `None` with fewer than `window_years` completed years on record.
pub fn dividend_window_with(
    dividends: &TimeSeries,
    today: NaiveDate,
    config: &DividendConfig,
) -> Option<Vec<(i32, f64)>> {
    let completed: Vec<(i32, f64)> = annual_totals(dividends)
        .into_iter()
        .filter(|(year, _)| *year < today.year())
        .collect();

    if config.window_years == 0 || completed.len() < config.window_years {
        return None;
    }

    Some(completed[completed.len() - config.window_years..].to_vec())
}

/// [`dividend_window_with`] using the default configuration.
pub fn dividend_window(dividends: &TimeSeries, today: NaiveDate) -> Option<Vec<(i32, f64)>> {
    dividend_window_with(dividends, today, &DividendConfig::default())
}

/// Whether annual dividends held up over the window.
///
/// `None` when the window cannot be formed or starts more than
/// `max_age_years` ago.
pub fn has_stable_dividend_growth_with(
    dividends: &TimeSeries,
    today: NaiveDate,
    config: &DividendConfig,
) -> Option<bool> {
    let window = dividend_window_with(dividends, today, config)?;

    let (oldest_year, _) = window.first()?;
    if *oldest_year < today.year() - config.max_age_years {
        return None;
    }

    let totals: Vec<f64> = window.iter().map(|(_, total)| *total).collect();
    Some(is_monotonic_within_tolerance(&totals, config.tolerance))
}

/// [`has_stable_dividend_growth_with`] using the default configuration.
pub fn has_stable_dividend_growth(dividends: &TimeSeries, today: NaiveDate) -> Option<bool> {
    has_stable_dividend_growth_with(dividends, today, &DividendConfig::default())
}

/// Compound annual growth of dividends over the window.
///
/// `None` when the window cannot be formed, does not reach last year, or
/// starts at zero. The exponent is one over the number of years in the window.
pub fn dividend_cagr_with(
    dividends: &TimeSeries,
    today: NaiveDate,
    config: &DividendConfig,
) -> Option<f64> {
    let window = dividend_window_with(dividends, today, config)?;

    if !window.iter().any(|(year, _)| *year == today.year() - 1) {
        return None;
    }

    let (_, start) = *window.first()?;
    let (_, end) = *window.last()?;
    if start == 0.0 {
        return None;
    }

    Some((end / start).powf(1.0 / window.len() as f64) - 1.0)
}

/// [`dividend_cagr_with`] using the default configuration.
pub fn dividend_cagr(dividends: &TimeSeries, today: NaiveDate) -> Option<f64> {
    dividend_cagr_with(dividends, today, &DividendConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use omaha_data::Observation;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Quarterly payments of `annual / 4` for each `(year, annual)` pair.
    fn quarterly(years: impl IntoIterator<Item = (i32, f64)>) -> TimeSeries {
        years
            .into_iter()
            .flat_map(|(year, annual)| {
                [3, 6, 9, 12].map(|month| {
                    Observation::new(
                        NaiveDate::from_ymd_opt(year, month, 15).unwrap(),
                        Some(annual / 4.0),
                    )
                })
            })
            .collect()
    }

    #[test]
    fn test_annual_totals_groups_by_year() {
        let series = quarterly([(2023, 2.0), (2024, 4.0)]);
        let totals = annual_totals(&series);

        assert_eq!(totals.len(), 2);
        assert_relative_eq!(totals[&2023], 2.0);
        assert_relative_eq!(totals[&2024], 4.0);
    }

    #[test]
    fn test_ten_equal_years() {
        let series = quarterly((2015..=2024).map(|y| (y, 100.0)));

        assert_eq!(has_stable_dividend_growth(&series, today()), Some(true));
        assert_relative_eq!(dividend_cagr(&series, today()).unwrap(), 0.0);
    }

    #[test]
    fn test_current_year_excluded_from_window() {
        // 2025 is still open: its single payment must not count.
        let mut points: Vec<Observation> = quarterly((2015..=2024).map(|y| (y, 100.0)))
            .observations()
            .to_vec();
        points.push(Observation::new(
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            Some(1.0),
        ));
        let series = TimeSeries::new(points);

        let window = dividend_window(&series, today()).unwrap();
        assert_eq!(window.first().unwrap().0, 2015);
        assert_eq!(window.last().unwrap().0, 2024);
        assert_eq!(has_stable_dividend_growth(&series, today()), Some(true));
    }

    #[test]
    fn test_window_keeps_most_recent_ten() {
        let series = quarterly((2005..=2024).map(|y| (y, f64::from(y - 2000))));
        let window = dividend_window(&series, today()).unwrap();

        assert_eq!(window.len(), 10);
        assert_eq!(window[0].0, 2015);
    }

    #[test]
    fn test_growth_cagr() {
        // 100 -> 200 over a ten-year window: 2^(1/10) - 1.
        let series = quarterly((2015..=2024).map(|y| (y, 100.0 + f64::from(y - 2015) * 100.0 / 9.0)));

        let cagr = dividend_cagr(&series, today()).unwrap();
        assert_relative_eq!(cagr, 2f64.powf(0.1) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_too_few_years() {
        let series = quarterly((2017..=2024).map(|y| (y, 100.0)));

        assert_eq!(has_stable_dividend_growth(&series, today()), None);
        assert_eq!(dividend_cagr(&series, today()), None);
    }

    #[test]
    fn test_dividend_cut_breaks_stability() {
        let series = quarterly((2015..=2024).map(|y| (y, if y == 2020 { 50.0 } else { 100.0 })));

        assert_eq!(has_stable_dividend_growth(&series, today()), Some(false));
    }

    #[test]
    fn test_lapsed_payer() {
        // Stopped paying after 2019: last year missing, window too old.
        let series = quarterly((2005..=2019).map(|y| (y, 100.0)));

        assert_eq!(dividend_cagr(&series, today()), None);
        assert_eq!(has_stable_dividend_growth(&series, today()), None);
    }

    #[test]
    fn test_zero_start() {
        let series = quarterly((2015..=2024).map(|y| (y, if y == 2015 { 0.0 } else { 100.0 })));

        assert_eq!(dividend_cagr(&series, today()), None);
    }

    #[test]
    fn test_custom_config() {
        let series = quarterly((2019..=2024).map(|y| (y, if y == 2021 { 50.0 } else { 100.0 })));
        let short_window = DividendConfig {
            window_years: 5,
            ..DividendConfig::default()
        };

        // Six years on record: too few for the default window.
        assert_eq!(has_stable_dividend_growth(&series, today()), None);
        assert_eq!(dividend_cagr(&series, today()), None);

        assert_eq!(
            has_stable_dividend_growth_with(&series, today(), &short_window),
            Some(false)
        );
        assert_relative_eq!(
            dividend_cagr_with(&series, today(), &short_window).unwrap(),
            0.0
        );

        let loose = DividendConfig {
            tolerance: 0.4,
            ..short_window.clone()
        };
        assert_eq!(has_stable_dividend_growth_with(&series, today(), &loose), Some(true));

        let strict_age = DividendConfig {
            max_age_years: 3,
            ..short_window
        };
        assert_eq!(has_stable_dividend_growth_with(&series, today(), &strict_age), None);
    }
}
