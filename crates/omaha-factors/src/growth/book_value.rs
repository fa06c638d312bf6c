//! Book value per share growth.

use crate::stability::{is_monotonic_within_tolerance, round2};
use chrono::{Datelike, NaiveDate};
use omaha_data::TimeSeries;
use std::collections::BTreeSet;

/// Sectors whose book value swings with the cycle get a looser tolerance.
const CYCLICAL_SECTORS: [&str; 5] = [
    "Industrials",
    "Technology",
    "Energy",
    "Consumer Cyclical",
    "Basic Materials",
];

/// Balance sheets older than this many years disqualify the series.
pub const MAX_BALANCE_SHEET_AGE_YEARS: i32 = 6;

/// Tolerance for a sector: 0.85 for cyclical sectors, 0.9 otherwise.
pub fn sector_tolerance(sector: Option<&str>) -> f64 {
    match sector {
        Some(s) if CYCLICAL_SECTORS.contains(&s) => 0.85,
        _ => 0.9,
    }
}

/// Book value per share for each usable period, oldest first, rounded to 2 dp.
///
/// A period is usable when both figures are defined and the share count is
/// not zero.
pub fn book_value_per_share(equity: &TimeSeries, shares: &TimeSeries) -> Vec<(NaiveDate, f64)> {
    periods(equity, shares)
        .into_iter()
        .filter_map(|period| {
            let equity = equity.value_at(period)?;
            let shares = shares.value_at(period).filter(|s| *s != 0.0)?;
            Some((period, round2(equity / shares)))
        })
        .collect()
}

fn periods(equity: &TimeSeries, shares: &TimeSeries) -> BTreeSet<NaiveDate> {
    equity
        .observations()
        .iter()
        .chain(shares.observations())
        .map(|o| o.period)
        .collect()
}

/// Whether book value per share held up across the reported balance sheets.
///
/// `None` when any period is older than `today.year - 6` or fewer than two
/// usable periods remain.
pub fn has_stable_book_value_growth(
    equity: &TimeSeries,
    shares: &TimeSeries,
    sector: Option<&str>,
    today: NaiveDate,
) -> Option<bool> {
    let oldest_year = today.year() - MAX_BALANCE_SHEET_AGE_YEARS;
    if periods(equity, shares)
        .iter()
        .any(|period| period.year() < oldest_year)
    {
        return None;
    }

    let values: Vec<f64> = book_value_per_share(equity, shares)
        .into_iter()
        .map(|(_, bvps)| bvps)
        .collect();

    if values.len() < 2 {
        return None;
    }

    Some(is_monotonic_within_tolerance(
        &values,
        sector_tolerance(sector),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omaha_data::Observation;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn annual(points: &[(i32, Option<f64>)]) -> TimeSeries {
        points
            .iter()
            .map(|(y, v)| Observation::new(NaiveDate::from_ymd_opt(*y, 12, 31).unwrap(), *v))
            .collect()
    }

    #[rstest]
    #[case(Some("Technology"), 0.85)]
    #[case(Some("Energy"), 0.85)]
    #[case(Some("Utilities"), 0.9)]
    #[case(Some("technology"), 0.9)]
    #[case(None, 0.9)]
    fn test_sector_tolerance(#[case] sector: Option<&str>, #[case] expected: f64) {
        assert_eq!(sector_tolerance(sector), expected);
    }

    #[test]
    fn test_bvps_skips_unusable_periods() {
        let equity = annual(&[(2021, Some(1000.0)), (2022, None), (2023, Some(1200.0)), (2024, Some(1300.0))]);
        let shares = annual(&[(2021, Some(100.0)), (2022, Some(100.0)), (2023, Some(0.0)), (2024, Some(300.0))]);

        let bvps = book_value_per_share(&equity, &shares);

        assert_eq!(bvps.len(), 2);
        assert_eq!(bvps[0].1, 10.0);
        assert_eq!(bvps[1].1, 4.33);
    }

    #[test]
    fn test_sector_changes_verdict() {
        // 10.0 -> 8.8 is a 12% drop: inside 0.85, outside 0.9.
        let equity = annual(&[(2023, Some(1000.0)), (2024, Some(880.0))]);
        let shares = annual(&[(2023, Some(100.0)), (2024, Some(100.0))]);

        assert_eq!(
            has_stable_book_value_growth(&equity, &shares, Some("Industrials"), today()),
            Some(true)
        );
        assert_eq!(
            has_stable_book_value_growth(&equity, &shares, Some("Healthcare"), today()),
            Some(false)
        );
    }

    #[test]
    fn test_stale_period_is_unknown() {
        let equity = annual(&[(2018, Some(900.0)), (2023, Some(1000.0)), (2024, Some(1100.0))]);
        let shares = annual(&[(2018, Some(100.0)), (2023, Some(100.0)), (2024, Some(100.0))]);

        assert_eq!(
            has_stable_book_value_growth(&equity, &shares, None, today()),
            None
        );
    }

    #[test]
    fn test_single_point_is_unknown() {
        let equity = annual(&[(2024, Some(1000.0))]);
        let shares = annual(&[(2024, Some(100.0))]);

        assert_eq!(
            has_stable_book_value_growth(&equity, &shares, None, today()),
            None
        );
    }
}
