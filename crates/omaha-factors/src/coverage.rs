//! Interest coverage ratio.

use crate::stability::round2;
use chrono::{Datelike, NaiveDate};
use omaha_data::TimeSeries;
use std::collections::BTreeSet;

/// Statements older than this many years are ignored.
pub const MAX_STATEMENT_AGE_YEARS: i32 = 5;

/// Most recent usable operating income over |interest expense|, rounded to 2 dp.
///
/// Periods are walked from newest to oldest. A period with either figure
/// undefined, or with zero interest expense, is skipped. Reaching a period
/// older than `today.year - 5` ends the walk with `None`.
pub fn interest_coverage_ratio(
    operating_income: &TimeSeries,
    interest_expense: &TimeSeries,
    today: NaiveDate,
) -> Option<f64> {
    let periods: BTreeSet<NaiveDate> = operating_income
        .observations()
        .iter()
        .chain(interest_expense.observations())
        .map(|o| o.period)
        .collect();

    let oldest_year = today.year() - MAX_STATEMENT_AGE_YEARS;

    for period in periods.into_iter().rev() {
        if period.year() < oldest_year {
            return None;
        }

        let (Some(income), Some(expense)) = (
            operating_income.value_at(period),
            interest_expense.value_at(period),
        ) else {
            continue;
        };

        if expense == 0.0 {
            continue;
        }

        return Some(round2(income / expense.abs()));
    }

    None
}
