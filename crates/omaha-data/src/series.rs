//! Dated financial series.
//!
//! Every extractor in the screener works on a [`TimeSeries`]: a chronologically
//! ordered list of observations with distinct periods. Providers return
//! statement columns in whatever order their API uses, so ordering is
//! enforced at construction.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The financial series the screener knows how to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Dividend payments, one observation per payment date.
    Dividends,
    /// Diluted earnings per share from annual statements.
    AnnualDilutedEps,
    /// Diluted earnings per share from quarterly statements.
    QuarterlyDilutedEps,
    /// Operating income from annual statements.
    AnnualOperatingIncome,
    /// Interest expense from annual statements.
    AnnualInterestExpense,
    /// Common stock equity from annual balance sheets.
    AnnualCommonEquity,
    /// Ordinary shares outstanding from annual balance sheets.
    AnnualSharesOutstanding,
}

impl SeriesKind {
    /// All statement-backed kinds (everything except dividends).
    pub const STATEMENTS: [Self; 6] = [
        Self::AnnualDilutedEps,
        Self::QuarterlyDilutedEps,
        Self::AnnualOperatingIncome,
        Self::AnnualInterestExpense,
        Self::AnnualCommonEquity,
        Self::AnnualSharesOutstanding,
    ];

    /// Key used by the Yahoo fundamentals time series endpoint, `None` for dividends.
    pub const fn yahoo_key(&self) -> Option<&'static str> {
        match self {
            Self::Dividends => None,
            Self::AnnualDilutedEps => Some("annualDilutedEPS"),
            Self::QuarterlyDilutedEps => Some("quarterlyDilutedEPS"),
            Self::AnnualOperatingIncome => Some("annualOperatingIncome"),
            Self::AnnualInterestExpense => Some("annualInterestExpense"),
            Self::AnnualCommonEquity => Some("annualCommonStockEquity"),
            Self::AnnualSharesOutstanding => Some("annualOrdinarySharesNumber"),
        }
    }

    /// Human readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dividends => "Dividends",
            Self::AnnualDilutedEps => "Diluted EPS (annual)",
            Self::QuarterlyDilutedEps => "Diluted EPS (quarterly)",
            Self::AnnualOperatingIncome => "Operating Income",
            Self::AnnualInterestExpense => "Interest Expense",
            Self::AnnualCommonEquity => "Common Stock Equity",
            Self::AnnualSharesOutstanding => "Ordinary Shares Number",
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single dated datapoint. `value` is `None` when the provider reports the
/// period but leaves the figure undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Period end (statements) or payment date (dividends).
    pub period: NaiveDate,
    /// Reported value.
    pub value: Option<f64>,
}

impl Observation {
    /// Create an observation.
    pub const fn new(period: NaiveDate, value: Option<f64>) -> Self {
        Self { period, value }
    }
}

/// Chronologically ordered observations with distinct periods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from observations in any order.
    ///
    /// When two observations share a period the later one in the input wins.
    pub fn new(observations: impl IntoIterator<Item = Observation>) -> Self {
        let by_period: BTreeMap<NaiveDate, Option<f64>> = observations
            .into_iter()
            .map(|o| (o.period, o.value))
            .collect();

        Self {
            observations: by_period
                .into_iter()
                .map(|(period, value)| Observation { period, value })
                .collect(),
        }
    }

    /// An empty series.
    pub const fn empty() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    /// The observations dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .filter(|o| o.period >= start)
                .copied()
                .collect(),
        }
    }

    /// Observations, oldest first.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations, defined or not.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Defined values, oldest first.
    pub fn defined_values(&self) -> Vec<f64> {
        self.observations.iter().filter_map(|o| o.value).collect()
    }

    /// Whether any observation (defined or not) falls in `year`.
    pub fn has_period_in_year(&self, year: i32) -> bool {
        self.observations.iter().any(|o| o.period.year() == year)
    }

    /// Value recorded for exactly `period`, if present and defined.
    pub fn value_at(&self, period: NaiveDate) -> Option<f64> {
        self.observations
            .binary_search_by(|o| o.period.cmp(&period))
            .ok()
            .and_then(|i| self.observations[i].value)
    }

    /// Oldest observation.
    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

impl FromIterator<Observation> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_construction_sorts_chronologically() {
        let series = TimeSeries::new([
            Observation::new(d(2024, 12, 31), Some(3.0)),
            Observation::new(d(2022, 12, 31), Some(1.0)),
            Observation::new(d(2023, 12, 31), Some(2.0)),
        ]);

        let periods: Vec<_> = series.observations().iter().map(|o| o.period).collect();
        assert_eq!(periods, vec![d(2022, 12, 31), d(2023, 12, 31), d(2024, 12, 31)]);
        assert_eq!(series.defined_values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_since_keeps_start_date() {
        let series = TimeSeries::new([
            Observation::new(d(2018, 12, 31), Some(1.0)),
            Observation::new(d(2019, 1, 1), None),
            Observation::new(d(2020, 12, 31), Some(2.0)),
        ]);

        let recent = series.since(d(2019, 1, 1));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent.first().unwrap().period, d(2019, 1, 1));
        assert!(series.since(d(2021, 1, 1)).is_empty());
    }

    #[test]
    fn test_duplicate_period_keeps_later_value() {
        let series = TimeSeries::new([
            Observation::new(d(2023, 12, 31), Some(1.0)),
            Observation::new(d(2023, 12, 31), Some(1.5)),
        ]);

        assert_eq!(series.len(), 1);
        assert_eq!(series.value_at(d(2023, 12, 31)), Some(1.5));
    }

    #[test]
    fn test_undefined_values_are_kept_as_periods() {
        let series = TimeSeries::new([
            Observation::new(d(2020, 12, 31), None),
            Observation::new(d(2021, 12, 31), Some(2.0)),
        ]);

        assert_eq!(series.len(), 2);
        assert!(series.has_period_in_year(2020));
        assert_eq!(series.defined_values(), vec![2.0]);
        assert_eq!(series.value_at(d(2020, 12, 31)), None);
    }

    #[test]
    fn test_yahoo_keys() {
        assert_eq!(SeriesKind::Dividends.yahoo_key(), None);
        assert_eq!(
            SeriesKind::AnnualSharesOutstanding.yahoo_key(),
            Some("annualOrdinarySharesNumber")
        );
        assert!(SeriesKind::STATEMENTS.iter().all(|k| k.yahoo_key().is_some()));
    }
}
