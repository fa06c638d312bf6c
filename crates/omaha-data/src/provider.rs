//! Capabilities the screening pipeline is written against.
//!
//! Workers call these from plain OS threads, so the methods are blocking and
//! the implementations must be shareable across threads.

use crate::error::Result;
use crate::series::{SeriesKind, TimeSeries};
use crate::snapshot::FinancialSnapshot;
use std::collections::HashMap;

/// Source of per-ticker fundamentals and price history.
pub trait MarketData: Send + Sync {
    /// Current ratios and descriptive fields for `ticker`.
    fn fetch_snapshot(&self, ticker: &str) -> Result<FinancialSnapshot>;

    /// One financial series for `ticker`. An unknown series is an empty one.
    fn fetch_time_series(&self, ticker: &str, kind: SeriesKind) -> Result<TimeSeries>;

    /// Daily closes for every ticker over roughly `lookback_days` calendar
    /// days, oldest first. Tickers without data are left out of the map.
    fn fetch_batch_price_history(
        &self,
        tickers: &[String],
        lookback_days: u32,
    ) -> Result<HashMap<String, Vec<f64>>>;

    /// Trailing P/E of an index proxy such as `SPY`.
    fn fetch_trailing_pe(&self, ticker: &str) -> Result<Option<f64>>;
}

/// Live same-industry P/E for a single ticker.
pub trait PeerPeLookup: Send + Sync {
    /// Same-industry P/E, `None` on any failure.
    fn same_industry_pe(&self, ticker: &str) -> Option<f64>;
}

/// Persistent score and name cache read by the downstream narrative step.
pub trait ScoreCache: Send + Sync {
    /// Record the latest composite score of a company, keyed by display name.
    fn put_company_score(&self, name: &str, score: f64) -> Result<()>;

    /// Latest composite score recorded for `name`.
    fn get_company_score(&self, name: &str) -> Result<Option<f64>>;

    /// Record the display name of a ticker that made the cutoff.
    fn put_ticker_name(&self, ticker: &str, name: &str) -> Result<()>;

    /// Display name recorded for `ticker`.
    fn get_ticker_name(&self, ticker: &str) -> Result<Option<String>>;

    /// Every cached company score, highest first.
    fn company_scores(&self) -> Result<Vec<(String, f64)>>;
}
