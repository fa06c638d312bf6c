//! Blocking [`MarketData`] facade over the async Yahoo providers.

use super::fundamentals::YahooFundamentalsProvider;
use super::quotes::{YahooQuoteProvider, closes_by_symbol};
use crate::error::Result;
use crate::provider::MarketData;
use crate::series::{SeriesKind, TimeSeries};
use crate::snapshot::FinancialSnapshot;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tokio::runtime::Handle;

/// Yahoo Finance behind the blocking [`MarketData`] interface.
///
/// Pipeline workers are plain OS threads; each call is driven to completion
/// on the runtime behind `handle`. Must not be called from inside that
/// runtime's own worker threads.
#[derive(Debug)]
pub struct YahooMarketData {
    quotes: YahooQuoteProvider,
    fundamentals: YahooFundamentalsProvider,
    handle: Handle,
    include_esg: bool,
}

impl YahooMarketData {
    /// Create the adapter on `handle`.
    pub fn new(handle: Handle) -> Result<Self> {
        Ok(Self {
            quotes: YahooQuoteProvider::new()?,
            fundamentals: YahooFundamentalsProvider::new()?,
            handle,
            include_esg: false,
        })
    }

    /// Also request sustainability scores with every snapshot.
    #[must_use]
    pub const fn with_esg(mut self, include_esg: bool) -> Self {
        self.include_esg = include_esg;
        self
    }
}

impl MarketData for YahooMarketData {
    fn fetch_snapshot(&self, ticker: &str) -> Result<FinancialSnapshot> {
        self.handle
            .block_on(self.fundamentals.fetch_snapshot(ticker, self.include_esg))
    }

    fn fetch_time_series(&self, ticker: &str, kind: SeriesKind) -> Result<TimeSeries> {
        if kind == SeriesKind::Dividends {
            return self.handle.block_on(self.quotes.fetch_dividends(ticker));
        }

        let mut statements = self
            .handle
            .block_on(self.fundamentals.fetch_statements(ticker, &[kind]))?;
        Ok(statements.remove(&kind).unwrap_or_default())
    }

    fn fetch_batch_price_history(
        &self,
        tickers: &[String],
        lookback_days: u32,
    ) -> Result<HashMap<String, Vec<f64>>> {
        let end = Utc::now();
        let start = end - Duration::days(i64::from(lookback_days));
        let quotes = self
            .handle
            .block_on(self.quotes.fetch_quotes_batch(tickers, start, end))?;
        closes_by_symbol(&quotes)
    }

    fn fetch_trailing_pe(&self, ticker: &str) -> Result<Option<f64>> {
        let snapshot = self
            .handle
            .block_on(self.fundamentals.fetch_snapshot(ticker, false))?;
        Ok(snapshot.trailing_pe)
    }
}
