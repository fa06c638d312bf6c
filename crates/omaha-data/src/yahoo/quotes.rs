//! Quote and dividend history from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::series::{Observation, TimeSeries};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use polars::prelude::*;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

/// Concurrent chart requests in a batch download.
const DEFAULT_CONCURRENCY: usize = 8;

/// Yahoo Finance quote provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
    concurrency: usize,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance quote provider with a short per-request pause.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(200))
    }

    /// Create a new Yahoo Finance quote provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Result<Self> {
        Ok(Self {
            provider: yahoo::YahooConnector::new()?,
            rate_limit_delay,
            concurrency: DEFAULT_CONCURRENCY,
        })
    }

    /// Fetch daily OHLCV data for a single symbol.
    ///
    /// # Returns
    /// A Polars DataFrame with columns: symbol, date, open, high, low, close, volume, adjusted_close
    pub async fn fetch_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        if start > end {
            return Err(DataError::TimeConversion(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }

        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let start_time = time::OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;
        let end_time = time::OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DataError::TimeConversion(e.to_string()))?;

        let response = self
            .provider
            .get_quote_history(symbol, start_time, end_time)
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let dates: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let opens: Vec<f64> = quotes.iter().map(|q| q.open).collect();
        let highs: Vec<f64> = quotes.iter().map(|q| q.high).collect();
        let lows: Vec<f64> = quotes.iter().map(|q| q.low).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let volumes: Vec<u64> = quotes.iter().map(|q| q.volume).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let mut df = DataFrame::new(vec![
            Series::new("timestamp".into(), dates).into(),
            Series::new("open".into(), opens).into(),
            Series::new("high".into(), highs).into(),
            Series::new("low".into(), lows).into(),
            Series::new("close".into(), closes).into(),
            Series::new("volume".into(), volumes).into(),
            Series::new("adjusted_close".into(), adj_closes).into(),
        ])?;

        let symbol_col: Column = Series::new("symbol".into(), vec![symbol; df.height()]).into();
        df.with_column(symbol_col)?;

        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[
                col("symbol"),
                col("date"),
                col("open"),
                col("high"),
                col("low"),
                col("close"),
                col("volume"),
                col("adjusted_close"),
            ])
            .collect()?;

        sleep(self.rate_limit_delay).await;

        Ok(df)
    }

    /// Fetch OHLCV data for many symbols concurrently.
    ///
    /// Symbols that fail are logged and left out; the call only fails when no
    /// symbol returned data.
    pub async fn fetch_quotes_batch(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<DataFrame> {
        let frames: Vec<LazyFrame> = stream::iter(symbols)
            .map(|symbol| async move {
                match self.fetch_quotes(symbol, start, end).await {
                    Ok(df) => Some(df.lazy()),
                    Err(e) => {
                        warn!(symbol = %symbol, error = %e, "failed to fetch price history");
                        None
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|frame| async move { frame })
            .collect()
            .await;

        if frames.is_empty() {
            return Err(DataError::MissingData {
                symbol: "batch".to_string(),
                reason: "No data fetched for any symbol".to_string(),
            });
        }

        debug!(symbols = frames.len(), "price history batch complete");
        let combined = concat(frames, UnionArgs::default())?.collect()?;

        Ok(combined)
    }

    /// Every dividend payment on record for `symbol`.
    pub async fn fetch_dividends(&self, symbol: &str) -> Result<TimeSeries> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let response = self.provider.get_quote_range(symbol, "1mo", "max").await?;
        let dividends = response
            .dividends()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        sleep(self.rate_limit_delay).await;

        Ok(dividends
            .iter()
            .filter_map(|d| {
                let timestamp = i64::try_from(d.date).ok()?;
                let paid = DateTime::from_timestamp(timestamp, 0)?.date_naive();
                Some(Observation::new(paid, Some(d.amount)))
            })
            .collect())
    }
}

/// Split a combined quote frame into per-symbol closes, oldest first.
pub fn closes_by_symbol(quotes: &DataFrame) -> Result<HashMap<String, Vec<f64>>> {
    let sorted = quotes
        .clone()
        .lazy()
        .select([col("symbol"), col("date"), col("close")])
        .sort(["symbol", "date"], SortMultipleOptions::default())
        .collect()?;

    let symbols = sorted.column("symbol")?.str()?;
    let closes = sorted.column("close")?.f64()?;

    let mut by_symbol: HashMap<String, Vec<f64>> = HashMap::new();
    for (symbol, close) in symbols.into_iter().zip(closes.into_iter()) {
        if let (Some(symbol), Some(close)) = (symbol, close)
            && close.is_finite()
        {
            by_symbol.entry(symbol.to_string()).or_default().push(close);
        }
    }

    Ok(by_symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn frame(symbols: &[&str], days: &[i32], closes: &[f64]) -> DataFrame {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = days
            .iter()
            .map(|d| epoch + chrono::Duration::days(i64::from(*d)))
            .collect();
        df!(
            "symbol" => symbols,
            "date" => dates,
            "close" => closes,
        )
        .unwrap()
    }

    #[test]
    fn test_closes_by_symbol_orders_by_date() {
        let df = frame(
            &["MSFT", "AAPL", "AAPL", "MSFT", "AAPL"],
            &[20_001, 20_002, 20_000, 20_000, 20_001],
            &[410.0, 191.0, 189.0, 405.0, 190.0],
        );

        let closes = closes_by_symbol(&df).unwrap();

        assert_eq!(closes["AAPL"], vec![189.0, 190.0, 191.0]);
        assert_eq!(closes["MSFT"], vec![405.0, 410.0]);
    }

    #[test]
    fn test_closes_by_symbol_skips_non_finite() {
        let df = frame(&["AAPL", "AAPL"], &[20_000, 20_001], &[f64::NAN, 190.0]);

        let closes = closes_by_symbol(&df).unwrap();

        assert_eq!(closes["AAPL"], vec![190.0]);
    }

    #[tokio::test]
    async fn test_invalid_symbol() {
        let provider = YahooQuoteProvider::new().unwrap();
        let end = Utc::now();
        let start = end - chrono::Duration::days(30);

        let result = provider.fetch_quotes("", start, end).await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let provider = YahooQuoteProvider::new().unwrap();
        let start = Utc::now();
        let end = start - chrono::Duration::days(30);

        let result = provider.fetch_quotes("AAPL", start, end).await;
        assert!(matches!(result, Err(DataError::TimeConversion(_))));
    }
}
