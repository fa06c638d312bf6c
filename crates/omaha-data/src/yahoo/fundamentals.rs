//! Fundamental data from Yahoo Finance.
//!
//! Two endpoints are used: `v10/finance/quoteSummary` for the current ratios
//! and descriptive fields, and the fundamentals time series endpoint for
//! statement history. Both need the session cookie and crumb.

use crate::error::{DataError, Result};
use crate::http::{self, RateLimiter};
use crate::series::{Observation, SeriesKind, TimeSeries};
use crate::snapshot::{EsgSummary, FinancialSnapshot};
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query2.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const TIMESERIES_URL: &str =
    "https://query2.finance.yahoo.com/ws/fundamentals-timeseries/v1/finance/timeseries";

const BASE_MODULES: &str = "financialData,defaultKeyStatistics,summaryDetail,price,assetProfile";
const ESG_MODULES: &str =
    "financialData,defaultKeyStatistics,summaryDetail,price,assetProfile,esgScores";

/// Calendar years of statement history kept before the current one. No
/// statement indicator reads a period older than `today.year - 6`.
pub const STATEMENT_HISTORY_YEARS: i32 = 6;

/// First day of the statement window for `today`.
pub fn statement_window_start(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year() - STATEMENT_HISTORY_YEARS, 1, 1).unwrap_or(today)
}

/// Yahoo Finance fundamentals provider.
#[derive(Debug)]
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    crumb: Mutex<Option<String>>,
    rate_limiter: RateLimiter,
}

impl YahooFundamentalsProvider {
    /// Create a new provider with the default request spacing.
    pub fn new() -> Result<Self> {
        Self::with_rate_limit(Duration::from_millis(100))
    }

    /// Create a new provider with custom request spacing.
    pub fn with_rate_limit(min_interval: Duration) -> Result<Self> {
        Ok(Self {
            client: http::browser_client()?,
            crumb: Mutex::new(None),
            rate_limiter: RateLimiter::new(min_interval),
        })
    }

    /// Session crumb, fetched once and reused.
    async fn crumb(&self) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        // Only the cookies matter here; this endpoint answers 404 on success.
        if let Err(e) = self.client.get(COOKIE_URL).send().await {
            debug!(error = %e, "cookie priming request failed");
        }

        let crumb = http::get_text(&self.client, CRUMB_URL).await?;
        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') || crumb.contains(' ') {
            return Err(DataError::Structure(format!("unexpected crumb: {crumb:?}")));
        }

        debug!("obtained Yahoo session crumb");
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let crumb = self.crumb().await?;
        self.rate_limiter.wait().await;

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("crumb", crumb)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Stale crumb; the next call starts a new session.
            *self.crumb.lock().await = None;
        }

        let payload = http::check_status(response)?.json::<Value>().await?;
        Ok(payload)
    }

    /// Fetch the current snapshot for `symbol`.
    ///
    /// With `include_esg` the sustainability module is requested too. Tickers
    /// without ESG coverage make Yahoo reject the whole request, so that case
    /// falls back to the base modules.
    pub async fn fetch_snapshot(&self, symbol: &str, include_esg: bool) -> Result<FinancialSnapshot> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        if include_esg {
            match self.fetch_quote_summary(symbol, ESG_MODULES).await {
                Err(e) if !e.is_rate_limited() => {
                    debug!(symbol = %symbol, error = %e, "retrying quote summary without ESG");
                }
                other => return other,
            }
        }

        self.fetch_quote_summary(symbol, BASE_MODULES).await
    }

    async fn fetch_quote_summary(&self, symbol: &str, modules: &str) -> Result<FinancialSnapshot> {
        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let payload = self
            .get_json(&url, &[("modules", modules.to_string())])
            .await?;
        parse_quote_summary(symbol, &payload)
    }

    /// Fetch several statement series in one request.
    ///
    /// Kinds without a time series key (dividends) are ignored; kinds Yahoo
    /// has no data for come back as empty series.
    pub async fn fetch_statements(
        &self,
        symbol: &str,
        kinds: &[SeriesKind],
    ) -> Result<HashMap<SeriesKind, TimeSeries>> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let types: Vec<&str> = kinds.iter().filter_map(SeriesKind::yahoo_key).collect();
        if types.is_empty() {
            return Ok(HashMap::new());
        }

        let now = Utc::now();
        let start = statement_window_start(now.date_naive());

        let url = format!("{TIMESERIES_URL}/{symbol}");
        let payload = self
            .get_json(
                &url,
                &[
                    ("symbol", symbol.to_string()),
                    ("type", types.join(",")),
                    ("period1", start.and_time(NaiveTime::MIN).and_utc().timestamp().to_string()),
                    ("period2", now.timestamp().to_string()),
                ],
            )
            .await?;

        let mut parsed = trim_to_window(parse_timeseries(&payload)?, start);
        for kind in kinds.iter().filter(|k| k.yahoo_key().is_some()) {
            parsed.entry(*kind).or_default();
        }
        Ok(parsed)
    }
}

/// Drop statement columns dated before `start`; Yahoo can return older
/// periods than requested.
pub fn trim_to_window(
    series: HashMap<SeriesKind, TimeSeries>,
    start: NaiveDate,
) -> HashMap<SeriesKind, TimeSeries> {
    series
        .into_iter()
        .map(|(kind, ts)| (kind, ts.since(start)))
        .collect()
}

/// Read a numeric field that Yahoo wraps as `{"raw": .., "fmt": ..}` (or sends bare).
fn raw_number(module: &Value, field: &str) -> Option<f64> {
    let value = module.get(field)?;
    value
        .get("raw")
        .and_then(Value::as_f64)
        .or_else(|| value.as_f64())
        .filter(|v| v.is_finite())
}

fn text(module: &Value, field: &str) -> Option<String> {
    module
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `quoteSummary` payload.
///
/// Debt to equity is reported as a percentage and converted to a ratio.
pub fn parse_quote_summary(symbol: &str, payload: &Value) -> Result<FinancialSnapshot> {
    let summary = payload
        .get("quoteSummary")
        .ok_or_else(|| DataError::Structure("missing quoteSummary".to_string()))?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(DataError::YahooApi(format!("{symbol}: {description}")));
    }

    let result = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "empty quote summary".to_string(),
        })?;

    let empty = Value::Null;
    let financial = result.get("financialData").unwrap_or(&empty);
    let statistics = result.get("defaultKeyStatistics").unwrap_or(&empty);
    let detail = result.get("summaryDetail").unwrap_or(&empty);
    let price = result.get("price").unwrap_or(&empty);
    let profile = result.get("assetProfile").unwrap_or(&empty);

    let esg = result.get("esgScores").map(|scores| EsgSummary {
        total: raw_number(scores, "totalEsg"),
        performance: text(scores, "esgPerformance"),
    });

    Ok(FinancialSnapshot {
        debt_to_equity: raw_number(financial, "debtToEquity").map(|de| de / 100.0),
        current_ratio: raw_number(financial, "currentRatio"),
        price_to_book: raw_number(statistics, "priceToBook"),
        trailing_pe: raw_number(detail, "trailingPE"),
        return_on_equity: raw_number(financial, "returnOnEquity"),
        return_on_assets: raw_number(financial, "returnOnAssets"),
        current_price: raw_number(financial, "currentPrice")
            .or_else(|| raw_number(price, "regularMarketPrice")),
        target_mean_price: raw_number(financial, "targetMeanPrice"),
        long_name: text(price, "longName"),
        short_name: text(price, "shortName"),
        industry: text(profile, "industry"),
        sector: text(profile, "sector"),
        recommendation_key: text(financial, "recommendationKey"),
        esg,
    })
}

fn parse_period(entry: &Value, timestamp: Option<i64>) -> Option<NaiveDate> {
    entry
        .get("asOfDate")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .or_else(|| timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)).map(|d| d.date_naive()))
}

/// Parse a fundamentals time series payload into one series per known kind.
///
/// `null` entries are periods Yahoo lists without a figure; they become
/// undefined observations dated by the matching timestamp.
pub fn parse_timeseries(payload: &Value) -> Result<HashMap<SeriesKind, TimeSeries>> {
    let results = payload
        .get("timeseries")
        .and_then(|t| t.get("result"))
        .and_then(Value::as_array)
        .ok_or_else(|| DataError::Structure("missing timeseries.result".to_string()))?;

    let mut series = HashMap::new();

    for result in results {
        let Some(key) = result
            .get("meta")
            .and_then(|m| m.get("type"))
            .and_then(Value::as_array)
            .and_then(|t| t.first())
            .and_then(Value::as_str)
        else {
            continue;
        };

        let Some(kind) = SeriesKind::STATEMENTS
            .into_iter()
            .find(|k| k.yahoo_key() == Some(key))
        else {
            continue;
        };

        let timestamps: Vec<Option<i64>> = result
            .get("timestamp")
            .and_then(Value::as_array)
            .map(|ts| ts.iter().map(Value::as_i64).collect())
            .unwrap_or_default();

        let entries = result
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let observations = entries.iter().enumerate().filter_map(|(i, entry)| {
            let period = parse_period(entry, timestamps.get(i).copied().flatten())?;
            let value = entry
                .get("reportedValue")
                .and_then(|v| v.get("raw"))
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite());
            Some(Observation::new(period, value))
        });

        series.insert(kind, TimeSeries::new(observations));
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_quote_summary() {
        let payload = json!({
            "quoteSummary": {
                "result": [{
                    "financialData": {
                        "currentPrice": {"raw": 190.5, "fmt": "190.50"},
                        "targetMeanPrice": {"raw": 210.0, "fmt": "210.00"},
                        "debtToEquity": {"raw": 45.0, "fmt": "45.00%"},
                        "currentRatio": {"raw": 1.8, "fmt": "1.80"},
                        "returnOnEquity": {"raw": 0.12, "fmt": "12.00%"},
                        "returnOnAssets": {},
                        "recommendationKey": "buy"
                    },
                    "defaultKeyStatistics": {"priceToBook": {"raw": 1.2}},
                    "summaryDetail": {"trailingPE": {"raw": 14.3}},
                    "price": {"longName": "Example Corp", "shortName": "Example"},
                    "assetProfile": {"industry": "Specialty Chemicals", "sector": "Basic Materials"},
                    "esgScores": {"totalEsg": {"raw": 21.4}, "esgPerformance": "AVG_PERF"}
                }],
                "error": null
            }
        });

        let snapshot = parse_quote_summary("EXM", &payload).unwrap();

        assert_relative_eq!(snapshot.debt_to_equity.unwrap(), 0.45);
        assert_eq!(snapshot.current_ratio, Some(1.8));
        assert_eq!(snapshot.price_to_book, Some(1.2));
        assert_eq!(snapshot.trailing_pe, Some(14.3));
        assert_eq!(snapshot.return_on_equity, Some(0.12));
        assert_eq!(snapshot.return_on_assets, None);
        assert_eq!(snapshot.industry.as_deref(), Some("Specialty Chemicals"));
        assert_eq!(snapshot.sector.as_deref(), Some("Basic Materials"));
        assert_eq!(snapshot.recommendation_key.as_deref(), Some("buy"));
        assert_eq!(snapshot.display_name("EXM"), "Example Corp");
        assert_eq!(snapshot.esg.unwrap().display(), "21.4, AVG_PERF");
    }

    #[test]
    fn test_parse_quote_summary_error() {
        let payload = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for symbol: NOPE"}
            }
        });

        let err = parse_quote_summary("NOPE", &payload).unwrap_err();
        assert!(matches!(err, DataError::YahooApi(_)));
    }

    #[test]
    fn test_parse_timeseries() {
        let payload = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"symbol": ["EXM"], "type": ["annualDilutedEPS"]},
                        "timestamp": [1640908800, 1672444800, 1703980800],
                        "annualDilutedEPS": [
                            {"asOfDate": "2023-12-31", "periodType": "12M", "reportedValue": {"raw": 2.5}},
                            null,
                            {"asOfDate": "2021-12-31", "periodType": "12M", "reportedValue": {"raw": 2.0}}
                        ]
                    },
                    {
                        "meta": {"symbol": ["EXM"], "type": ["annualInterestExpense"]},
                        "timestamp": []
                    },
                    {
                        "meta": {"symbol": ["EXM"], "type": ["somethingElse"]},
                        "somethingElse": [{"asOfDate": "2023-12-31", "reportedValue": {"raw": 1.0}}]
                    }
                ],
                "error": null
            }
        });

        let parsed = parse_timeseries(&payload).unwrap();

        let eps = &parsed[&SeriesKind::AnnualDilutedEps];
        assert_eq!(eps.len(), 3);
        assert_eq!(eps.first().unwrap().period, d(2021, 12, 31));
        assert_eq!(eps.value_at(d(2023, 12, 31)), Some(2.5));
        assert_eq!(eps.observations()[1].value, None);
        assert_eq!(eps.observations()[1].period, d(2022, 12, 31));

        assert!(parsed[&SeriesKind::AnnualInterestExpense].is_empty());
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_statement_window_drops_old_columns() {
        let today = d(2025, 6, 1);
        let start = statement_window_start(today);
        assert_eq!(start, d(2019, 1, 1));

        let equity = TimeSeries::new([2016, 2018, 2019, 2022, 2024].map(|y| {
            Observation::new(d(y, 12, 31), Some(1_000.0))
        }));
        let series = HashMap::from([(SeriesKind::AnnualCommonEquity, equity)]);

        let trimmed = trim_to_window(series, start);
        let equity = &trimmed[&SeriesKind::AnnualCommonEquity];

        assert_eq!(equity.len(), 3);
        assert_eq!(equity.first().unwrap().period, d(2019, 12, 31));
        assert!(
            equity
                .observations()
                .iter()
                .all(|o| o.period.year() >= today.year() - STATEMENT_HISTORY_YEARS)
        );
    }

    #[test]
    fn test_parse_timeseries_structure_error() {
        let err = parse_timeseries(&json!({"unexpected": true})).unwrap_err();
        assert!(matches!(err, DataError::Structure(_)));
    }
}
