//! FinancialModelingPrep stock screener, used for non-US universes.

use crate::error::{DataError, Result};
use crate::http;
use serde::Deserialize;
use serde_json::Value;

const SCREENER_URL: &str = "https://financialmodelingprep.com/api/v3/stock-screener";

/// Environment variable holding the API key.
pub const FMP_API_KEY_VAR: &str = "FMP_API_KEY";

#[derive(Debug, Deserialize)]
struct ScreenerRow {
    symbol: String,
}

/// Screener client.
#[derive(Debug)]
pub struct FmpScreener {
    client: reqwest::Client,
    api_key: String,
}

impl FmpScreener {
    /// Create a client, failing with [`DataError::MissingApiKey`] without a key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(DataError::MissingApiKey(FMP_API_KEY_VAR))?;

        Ok(Self {
            client: http::browser_client()?,
            api_key,
        })
    }

    /// Largest `limit` common stocks listed in `country` (ISO code, e.g. `KR`),
    /// by market capitalisation.
    pub async fn tickers(&self, country: &str, limit: usize) -> Result<Vec<String>> {
        let response = self
            .client
            .get(SCREENER_URL)
            .query(&[
                ("country", country.to_string()),
                ("limit", limit.to_string()),
                ("type", "stock".to_string()),
                ("sort", "marketCap".to_string()),
                ("isEtf", "false".to_string()),
                ("isFund", "false".to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?;

        let payload: Value = http::check_status(response)?.json().await?;
        parse_screener(payload)
    }
}

/// Extract symbols from a screener payload.
///
/// FMP reports errors (bad key, exhausted quota) as an object with an
/// `Error Message` field instead of the usual array.
pub fn parse_screener(payload: Value) -> Result<Vec<String>> {
    if let Some(message) = payload.get("Error Message").and_then(Value::as_str) {
        return Err(DataError::Structure(format!("FMP screener: {message}")));
    }

    let rows: Vec<ScreenerRow> = serde_json::from_value(payload)?;
    Ok(rows.into_iter().map(|r| r.symbol).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_screener() {
        let payload = json!([
            {"symbol": "005930.KS", "companyName": "Samsung Electronics", "marketCap": 1.0},
            {"symbol": "000660.KS", "companyName": "SK hynix", "marketCap": 0.5}
        ]);

        assert_eq!(parse_screener(payload).unwrap(), vec!["005930.KS", "000660.KS"]);
    }

    #[test]
    fn test_parse_screener_error_message() {
        let payload = json!({"Error Message": "Invalid API KEY."});
        assert!(matches!(parse_screener(payload), Err(DataError::Structure(_))));
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(
            FmpScreener::new(None),
            Err(DataError::MissingApiKey(FMP_API_KEY_VAR))
        ));
        assert!(FmpScreener::new(Some("  ".into())).is_err());
    }
}
