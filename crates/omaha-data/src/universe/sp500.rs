//! S&P 500 constituents from the datahub.io dataset.

use super::to_yahoo_symbol;
use crate::error::{DataError, Result};
use crate::http;
use serde::Deserialize;

const CONSTITUENTS_URL: &str =
    "https://datahub.io/core/s-and-p-500-companies/r/constituents.csv";

#[derive(Debug, Deserialize)]
struct ConstituentRow {
    #[serde(rename = "Symbol")]
    symbol: String,
}

/// Parse the constituents CSV, returning Yahoo-style symbols in file order.
pub fn parse_constituents_csv(text: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut symbols = Vec::new();

    for row in reader.deserialize::<ConstituentRow>() {
        let row = row?;
        if !row.symbol.trim().is_empty() {
            symbols.push(to_yahoo_symbol(&row.symbol));
        }
    }

    if symbols.is_empty() {
        return Err(DataError::Structure(
            "S&P 500 constituents file has no symbols".to_string(),
        ));
    }

    Ok(symbols)
}

/// Download the current S&P 500 constituents.
pub async fn fetch_sp500_symbols() -> Result<Vec<String>> {
    let client = http::browser_client()?;
    let text = http::get_text(&client, CONSTITUENTS_URL).await?;
    parse_constituents_csv(&text)
}
