//! Screening result records and their display formatting.

use serde::{Deserialize, Serialize};

/// One ticker that passed the screen, formatted for export.
///
/// Serialized field names are the column headers of the exported sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    /// Exchange-qualified ticker.
    #[serde(rename = "Ticker")]
    pub ticker: String,

    /// Company display name.
    #[serde(rename = "Name")]
    pub name: String,

    /// Industry label.
    #[serde(rename = "Industry")]
    pub industry: Option<String>,

    /// Price with day-over-day change, e.g. `189.30 (+1.25%)`.
    #[serde(rename = "Price")]
    pub price: String,

    /// Debt to equity, 2 dp.
    #[serde(rename = "D/E")]
    pub debt_to_equity: Option<f64>,

    /// Current ratio, 2 dp.
    #[serde(rename = "CR")]
    pub current_ratio: Option<f64>,

    /// Price to book, 2 dp.
    #[serde(rename = "PBR")]
    pub price_to_book: Option<f64>,

    /// Trailing P/E, 2 dp.
    #[serde(rename = "PER")]
    pub trailing_pe: Option<f64>,

    /// Return on equity, e.g. `12.35%`.
    #[serde(rename = "ROE")]
    pub roe: Option<String>,

    /// Return on assets, e.g. `6.10%`.
    #[serde(rename = "ROA")]
    pub roa: Option<String>,

    /// Interest coverage ratio.
    #[serde(rename = "ICR")]
    pub icr: Option<f64>,

    /// EPS CAGR as a percentage, or the stability verdict.
    #[serde(rename = "EPS CAGR")]
    pub eps_cagr: Option<String>,

    /// Dividend CAGR as a percentage.
    #[serde(rename = "DIV CAGR")]
    pub dividend_cagr: Option<String>,

    /// Ten-year dividend stability.
    #[serde(rename = "DIV Stable")]
    pub dividend_stable: Option<bool>,

    /// Book value per share stability.
    #[serde(rename = "BVPS Stable")]
    pub book_value_stable: Option<bool>,

    /// Composite score, 1 dp.
    #[serde(rename = "B-Score")]
    pub score: f64,

    /// Consensus recommendation with target upside, e.g. `buy(+12%)`.
    #[serde(rename = "Analyst Forecast")]
    pub analyst_forecast: String,

    /// Short/mid/long momentum, e.g. `6.0%/11.0%/None`.
    #[serde(rename = "Momentum")]
    pub momentum: String,

    /// ESG total and performance label; empty outside the US.
    #[serde(rename = "ESG")]
    pub esg: String,
}

/// Insert thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Format a number with thousands separators and a fixed number of decimals.
pub fn format_with_separators(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = formatted
        .split_once('.')
        .map_or((formatted.as_str(), None), |(i, f)| (i, Some(f)));

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{sign}{}.{fraction}", group_thousands(integer)),
        None => format!("{sign}{}", group_thousands(integer)),
    }
}

/// `" (+1.25%)"`, `" (-6.20%)"`, or `" ()"` when unknown.
pub fn format_day_change(change_pct: Option<f64>) -> String {
    match change_pct {
        Some(change) if change >= 0.0 => format!(" (+{change:.2}%)"),
        Some(change) => format!(" ({change:.2}%)"),
        None => " ()".to_string(),
    }
}

/// Price column: separators, zero decimals for currencies quoted in whole
/// units (won, yen), two otherwise, followed by the day change.
pub fn format_price(price: Option<f64>, change_pct: Option<f64>, whole_units: bool) -> String {
    let decimals = if whole_units { 0 } else { 2 };
    let price = price.map_or_else(|| "N/A".to_string(), |p| format_with_separators(p, decimals));
    format!("{price}{}", format_day_change(change_pct))
}

/// A fraction as a two-decimal percentage: `0.1234` becomes `12.34%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// `"buy(+12%)"`, `"hold(-3%)"`, `"none(N/A)"`.
pub fn format_analyst_forecast(recommendation: Option<&str>, upside_pct: Option<f64>) -> String {
    let recommendation = recommendation.unwrap_or("none");
    let upside = match upside_pct {
        Some(u) if u.round() < 0.0 => format!("{}%", u.round()),
        Some(u) => format!("+{}%", u.round().abs()),
        None => "N/A".to_string(),
    };
    format!("{recommendation}({upside})")
}


#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1234.567, 2, "1,234.57")]
    #[case(71300.0, 0, "71,300")]
    #[case(999.0, 0, "999")]
    #[case(1_000_000.0, 2, "1,000,000.00")]
    #[case(-12345.6, 1, "-12,345.6")]
    #[case(0.004, 2, "0.00")]
    fn test_format_with_separators(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
        assert_eq!(format_with_separators(value, decimals), expected);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some(189.3), Some(1.25), false), "189.30 (+1.25%)");
        assert_eq!(format_price(Some(71300.0), Some(-6.2), true), "71,300 (-6.20%)");
        assert_eq!(format_price(Some(10.0), None, false), "10.00 ()");
        assert_eq!(format_price(None, None, false), "N/A ()");
    }

    #[rstest]
    #[case(Some("buy"), Some(12.4), "buy(+12%)")]
    #[case(Some("hold"), Some(-3.6), "hold(-4%)")]
    #[case(Some("sell"), Some(-0.2), "sell(+0%)")]
    #[case(None, None, "none(N/A)")]
    fn test_format_analyst_forecast(
        #[case] recommendation: Option<&str>,
        #[case] upside: Option<f64>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_analyst_forecast(recommendation, upside), expected);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1234), "12.34%");
        assert_eq!(format_percent(0.05), "5.00%");
    }
}
