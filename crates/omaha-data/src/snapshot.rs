//! Point-in-time fundamental snapshot of one company.

use serde::{Deserialize, Serialize};

/// Sustainability scores as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgSummary {
    /// Total ESG risk score.
    pub total: Option<f64>,
    /// Provider's performance label (e.g. `LAG_PERF`, `AVG_PERF`).
    pub performance: Option<String>,
}

impl EsgSummary {
    /// `"{total}, {performance}"`, or an empty string when either half is missing.
    pub fn display(&self) -> String {
        match (self.total, self.performance.as_deref()) {
            (Some(total), Some(performance)) => format!("{total}, {performance}"),
            _ => String::new(),
        }
    }
}

/// Key ratios and descriptive fields for one ticker.
///
/// Every field is optional. A missing figure stays `None` all the way through
/// scoring; it is never treated as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Debt to equity as a ratio (1.0 means debt equals equity).
    pub debt_to_equity: Option<f64>,
    /// Current assets over current liabilities.
    pub current_ratio: Option<f64>,
    /// Price to book.
    pub price_to_book: Option<f64>,
    /// Trailing twelve month price to earnings.
    pub trailing_pe: Option<f64>,
    /// Return on equity as a fraction.
    pub return_on_equity: Option<f64>,
    /// Return on assets as a fraction.
    pub return_on_assets: Option<f64>,
    /// Last traded price.
    pub current_price: Option<f64>,
    /// Mean analyst price target.
    pub target_mean_price: Option<f64>,
    /// Registered company name.
    pub long_name: Option<String>,
    /// Short display name.
    pub short_name: Option<String>,
    /// Industry label, e.g. `Consumer Electronics`.
    pub industry: Option<String>,
    /// Sector label, e.g. `Technology`.
    pub sector: Option<String>,
    /// Consensus recommendation, e.g. `buy`.
    pub recommendation_key: Option<String>,
    /// Sustainability scores.
    pub esg: Option<EsgSummary>,
}

impl FinancialSnapshot {
    /// Long name, else short name, else the ticker itself.
    pub fn display_name(&self, ticker: &str) -> String {
        self.long_name
            .as_deref()
            .or(self.short_name.as_deref())
            .unwrap_or(ticker)
            .to_string()
    }

    /// Analyst target upside in percent relative to the current price.
    ///
    /// `None` when either price is missing or zero.
    pub fn target_upside_pct(&self) -> Option<f64> {
        match (self.current_price, self.target_mean_price) {
            (Some(price), Some(target)) if price != 0.0 && target != 0.0 => {
                Some((target - price) / price * 100.0)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_display_name_fallbacks() {
        let mut snapshot = FinancialSnapshot::default();
        assert_eq!(snapshot.display_name("AAPL"), "AAPL");

        snapshot.short_name = Some("Apple".into());
        assert_eq!(snapshot.display_name("AAPL"), "Apple");

        snapshot.long_name = Some("Apple Inc.".into());
        assert_eq!(snapshot.display_name("AAPL"), "Apple Inc.");
    }

    #[test]
    fn test_target_upside() {
        let snapshot = FinancialSnapshot {
            current_price: Some(100.0),
            target_mean_price: Some(112.0),
            ..Default::default()
        };
        assert_relative_eq!(snapshot.target_upside_pct().unwrap(), 12.0);

        let no_target = FinancialSnapshot {
            current_price: Some(100.0),
            target_mean_price: Some(0.0),
            ..Default::default()
        };
        assert!(no_target.target_upside_pct().is_none());
    }

    #[test]
    fn test_esg_display() {
        let esg = EsgSummary {
            total: Some(17.2),
            performance: Some("AVG_PERF".into()),
        };
        assert_eq!(esg.display(), "17.2, AVG_PERF");
        assert_eq!(EsgSummary::default().display(), "");
    }
}
