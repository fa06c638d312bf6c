//! Country context.
//!
//! Which market a run screens decides the P/E baseline, how prices are
//! printed, and whether ESG scores are requested.

use crate::error::ScreenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market being screened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    /// United States, the default market.
    #[default]
    UnitedStates,
    /// South Korea (KRX listings, `.KS` / `.KQ`).
    Korea,
    /// Japan (`.T`).
    Japan,
    /// Any other market, by two-letter code.
    Other(String),
}

impl Country {
    /// Two-letter code, upper case.
    pub fn code(&self) -> &str {
        match self {
            Self::UnitedStates => "US",
            Self::Korea => "KR",
            Self::Japan => "JP",
            Self::Other(code) => code,
        }
    }

    /// Index ETF whose trailing P/E stands in for the industry P/E.
    ///
    /// Korea has none: it uses the live same-industry figure instead.
    pub const fn benchmark_ticker(&self) -> Option<&'static str> {
        match self {
            Self::UnitedStates => Some("SPY"),
            Self::Korea => None,
            Self::Japan => Some("EWJ"),
            Self::Other(_) => Some("VT"),
        }
    }

    /// Whether the scraped industry tables apply.
    pub const fn uses_industry_tables(&self) -> bool {
        matches!(self, Self::UnitedStates)
    }

    /// Whether ESG scores are requested.
    pub const fn reports_esg(&self) -> bool {
        matches!(self, Self::UnitedStates)
    }

    /// Whether prices are quoted in whole currency units (won, yen).
    pub const fn whole_unit_prices(&self) -> bool {
        matches!(self, Self::Korea | Self::Japan)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        match code.as_str() {
            "US" => Ok(Self::UnitedStates),
            "KR" => Ok(Self::Korea),
            "JP" => Ok(Self::Japan),
            _ if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Ok(Self::Other(code))
            }
            _ => Err(ScreenError::UnknownCountry(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("us", Country::UnitedStates)]
    #[case("KR", Country::Korea)]
    #[case(" jp ", Country::Japan)]
    #[case("uk", Country::Other("UK".to_string()))]
    fn test_parse(#[case] input: &str, #[case] expected: Country) {
        assert_eq!(input.parse::<Country>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("USA")]
    #[case("1A")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Country>(),
            Err(ScreenError::UnknownCountry(_))
        ));
    }

    #[test]
    fn test_benchmarks() {
        assert_eq!(Country::UnitedStates.benchmark_ticker(), Some("SPY"));
        assert_eq!(Country::Korea.benchmark_ticker(), None);
        assert_eq!(Country::Japan.benchmark_ticker(), Some("EWJ"));
        assert_eq!(Country::Other("CH".into()).benchmark_ticker(), Some("VT"));
    }

    #[test]
    fn test_market_conventions() {
        assert!(Country::UnitedStates.reports_esg());
        assert!(!Country::Japan.reports_esg());
        assert!(Country::Korea.whole_unit_prices());
        assert!(!Country::Other("UK".into()).whole_unit_prices());
        assert_eq!(Country::Other("CH".into()).to_string(), "CH");
    }
}
