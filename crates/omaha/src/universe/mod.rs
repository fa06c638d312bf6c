//! Ticker universes.
//!
//! A run screens either an index (S&P 500, NASDAQ-100) or the largest
//! listings of one country from the FinancialModelingPrep screener.

use crate::country::Country;
use crate::error::{Result, ScreenError};
use omaha_data::universe::{FmpScreener, fetch_nasdaq100_symbols, fetch_sp500_symbols};
use omaha_output::UniverseLabel;
use tracing::{debug, info};

/// Trait for stock universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

/// Where the tickers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseSource {
    /// S&P 500 constituents.
    Sp500,
    /// NASDAQ-100 constituents.
    Nasdaq100,
    /// The `limit` largest listings of a country.
    Country {
        /// Market to screen.
        country: Country,
        /// Number of listings requested from the screener.
        limit: usize,
    },
}

impl UniverseSource {
    /// Market context of the universe; index universes are US.
    pub fn country(&self) -> Country {
        match self {
            Self::Sp500 | Self::Nasdaq100 => Country::UnitedStates,
            Self::Country { country, .. } => country.clone(),
        }
    }

    /// Label used to name the export file.
    pub fn label(&self) -> UniverseLabel {
        match self {
            Self::Sp500 => UniverseLabel::Sp500,
            Self::Nasdaq100 => UniverseLabel::Nasdaq100,
            Self::Country { country, .. } => UniverseLabel::Country(country.code().to_string()),
        }
    }
}

/// Resolved list of tickers for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerUniverse {
    source: UniverseSource,
    symbols: Vec<String>,
}

impl TickerUniverse {
    /// Wrap an already resolved list, applying the preferred-share filter.
    pub fn new(source: UniverseSource, symbols: Vec<String>) -> Self {
        let symbols = filter_preferred_shares(&source.country(), symbols);
        Self { source, symbols }
    }

    /// Fetch the symbols for `source`.
    ///
    /// Country universes need a FinancialModelingPrep API key.
    pub async fn resolve(source: UniverseSource, fmp_api_key: Option<String>) -> Result<Self> {
        let symbols = match &source {
            UniverseSource::Sp500 => fetch_sp500_symbols().await,
            UniverseSource::Nasdaq100 => fetch_nasdaq100_symbols().await,
            UniverseSource::Country { country, limit } => {
                let screener = FmpScreener::new(fmp_api_key).map_err(ScreenError::Universe)?;
                screener.tickers(country.code(), *limit).await
            }
        }
        .map_err(ScreenError::Universe)?;

        let fetched = symbols.len();
        let universe = Self::new(source, symbols);
        if universe.symbols.is_empty() {
            return Err(ScreenError::EmptyUniverse);
        }

        info!(
            source = ?universe.source,
            fetched,
            kept = universe.symbols.len(),
            "Resolved ticker universe"
        );
        Ok(universe)
    }

    /// Source the symbols came from.
    pub const fn source(&self) -> &UniverseSource {
        &self.source
    }

    /// Borrow the symbols without cloning.
    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    /// Consume the universe, returning its symbols.
    pub fn into_symbols(self) -> Vec<String> {
        self.symbols
    }
}

impl Universe for TickerUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn size(&self) -> usize {
        self.symbols.len()
    }
}

/// Whether a KRX code names a preferred-share issue.
///
/// Common shares end their six-digit code in `0`; preferred classes use
/// `5`, `7`, `9` or a letter in the sixth position.
pub fn is_korean_preferred(ticker: &str) -> bool {
    ticker
        .chars()
        .nth(5)
        .is_some_and(|c| c != '0')
}

/// Drop preferred-share issues from a Korean universe; other countries pass
/// through untouched.
pub fn filter_preferred_shares(country: &Country, symbols: Vec<String>) -> Vec<String> {
    if *country != Country::Korea {
        return symbols;
    }

    symbols
        .into_iter()
        .filter(|ticker| {
            let preferred = is_korean_preferred(ticker);
            if preferred {
                debug!(ticker = %ticker, "Dropping preferred share");
            }
            !preferred
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn owned(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("005930.KS", false)]
    #[case("005935.KS", true)]
    #[case("00088K.KS", true)]
    #[case("035720.KQ", false)]
    #[case("AAPL", false)]
    fn test_is_korean_preferred(#[case] ticker: &str, #[case] expected: bool) {
        assert_eq!(is_korean_preferred(ticker), expected);
    }

    #[test]
    fn test_filter_only_applies_to_korea() {
        let symbols = owned(&["005930.KS", "005935.KS", "000660.KS", "005385.KS"]);

        assert_eq!(
            filter_preferred_shares(&Country::Korea, symbols.clone()),
            owned(&["005930.KS", "000660.KS"])
        );
        assert_eq!(filter_preferred_shares(&Country::Japan, symbols.clone()), symbols);
    }

    #[test]
    fn test_universe_trait() {
        let universe = TickerUniverse::new(
            UniverseSource::Country {
                country: Country::Korea,
                limit: 4,
            },
            owned(&["005930.KS", "005935.KS", "000660.KS"]),
        );

        assert_eq!(universe.size(), 2);
        assert!(universe.contains("005930.KS"));
        assert!(!universe.contains("005935.KS"));
        assert_eq!(universe.source().country(), Country::Korea);
    }

    #[test]
    fn test_labels() {
        assert_eq!(UniverseSource::Sp500.label(), UniverseLabel::Sp500);
        assert_eq!(UniverseSource::Nasdaq100.country(), Country::UnitedStates);
        assert_eq!(
            UniverseSource::Country {
                country: Country::Japan,
                limit: 50
            }
            .label(),
            UniverseLabel::Country("JP".to_string())
        );
    }
}
