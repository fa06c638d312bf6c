//! Ticker universe sources.

pub mod fmp;
pub mod nasdaq100;
pub mod sp500;

pub use fmp::FmpScreener;
pub use nasdaq100::{fetch_nasdaq100_symbols, parse_nasdaq100_html};
pub use sp500::{fetch_sp500_symbols, parse_constituents_csv};

/// Yahoo spells share classes with a dash (`BRK-B`), index lists with a dot.
pub(crate) fn to_yahoo_symbol(symbol: &str) -> String {
    symbol.trim().replace('.', "-")
}
