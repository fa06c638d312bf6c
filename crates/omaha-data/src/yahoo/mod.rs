//! Yahoo Finance data providers.

pub mod fundamentals;
pub mod market;
pub mod quotes;

pub use fundamentals::{YahooFundamentalsProvider, parse_quote_summary, parse_timeseries};
pub use market::YahooMarketData;
pub use quotes::{YahooQuoteProvider, closes_by_symbol};
