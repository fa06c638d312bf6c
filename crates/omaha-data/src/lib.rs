#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/omaha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
mod http;
pub mod industry;
pub mod provider;
pub mod series;
pub mod snapshot;
pub mod universe;
pub mod yahoo;

pub use cache::SqliteCache;
pub use error::{DataError, Result};
pub use industry::{IndustryTable, IndustryTables, NaverPeerPe};
pub use provider::{MarketData, PeerPeLookup, ScoreCache};
pub use series::{Observation, SeriesKind, TimeSeries};
pub use snapshot::{EsgSummary, FinancialSnapshot};
pub use yahoo::YahooMarketData;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
