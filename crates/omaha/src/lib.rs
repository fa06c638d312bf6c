#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/omaha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod country;
pub mod error;
pub mod industry;
pub mod pipeline;
pub mod scoring;
pub mod universe;

// Re-export main types from sub-crates
pub use omaha_data as data;
pub use omaha_factors as factors;
pub use omaha_output as output;

pub use country::Country;
pub use error::{Result, ScreenError};
pub use industry::{IndustryBaseline, IndustryResolver};
pub use pipeline::{PipelineConfig, ScreenContext, TickerOutcome};
pub use scoring::{Cyclicality, ScoreComponents, ScoreInputs};
pub use universe::{TickerUniverse, Universe, UniverseSource};

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
