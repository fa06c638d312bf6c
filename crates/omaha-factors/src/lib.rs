#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/omaha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod coverage;
pub mod growth;
pub mod momentum;
pub mod signal;
pub mod stability;

pub use coverage::interest_coverage_ratio;
pub use momentum::{MomentumConfig, MomentumReading, MomentumTable, momentum_score};
pub use signal::GrowthSignal;
pub use stability::{is_monotonic_within_tolerance, round_to, round2};
