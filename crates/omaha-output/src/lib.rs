#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/omaha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod ranking;
pub mod record;
pub mod summary;

pub use export::{
    ExportError, ExportFormat, Exporter, UniverseLabel, export_file_stem, last_weekday,
};
pub use ranking::rank;
pub use record::ResultRecord;
pub use summary::render_table;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
