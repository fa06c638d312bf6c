//! Setup errors.
//!
//! Per-ticker failures never surface here: workers log them and move on.

use omaha_data::DataError;
use thiserror::Error;

/// Failures that stop a run before the pipeline starts.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The ticker universe could not be resolved.
    #[error("Failed to resolve ticker universe: {0}")]
    Universe(#[source] DataError),

    /// The industry reference tables were unavailable or malformed.
    #[error("Failed to load industry reference tables: {0}")]
    IndustryTables(#[source] DataError),

    /// A data source could not be constructed.
    #[error("Data source error: {0}")]
    Data(#[from] DataError),

    /// Unrecognized country code.
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    /// The resolved universe was empty.
    #[error("Ticker universe is empty")]
    EmptyUniverse,
}

/// Result alias for setup operations.
pub type Result<T> = std::result::Result<T, ScreenError>;
