//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Time conversion error
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// Rate limit error
    #[error("Rate limit exceeded, please retry after {retry_after_ms}ms")]
    RateLimit {
        /// Milliseconds to wait before retrying
        retry_after_ms: u64,
    },

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code returned by the server
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// An upstream page or payload no longer has the expected shape
    #[error("Unexpected upstream structure: {0}")]
    Structure(String),

    /// A required API key was not configured
    #[error("Missing API key: {0}")]
    MissingApiKey(&'static str),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether the upstream rejected the request for sending too many requests.
    ///
    /// Some adapters only surface the upstream message, so a `429` or
    /// `Too Many Requests` anywhere in the rendered error also counts.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Self::RateLimit { .. } => true,
            Self::Http { status, .. } => *status == 429,
            Self::Network(e) => e.status().is_some_and(|s| s.as_u16() == 429),
            other => {
                let message = other.to_string();
                message.contains("429") || message.contains("Too Many Requests")
            }
        }
    }
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DataError::RateLimit { retry_after_ms: 10_000 }, true)]
    #[case(DataError::Http { status: 429, url: "https://example.com".into() }, true)]
    #[case(DataError::Http { status: 404, url: "https://example.com".into() }, false)]
    #[case(DataError::YahooApi("fetching the data from yahoo! finance failed: 429".into()), true)]
    #[case(DataError::YahooApi("Too Many Requests".into()), true)]
    #[case(DataError::Parse("bad number".into()), false)]
    #[case(DataError::Structure("no table".into()), false)]
    fn test_is_rate_limited(#[case] err: DataError, #[case] expected: bool) {
        assert_eq!(err.is_rate_limited(), expected);
    }
}
