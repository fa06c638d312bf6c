//! Caching layer for screening results.

pub mod sqlite;

pub use sqlite::{CacheStats, SqliteCache};
