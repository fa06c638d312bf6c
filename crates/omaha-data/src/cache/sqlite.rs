//! SQLite cache for company scores and ticker names.

use crate::error::Result;
use crate::provider::ScoreCache;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// SQLite cache shared by every pipeline worker.
///
/// Two tables: `company_scores` (display name to latest composite score) and
/// `ticker_names` (ticker to display name, only for tickers that made the
/// cutoff).
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

/// Summary counts for the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Rows in `company_scores`.
    pub company_count: usize,
    /// Rows in `ticker_names`.
    pub ticker_count: usize,
}

impl SqliteCache {
    /// Create a new SQLite cache.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory cache (useful for testing).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS company_scores (
                name TEXT PRIMARY KEY,
                score REAL NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_company_scores_score ON company_scores(score)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS ticker_names (
                ticker TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Company scores at or above `cutoff`, highest first.
    pub fn company_scores_above(&self, cutoff: f64) -> Result<Vec<(String, f64)>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT name, score FROM company_scores
             WHERE score >= ?1
             ORDER BY score DESC, name ASC",
        )?;

        let rows = stmt
            .query_map(params![cutoff], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, f64)>, _>>()?;

        Ok(rows)
    }

    /// All recorded tickers with their display names, sorted by ticker.
    pub fn ticker_names(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT ticker, name FROM ticker_names ORDER BY ticker")?;

        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()?;

        Ok(rows)
    }

    /// Clear all cached data.
    pub fn clear_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute("DELETE FROM company_scores", [])?;
        conn.execute("DELETE FROM ticker_names", [])?;
        Ok(())
    }

    /// Get cache statistics.
    pub fn get_stats(&self) -> Result<CacheStats> {
        let conn = self.conn();
        let company_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM company_scores", [], |row| row.get(0))?;
        let ticker_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM ticker_names", [], |row| row.get(0))?;

        Ok(CacheStats {
            company_count: company_count as usize,
            ticker_count: ticker_count as usize,
        })
    }
}

impl ScoreCache for SqliteCache {
    fn put_company_score(&self, name: &str, score: f64) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        self.conn().execute(
            "INSERT OR REPLACE INTO company_scores (name, score, updated_at)
             VALUES (?1, ?2, ?3)",
            params![name, score, updated_at],
        )?;

        Ok(())
    }

    fn get_company_score(&self, name: &str) -> Result<Option<f64>> {
        let result = self
            .conn()
            .query_row(
                "SELECT score FROM company_scores WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(result)
    }

    fn put_ticker_name(&self, ticker: &str, name: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();

        self.conn().execute(
            "INSERT OR REPLACE INTO ticker_names (ticker, name, updated_at)
             VALUES (?1, ?2, ?3)",
            params![ticker, name, updated_at],
        )?;

        Ok(())
    }

    fn get_ticker_name(&self, ticker: &str) -> Result<Option<String>> {
        let result = self
            .conn()
            .query_row(
                "SELECT name FROM ticker_names WHERE ticker = ?1",
                params![ticker],
                |row| row.get(0),
            )
            .optional()?;

        Ok(result)
    }

    fn company_scores(&self) -> Result<Vec<(String, f64)>> {
        self.company_scores_above(f64::NEG_INFINITY)
    }
}
