//! Export of ranked screening results.
//!
//! CSV for spreadsheets, JSON for downstream tooling. Column names follow the
//! serde renames on [`ResultRecord`].

use crate::record::ResultRecord;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid format error.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Comma-separated values format.
    #[default]
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" | "pretty" => Ok(Self::PrettyJson),
            other => Err(ExportError::InvalidFormat(other.to_string())),
        }
    }
}

/// Trait for types that can be exported.
pub trait Exporter {
    /// Export to a string in the specified format.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export to a file at the given path.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Exporter for [ResultRecord] {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
                String::from_utf8(bytes).map_err(|e| ExportError::InvalidFormat(e.to_string()))
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<ResultRecord> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        self.as_slice().export_to_string(format)
    }
}

/// What a run screened; decides the export file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniverseLabel {
    /// S&P 500 constituents.
    Sp500,
    /// NASDAQ-100 constituents.
    Nasdaq100,
    /// A country screen, by two-letter code.
    Country(String),
}

impl fmt::Display for UniverseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sp500 => write!(f, "sp500"),
            Self::Nasdaq100 => write!(f, "nasdaq100"),
            Self::Country(code) => write!(f, "result_{code}"),
        }
    }
}

/// `date`, or the Friday before it when it falls on a weekend.
pub fn last_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}

/// File name without extension: `result_KR_20250606`, `sp500_20250606`.
pub fn export_file_stem(label: &UniverseLabel, date: NaiveDate) -> String {
    format!("{label}_{}", last_weekday(date).format("%Y%m%d"))
}
