//! Tagged growth signal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an EPS growth measurement.
///
/// A compound growth rate is only meaningful when both ends of the series are
/// positive. Otherwise the extractor falls back to a stability verdict, and
/// the scorer treats the two shapes differently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GrowthSignal {
    /// Not enough data.
    #[default]
    Unknown,
    /// Stability verdict used when a CAGR is undefined.
    Stable(bool),
    /// Compound annual growth rate as a fraction.
    Growth(f64),
}

impl GrowthSignal {
    /// Whether the signal carries any information.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// The growth rate, if this is a numeric signal.
    pub const fn rate(&self) -> Option<f64> {
        match self {
            Self::Growth(rate) => Some(*rate),
            _ => None,
        }
    }
}

impl fmt::Display for GrowthSignal {
    /// `True` / `False` for verdicts, a two-decimal percentage for rates,
    /// `None` when unknown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("None"),
            Self::Stable(true) => f.write_str("True"),
            Self::Stable(false) => f.write_str("False"),
            Self::Growth(rate) => write!(f, "{:.2}%", rate * 100.0),
        }
    }
}
