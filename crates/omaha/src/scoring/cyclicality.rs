//! Industry cyclicality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Industries that move with the business cycle.
const CYCLICAL_KEYWORDS: &[&str] = &[
    "auto",
    "apparel",
    "footwear",
    "home improvement",
    "retail",
    "internet retail",
    "leisure",
    "lodging",
    "restaurant",
    "specialty retail",
    "textile",
    "travel",
    "coal",
    "oil",
    "gas",
    "renewable",
    "asset management",
    "bank",
    "capital markets",
    "credit services",
    "insurance",
    "mortgage",
    "real estate",
    "aerospace",
    "defense",
    "air freight",
    "airline",
    "building",
    "conglomerate",
    "construction",
    "electrical equipment",
    "engineering",
    "industrial",
    "machinery",
    "marine",
    "railroad",
    "waste",
    "chemical",
    "container",
    "metal",
    "paper",
    "advertising",
    "broadcasting",
    "cable",
    "casino",
    "communication",
    "gaming",
    "interactive media",
    "movies",
    "publishing",
    "radio",
    "recreational",
    "software",
    "semiconductor",
    "information technology",
    "it services",
];

/// Industries with steady demand through a downturn.
const DEFENSIVE_KEYWORDS: &[&str] = &[
    "beverages",
    "confectioner",
    "food",
    "household",
    "packaged",
    "personal product",
    "tobacco",
    "biotech",
    "healthcare",
    "health",
    "medical device",
    "pharma",
    "utility",
    "power producer",
    "utilities",
];

/// Cyclicality of an industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cyclicality {
    /// Earnings follow the cycle.
    Cyclical,
    /// Earnings hold up in a downturn.
    Defensive,
    /// No keyword matched.
    Neutral,
}

impl Cyclicality {
    /// Score adjustment when cyclicality scoring is enabled.
    pub const fn adjustment(&self) -> f64 {
        match self {
            Self::Cyclical => -0.5,
            Self::Defensive => 1.0,
            Self::Neutral => 0.0,
        }
    }

    /// Lower-case label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cyclical => "cyclical",
            Self::Defensive => "defensive",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Cyclicality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an industry label by keyword.
///
/// Cyclical keywords are checked before defensive ones. `None` when the label
/// is absent or blank.
pub fn classify(industry: Option<&str>) -> Option<Cyclicality> {
    let label = industry.map(str::trim).filter(|s| !s.is_empty())?.to_lowercase();

    if CYCLICAL_KEYWORDS.iter().any(|kw| label.contains(kw)) {
        Some(Cyclicality::Cyclical)
    } else if DEFENSIVE_KEYWORDS.iter().any(|kw| label.contains(kw)) {
        Some(Cyclicality::Defensive)
    } else {
        Some(Cyclicality::Neutral)
    }
}

/// Adjustment for an optional classification; unknown scores 0.
pub fn cyclicality_adjustment(cyclicality: Option<Cyclicality>) -> f64 {
    cyclicality.map_or(0.0, |c| c.adjustment())
}
