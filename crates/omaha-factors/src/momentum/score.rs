//! Momentum sub-score.

use crate::stability::round2;

/// Thresholds and weight for one horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizon {
    /// At or above this return the horizon scores +1.
    pub good: f64,
    /// At or below this return the horizon scores -1.
    pub bad: f64,
    /// Weight in the blended score.
    pub weight: f64,
}

impl Horizon {
    /// +1, -1 or 0. Unknown momentum scores 0.
    pub fn vote(&self, momentum: Option<f64>) -> f64 {
        match momentum {
            Some(m) if m >= self.good => 1.0,
            Some(m) if m <= self.bad => -1.0,
            _ => 0.0,
        }
    }
}

/// Three months: +5% / -5%.
pub const SHORT_HORIZON: Horizon = Horizon {
    good: 0.05,
    bad: -0.05,
    weight: 0.3,
};

/// Six months: +10% / -5%.
pub const MID_HORIZON: Horizon = Horizon {
    good: 0.10,
    bad: -0.05,
    weight: 0.5,
};

/// Twelve months: +15% / 0%.
pub const LONG_HORIZON: Horizon = Horizon {
    good: 0.15,
    bad: 0.0,
    weight: 1.2,
};

/// Weighted vote of the three horizons divided by the weight sum, rounded to 2 dp.
///
/// The result lies in `[-1, 1]`.
pub fn momentum_score(short: Option<f64>, mid: Option<f64>, long: Option<f64>) -> f64 {
    let horizons = [(SHORT_HORIZON, short), (MID_HORIZON, mid), (LONG_HORIZON, long)];

    let total: f64 = horizons.iter().map(|(h, m)| h.vote(*m) * h.weight).sum();
    let weights: f64 = horizons.iter().map(|(h, _)| h.weight).sum();

    round2(total / weights)
}

/// `"6.0%/11.0%/None"`.
pub fn format_momentum(short: Option<f64>, mid: Option<f64>, long: Option<f64>) -> String {
    [short, mid, long]
        .iter()
        .map(|m| m.map_or_else(|| "None".to_string(), |v| format!("{:.1}%", v * 100.0)))
        .collect::<Vec<_>>()
        .join("/")
}
