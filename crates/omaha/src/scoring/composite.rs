//! Additive composite scorer.
//!
//! Every rule adds a fixed amount when its condition holds. A rule whose
//! inputs include an unknown contributes nothing: partial data never passes
//! or fails a comparison on its own.

use crate::industry::IndustryBaseline;
use omaha_factors::GrowthSignal;
use serde::{Deserialize, Serialize};

/// Everything the fundamental score is computed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Debt to equity as a ratio.
    pub de: Option<f64>,
    /// Current ratio.
    pub cr: Option<f64>,
    /// Price to book.
    pub pbr: Option<f64>,
    /// Trailing P/E.
    pub per: Option<f64>,
    /// Industry baselines.
    pub industry: IndustryBaseline,
    /// Return on equity as a fraction.
    pub roe: Option<f64>,
    /// Return on assets as a fraction.
    pub roa: Option<f64>,
    /// EPS growth signal.
    pub eps: GrowthSignal,
    /// Ten-year dividend CAGR as a fraction.
    pub dividend_cagr: Option<f64>,
    /// Interest coverage ratio.
    pub icr: Option<f64>,
}

/// Contribution of each rule to the fundamental score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// `de <= 0.5`: +1.
    pub debt_to_equity: f64,
    /// `1.5 <= cr <= 2.5`: +1.
    pub current_ratio: f64,
    /// `0 < pbr <= 1.5`: +1.
    pub price_to_book: f64,
    /// `roe >= 0.08`: +1.
    pub roe: f64,
    /// `roa >= 0.06`: +1.
    pub roa: f64,
    /// Dividend CAGR tiers: +1.5 / +1 / +0.5.
    pub dividend: f64,
    /// EPS verdict or growth rate: +1 / -1.
    pub eps: f64,
    /// P/E over EPS growth at most 1: +1.
    pub peg: f64,
    /// `icr >= 5`: +1.
    pub interest_coverage: f64,
    /// Overpriced underperformer (-2) or deep value (+0.5).
    pub valuation: f64,
    /// Beats the industry on ROE and ROA: +2 / +1 / +0.5 by P/E.
    pub quality: f64,
}

impl ScoreComponents {
    /// Fundamental score.
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    /// `(rule, contribution)` pairs in evaluation order.
    pub const fn entries(&self) -> [(&'static str, f64); 11] {
        [
            ("debt_to_equity", self.debt_to_equity),
            ("current_ratio", self.current_ratio),
            ("price_to_book", self.price_to_book),
            ("roe", self.roe),
            ("roa", self.roa),
            ("dividend", self.dividend),
            ("eps", self.eps),
            ("peg", self.peg),
            ("interest_coverage", self.interest_coverage),
            ("valuation", self.valuation),
            ("quality", self.quality),
        ]
    }
}

fn gate(value: Option<f64>, pass: impl Fn(f64) -> bool, points: f64) -> f64 {
    match value {
        Some(v) if pass(v) => points,
        _ => 0.0,
    }
}

fn dividend_points(cagr: Option<f64>) -> f64 {
    match cagr {
        Some(c) if c >= 0.10 => 1.5,
        Some(c) if c >= 0.08 => 1.0,
        Some(c) if c >= 0.06 => 0.5,
        _ => 0.0,
    }
}

fn eps_points(eps: GrowthSignal) -> f64 {
    match eps {
        GrowthSignal::Stable(true) => 1.0,
        GrowthSignal::Stable(false) => -1.0,
        GrowthSignal::Growth(g) if g >= 0.10 => 1.0,
        GrowthSignal::Growth(g) if g < 0.0 => -1.0,
        GrowthSignal::Growth(_) | GrowthSignal::Unknown => 0.0,
    }
}

/// Only a numeric growth rate earns the PEG bonus; verdicts never do.
fn peg_points(eps: GrowthSignal, per: Option<f64>) -> f64 {
    match (eps, per) {
        (GrowthSignal::Growth(g), Some(per)) if g > 0.0 && per / (g * 100.0) <= 1.0 => 1.0,
        _ => 0.0,
    }
}

/// Group A, first match wins.
fn valuation_points(inputs: &ScoreInputs) -> f64 {
    let (Some(per), Some(ind_pe), Some(roe), Some(ind_roe)) = (
        inputs.per,
        inputs.industry.pe,
        inputs.roe,
        inputs.industry.roe,
    ) else {
        return 0.0;
    };

    if per > ind_pe && roe < ind_roe {
        -2.0
    } else if per != 0.0
        && per < 0.7 * ind_pe
        && roe < ind_roe
        && inputs.pbr.is_some_and(|pbr| pbr < 1.0)
    {
        0.5
    } else {
        0.0
    }
}

/// Group B, first match wins.
fn quality_points(inputs: &ScoreInputs) -> f64 {
    let (Some(per), Some(ind_pe), Some(roe), Some(ind_roe), Some(roa), Some(ind_roa)) = (
        inputs.per,
        inputs.industry.pe,
        inputs.roe,
        inputs.industry.roe,
        inputs.roa,
        inputs.industry.roa,
    ) else {
        return 0.0;
    };

    if per == 0.0 || roe <= ind_roe || roa <= ind_roa {
        0.0
    } else if per < ind_pe {
        2.0
    } else if per <= 1.2 * ind_pe {
        1.0
    } else {
        0.5
    }
}

impl ScoreInputs {
    /// Evaluate every rule.
    pub fn components(&self) -> ScoreComponents {
        ScoreComponents {
            debt_to_equity: gate(self.de, |de| de <= 0.5, 1.0),
            current_ratio: gate(self.cr, |cr| (1.5..=2.5).contains(&cr), 1.0),
            price_to_book: gate(self.pbr, |pbr| 0.0 < pbr && pbr <= 1.5, 1.0),
            roe: gate(self.roe, |roe| roe >= 0.08, 1.0),
            roa: gate(self.roa, |roa| roa >= 0.06, 1.0),
            dividend: dividend_points(self.dividend_cagr),
            eps: eps_points(self.eps),
            peg: peg_points(self.eps, self.per),
            interest_coverage: gate(self.icr, |icr| icr >= 5.0, 1.0),
            valuation: valuation_points(self),
            quality: quality_points(self),
        }
    }

    /// Fundamental score.
    pub fn score(&self) -> f64 {
        self.components().total()
    }
}
