//! Scoring
//!
//! - **Composite**: additive fundamental rules over ratios, growth signals
//!   and industry baselines
//! - **Cyclicality**: keyword classification of the industry label, an
//!   optional adjustment on top of the composite

pub mod composite;
pub mod cyclicality;

pub use composite::{ScoreComponents, ScoreInputs};
pub use cyclicality::{Cyclicality, classify, cyclicality_adjustment};
