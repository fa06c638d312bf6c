//! Momentum Factors
//!
//! Price momentum over three horizons, computed once for the whole universe
//! from a single batched close history:
//! - **Short** (63 trading days, ~3 months)
//! - **Mid** (126 trading days, ~6 months)
//! - **Long** (240 trading days, ~12 months)
//!
//! The three readings are folded into a sub-score in `[-1, 1]` that is added
//! to the fundamental score.

pub mod batch;
pub mod score;

pub use batch::{
    LONG, MID, MomentumConfig, MomentumReading, MomentumTable, SHORT, day_change, momentum,
    momentum_batch,
};
pub use score::{Horizon, format_momentum, momentum_score};
