//! Batched price momentum over fixed trading-day windows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roughly three months of trading days.
pub const SHORT: usize = 63;
/// Roughly six months of trading days.
pub const MID: usize = 126;
/// Roughly twelve months of trading days, leaving room for holidays in a one-year download.
pub const LONG: usize = 240;

/// Configuration for the momentum windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MomentumConfig {
    /// Short window in trading days (default: 63)
    pub short_window: usize,
    /// Mid window in trading days (default: 126)
    pub mid_window: usize,
    /// Long window in trading days (default: 240)
    pub long_window: usize,
    /// Calendar days of history to download (default: 365)
    pub lookback_days: u32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            short_window: SHORT,
            mid_window: MID,
            long_window: LONG,
            lookback_days: 365,
        }
    }
}

impl MomentumConfig {
    /// The three windows, short to long.
    pub const fn windows(&self) -> [usize; 3] {
        [self.short_window, self.mid_window, self.long_window]
    }
}

/// `(last / prices[len - window]) - 1`.
///
/// `None` with fewer than `window` prices or a non-positive base price.
pub fn momentum(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }

    let base = prices[prices.len() - window];
    let last = *prices.last()?;
    if base <= 0.0 || !base.is_finite() || !last.is_finite() {
        return None;
    }

    Some(last / base - 1.0)
}

/// Momentum for every ticker and window, in the order of `windows`.
pub fn momentum_batch(
    history: &HashMap<String, Vec<f64>>,
    windows: &[usize],
) -> HashMap<String, Vec<Option<f64>>> {
    history
        .iter()
        .map(|(ticker, prices)| {
            let values = windows.iter().map(|w| momentum(prices, *w)).collect();
            (ticker.clone(), values)
        })
        .collect()
}

/// Percent change between the last two closes.
pub fn day_change(closes: &[f64]) -> Option<f64> {
    let [.., previous, last] = closes else {
        return None;
    };

    if *previous == 0.0 {
        return None;
    }

    Some((last - previous) / previous * 100.0)
}

/// Short, mid and long momentum plus the latest day change for one ticker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumReading {
    /// Short window momentum as a fraction.
    pub short: Option<f64>,
    /// Mid window momentum as a fraction.
    pub mid: Option<f64>,
    /// Long window momentum as a fraction.
    pub long: Option<f64>,
    /// Last day's change in percent.
    pub day_change: Option<f64>,
}

/// Momentum readings for a whole universe, computed once before scoring.
#[derive(Debug, Clone, Default)]
pub struct MomentumTable {
    readings: HashMap<String, MomentumReading>,
}

impl MomentumTable {
    /// Compute readings from per-ticker closes (oldest first).
    pub fn from_history(history: &HashMap<String, Vec<f64>>, config: &MomentumConfig) -> Self {
        let readings = momentum_batch(history, &config.windows())
            .into_iter()
            .map(|(ticker, values)| {
                let window = |i: usize| values.get(i).copied().flatten();
                let reading = MomentumReading {
                    short: window(0),
                    mid: window(1),
                    long: window(2),
                    day_change: history.get(&ticker).map(Vec::as_slice).and_then(day_change),
                };
                (ticker, reading)
            })
            .collect();

        Self { readings }
    }

    /// Reading for `ticker`; all unknown when the ticker had no history.
    pub fn get(&self, ticker: &str) -> MomentumReading {
        self.readings.get(ticker).copied().unwrap_or_default()
    }

    /// Number of tickers with history.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether no ticker had history.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
