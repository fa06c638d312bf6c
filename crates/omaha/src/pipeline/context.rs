//! Shared, read-only state handed to every worker.

use crate::country::Country;
use crate::industry::IndustryResolver;
use chrono::NaiveDate;
use omaha_data::{MarketData, ScoreCache};
use omaha_factors::MomentumTable;
use std::fmt;

/// Everything a worker needs besides the ticker itself.
///
/// Built once per run after setup; workers only borrow it.
#[derive(Clone, Copy)]
pub struct ScreenContext<'a> {
    /// Fundamentals and price source.
    pub market: &'a dyn MarketData,
    /// Industry baselines.
    pub industry: &'a IndustryResolver,
    /// Momentum readings precomputed for the whole universe.
    pub momentum: &'a MomentumTable,
    /// Score cache for the downstream narrative step.
    pub cache: Option<&'a dyn ScoreCache>,
    /// Market being screened.
    pub country: &'a Country,
    /// Reference date for every age and window check.
    pub today: NaiveDate,
}

impl fmt::Debug for ScreenContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenContext")
            .field("industry", self.industry)
            .field("momentum", &self.momentum.len())
            .field("cache", &self.cache.is_some())
            .field("country", self.country)
            .field("today", &self.today)
            .finish()
    }
}

impl<'a> ScreenContext<'a> {
    /// Context without a score cache.
    pub const fn new(
        market: &'a dyn MarketData,
        industry: &'a IndustryResolver,
        momentum: &'a MomentumTable,
        country: &'a Country,
        today: NaiveDate,
    ) -> Self {
        Self {
            market,
            industry,
            momentum,
            cache: None,
            country,
            today,
        }
    }

    /// Attach a score cache.
    pub const fn with_cache(mut self, cache: &'a dyn ScoreCache) -> Self {
        self.cache = Some(cache);
        self
    }
}
