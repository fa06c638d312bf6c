//! One-time setup before the workers start.
//!
//! Loads the industry references, the market data adapters and the momentum
//! table for a resolved universe. Everything built here is shared read-only
//! by the pipeline.

use chrono::NaiveDate;
use omaha::{Country, IndustryResolver, ScreenContext, ScreenError};
use omaha_data::{IndustryTables, MarketData, NaverPeerPe, PeerPeLookup, YahooMarketData};
use omaha_factors::{MomentumConfig, MomentumTable};
use std::collections::HashMap;
use tokio::runtime::Runtime;
use tracing::{info, warn};

/// Adapters and reference data for one run.
#[derive(Debug)]
pub(crate) struct ScreenSetup {
    pub(crate) country: Country,
    pub(crate) market: YahooMarketData,
    pub(crate) industry: IndustryResolver,
    pub(crate) momentum: MomentumTable,
}

impl ScreenSetup {
    /// Build everything the pipeline needs for `tickers` in `country`.
    ///
    /// Missing industry tables abort the run; missing price history only
    /// leaves momentum unknown.
    pub(crate) fn prepare(
        runtime: &Runtime,
        country: Country,
        tickers: &[String],
    ) -> Result<Self, ScreenError> {
        let tables = if country.uses_industry_tables() {
            let tables = runtime
                .block_on(IndustryTables::fetch())
                .map_err(ScreenError::IndustryTables)?;
            Some(tables)
        } else {
            None
        };

        let market = YahooMarketData::new(runtime.handle().clone())?.with_esg(country.reports_esg());

        let peer_pe: Option<Box<dyn PeerPeLookup>> = if country == Country::Korea {
            Some(Box::new(NaverPeerPe::new(runtime.handle().clone())?))
        } else {
            None
        };

        let industry = IndustryResolver::build(country.clone(), tables, &market, peer_pe);
        let momentum = load_momentum(&market, tickers, &MomentumConfig::default());

        Ok(Self {
            country,
            market,
            industry,
            momentum,
        })
    }

    /// Borrow the setup as a pipeline context dated `today`.
    pub(crate) fn context(&self, today: NaiveDate) -> ScreenContext<'_> {
        ScreenContext::new(
            &self.market,
            &self.industry,
            &self.momentum,
            &self.country,
            today,
        )
    }
}

/// Download one batch of closes and compute momentum for every ticker.
pub(crate) fn load_momentum(
    market: &dyn MarketData,
    tickers: &[String],
    config: &MomentumConfig,
) -> MomentumTable {
    let history = market
        .fetch_batch_price_history(tickers, config.lookback_days)
        .unwrap_or_else(|e| {
            warn!(error = %e, "Price history unavailable, momentum left unknown");
            HashMap::new()
        });

    let table = MomentumTable::from_history(&history, config);
    info!(tickers = tickers.len(), priced = table.len(), "Computed momentum");
    table
}
