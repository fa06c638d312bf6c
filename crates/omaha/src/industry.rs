//! Industry reference baselines.
//!
//! Built once before the workers start and shared read-only. Each ticker's
//! P/E, ROE and ROA are judged against the averages of its industry, with
//! country-dependent fallbacks.

use crate::country::Country;
use omaha_data::{IndustryTable, IndustryTables, MarketData, PeerPeLookup};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// ROE baseline when no industry figure is available.
pub const DEFAULT_ROE: f64 = 0.08;

/// ROA baseline when no industry figure is available.
pub const DEFAULT_ROA: f64 = 0.06;

/// Industry averages a ticker is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndustryBaseline {
    /// Industry trailing P/E.
    pub pe: Option<f64>,
    /// Industry return on equity as a fraction.
    pub roe: Option<f64>,
    /// Industry return on assets as a fraction.
    pub roa: Option<f64>,
}

/// Resolves [`IndustryBaseline`]s for one country.
pub struct IndustryResolver {
    country: Country,
    tables: Option<IndustryTables>,
    benchmark_pe: Option<f64>,
    peer_pe: Option<Box<dyn PeerPeLookup>>,
}

impl fmt::Debug for IndustryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndustryResolver")
            .field("country", &self.country)
            .field("tables", &self.tables.is_some())
            .field("benchmark_pe", &self.benchmark_pe)
            .field("peer_pe", &self.peer_pe.is_some())
            .finish()
    }
}

impl IndustryResolver {
    /// Assemble a resolver from already loaded parts.
    ///
    /// `tables` are ignored outside the US, `peer_pe` outside Korea.
    pub fn new(
        country: Country,
        tables: Option<IndustryTables>,
        benchmark_pe: Option<f64>,
        peer_pe: Option<Box<dyn PeerPeLookup>>,
    ) -> Self {
        Self {
            tables: tables.filter(|_| country.uses_industry_tables()),
            peer_pe: peer_pe.filter(|_| country == Country::Korea),
            country,
            benchmark_pe,
        }
    }

    /// Build a resolver, querying the benchmark index P/E from `market`.
    ///
    /// A failed benchmark lookup leaves the fallback unknown rather than
    /// failing the run.
    pub fn build(
        country: Country,
        tables: Option<IndustryTables>,
        market: &dyn MarketData,
        peer_pe: Option<Box<dyn PeerPeLookup>>,
    ) -> Self {
        let benchmark_pe = country.benchmark_ticker().and_then(|benchmark| {
            match market.fetch_trailing_pe(benchmark) {
                Ok(pe) => {
                    info!(benchmark, pe = ?pe, "Loaded benchmark P/E");
                    pe
                }
                Err(e) => {
                    warn!(benchmark, error = %e, "Benchmark P/E unavailable");
                    None
                }
            }
        });

        Self::new(country, tables, benchmark_pe, peer_pe)
    }

    /// Country this resolver serves.
    pub const fn country(&self) -> &Country {
        &self.country
    }

    /// Benchmark index P/E, if it was available.
    pub const fn benchmark_pe(&self) -> Option<f64> {
        self.benchmark_pe
    }

    /// Baselines for a ticker in `industry`.
    pub fn resolve(&self, industry: Option<&str>, ticker: &str) -> IndustryBaseline {
        IndustryBaseline {
            pe: self.industry_pe(industry, ticker),
            roe: Some(self.table_ratio(industry, |t| &t.roe).unwrap_or(DEFAULT_ROE)),
            roa: Some(self.table_ratio(industry, |t| &t.roa).unwrap_or(DEFAULT_ROA)),
        }
    }

    fn table_ratio(
        &self,
        industry: Option<&str>,
        table: impl Fn(&IndustryTables) -> &IndustryTable,
    ) -> Option<f64> {
        let tables = self.tables.as_ref()?;
        table(tables).get(industry?).map(|pct| pct / 100.0)
    }

    fn industry_pe(&self, industry: Option<&str>, ticker: &str) -> Option<f64> {
        match self.country {
            Country::UnitedStates => self
                .tables
                .as_ref()
                .zip(industry)
                .and_then(|(tables, industry)| tables.pe.get(industry))
                .or(self.benchmark_pe),
            Country::Korea => self
                .peer_pe
                .as_ref()
                .and_then(|peer| peer.same_industry_pe(ticker)),
            Country::Japan | Country::Other(_) => self.benchmark_pe,
        }
    }
}
