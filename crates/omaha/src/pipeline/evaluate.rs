//! Scoring of a single ticker.

use crate::country::Country;
use crate::industry::IndustryBaseline;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::context::ScreenContext;
use crate::scoring::{Cyclicality, ScoreComponents, ScoreInputs, classify, cyclicality_adjustment};
use omaha_data::{DataError, FinancialSnapshot, SeriesKind, TimeSeries};
use omaha_factors::growth::{
    dividend_cagr, eps_growth_cagr, has_stable_book_value_growth, has_stable_dividend_growth,
    has_stable_eps_growth, has_stable_quarterly_eps_growth,
};
use omaha_factors::momentum::format_momentum;
use omaha_factors::{
    GrowthSignal, MomentumReading, interest_coverage_ratio, momentum_score, round_to, round2,
};
use omaha_output::ResultRecord;
use omaha_output::record::{format_analyst_forecast, format_percent, format_price};
use serde::Serialize;
use tracing::debug;

/// Indicators extracted from a ticker's statements and prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Indicators {
    /// Interest coverage ratio.
    pub icr: Option<f64>,
    /// EPS growth rate or verdict.
    pub eps: GrowthSignal,
    /// Annual EPS stability.
    pub eps_stable: Option<bool>,
    /// Ten-year dividend CAGR.
    pub dividend_cagr: Option<f64>,
    /// Ten-year dividend stability.
    pub dividend_stable: Option<bool>,
    /// Book value per share stability.
    pub book_value_stable: Option<bool>,
    /// Price momentum and day change.
    pub momentum: MomentumReading,
}

/// Full result of scoring one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Ticker as queued.
    pub ticker: String,
    /// Fundamental snapshot.
    pub snapshot: FinancialSnapshot,
    /// Industry baselines used for comparison.
    pub baseline: IndustryBaseline,
    /// Extracted indicators.
    pub indicators: Indicators,
    /// Per-rule fundamental contributions.
    pub components: ScoreComponents,
    /// Momentum sub-score.
    pub momentum_score: f64,
    /// Industry cyclicality.
    pub cyclicality: Option<Cyclicality>,
    /// Cyclicality adjustment actually applied (zero when disabled).
    pub cyclicality_adjustment: f64,
    /// Composite score.
    pub score: f64,
}

impl Evaluation {
    /// Company display name.
    pub fn name(&self) -> String {
        self.snapshot.display_name(&self.ticker)
    }

    /// Export row for this evaluation.
    pub fn to_record(&self, country: &Country) -> ResultRecord {
        let snapshot = &self.snapshot;
        let indicators = &self.indicators;
        let momentum = indicators.momentum;
        let ratio = |v: Option<f64>| v.map(round2);

        let esg = if country.reports_esg() {
            snapshot.esg.as_ref().map(|e| e.display()).unwrap_or_default()
        } else {
            String::new()
        };

        ResultRecord {
            ticker: self.ticker.clone(),
            name: self.name(),
            industry: snapshot.industry.clone(),
            price: format_price(
                snapshot.current_price,
                momentum.day_change,
                country.whole_unit_prices(),
            ),
            debt_to_equity: ratio(snapshot.debt_to_equity),
            current_ratio: ratio(snapshot.current_ratio),
            price_to_book: ratio(snapshot.price_to_book),
            trailing_pe: ratio(snapshot.trailing_pe),
            roe: snapshot.return_on_equity.map(format_percent),
            roa: snapshot.return_on_assets.map(format_percent),
            icr: indicators.icr,
            eps_cagr: indicators.eps.is_known().then(|| indicators.eps.to_string()),
            dividend_cagr: indicators.dividend_cagr.map(format_percent),
            dividend_stable: indicators.dividend_stable,
            book_value_stable: indicators.book_value_stable,
            score: round_to(self.score, 1),
            analyst_forecast: format_analyst_forecast(
                snapshot.recommendation_key.as_deref(),
                snapshot.target_upside_pct(),
            ),
            momentum: format_momentum(momentum.short, momentum.mid, momentum.long),
            esg,
        }
    }
}

/// Fetch one series. Failures other than rate limiting leave it empty so the
/// indicators that read it come out unknown.
fn fetch_series(
    ctx: &ScreenContext<'_>,
    ticker: &str,
    kind: SeriesKind,
) -> Result<TimeSeries, DataError> {
    match ctx.market.fetch_time_series(ticker, kind) {
        Ok(series) => Ok(series),
        Err(e) if e.is_rate_limited() => Err(e),
        Err(e) => {
            debug!(ticker = %ticker, series = %kind, error = %e, "Series unavailable");
            Ok(TimeSeries::empty())
        }
    }
}

/// Extract every indicator for `ticker`.
pub fn extract_indicators(
    ctx: &ScreenContext<'_>,
    ticker: &str,
    sector: Option<&str>,
) -> Result<Indicators, DataError> {
    let dividends = fetch_series(ctx, ticker, SeriesKind::Dividends)?;
    let eps = fetch_series(ctx, ticker, SeriesKind::AnnualDilutedEps)?;
    let operating_income = fetch_series(ctx, ticker, SeriesKind::AnnualOperatingIncome)?;
    let interest_expense = fetch_series(ctx, ticker, SeriesKind::AnnualInterestExpense)?;
    let equity = fetch_series(ctx, ticker, SeriesKind::AnnualCommonEquity)?;
    let shares = fetch_series(ctx, ticker, SeriesKind::AnnualSharesOutstanding)?;

    let today = ctx.today;
    Ok(Indicators {
        icr: interest_coverage_ratio(&operating_income, &interest_expense, today),
        eps: eps_growth_cagr(&eps, today),
        eps_stable: has_stable_eps_growth(&eps, today),
        dividend_cagr: dividend_cagr(&dividends, today),
        dividend_stable: has_stable_dividend_growth(&dividends, today),
        book_value_stable: has_stable_book_value_growth(&equity, &shares, sector, today),
        momentum: ctx.momentum.get(ticker),
    })
}

/// Score a ticker from an already fetched snapshot and indicators.
pub fn score_ticker(
    ctx: &ScreenContext<'_>,
    ticker: &str,
    snapshot: FinancialSnapshot,
    indicators: Indicators,
    config: &PipelineConfig,
) -> Evaluation {
    let industry = snapshot.industry.as_deref();
    let baseline = ctx.industry.resolve(industry, ticker);
    let cyclicality = classify(industry);

    let inputs = ScoreInputs {
        de: snapshot.debt_to_equity,
        cr: snapshot.current_ratio,
        pbr: snapshot.price_to_book,
        per: snapshot.trailing_pe,
        industry: baseline,
        roe: snapshot.return_on_equity,
        roa: snapshot.return_on_assets,
        eps: indicators.eps,
        dividend_cagr: indicators.dividend_cagr,
        icr: indicators.icr,
    };

    let components = inputs.components();
    let reading = indicators.momentum;
    let momentum_score = momentum_score(reading.short, reading.mid, reading.long);
    let cyclicality_adjustment = if config.cyclicality {
        cyclicality_adjustment(cyclicality)
    } else {
        0.0
    };

    Evaluation {
        ticker: ticker.to_string(),
        score: components.total() + momentum_score + cyclicality_adjustment,
        snapshot,
        baseline,
        indicators,
        components,
        momentum_score,
        cyclicality,
        cyclicality_adjustment,
    }
}

/// Fetch, extract and score one ticker.
///
/// A snapshot failure fails the ticker. A missing series only makes the
/// indicators built on it unknown, unless the failure was rate limiting.
pub fn evaluate_ticker(
    ctx: &ScreenContext<'_>,
    ticker: &str,
    config: &PipelineConfig,
) -> Result<Evaluation, DataError> {
    debug!(ticker = %ticker, "Fetching");
    let snapshot = ctx.market.fetch_snapshot(ticker)?;
    let indicators = extract_indicators(ctx, ticker, snapshot.sector.as_deref())?;

    debug!(ticker = %ticker, "Scoring");
    Ok(score_ticker(ctx, ticker, snapshot, indicators, config))
}

/// Quarterly EPS stability, which the composite does not use.
pub fn quarterly_eps_stability(
    ctx: &ScreenContext<'_>,
    ticker: &str,
) -> Result<Option<bool>, DataError> {
    let quarterly = fetch_series(ctx, ticker, SeriesKind::QuarterlyDilutedEps)?;
    Ok(has_stable_quarterly_eps_growth(&quarterly))
}
