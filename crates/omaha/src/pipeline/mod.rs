//! Concurrent fetch-score pipeline.
//!
//! A fixed pool of OS threads drains a shared queue of tickers. Each worker
//! scores one ticker at a time and appends qualifying records to a shared
//! list under a single lock. An empty queue is the only termination signal.
//!
//! Network calls block the worker that issued them; the async adapters are
//! driven through a runtime handle inside [`omaha_data::MarketData`].

pub mod config;
pub mod context;
pub mod evaluate;

pub use config::PipelineConfig;
pub use context::ScreenContext;
pub use evaluate::{
    Evaluation, Indicators, evaluate_ticker, extract_indicators, quarterly_eps_stability,
    score_ticker,
};

use omaha_output::ResultRecord;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::thread;
use tracing::{debug, info, warn};

/// Terminal state of one ticker.
///
/// Every dequeued ticker moves through fetching and scoring and ends in
/// exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// Scored at or above the cutoff and added to the results.
    Recorded {
        /// Ticker.
        ticker: String,
        /// Composite score.
        score: f64,
    },
    /// Scored below the cutoff.
    Discarded {
        /// Ticker.
        ticker: String,
        /// Composite score.
        score: f64,
    },
    /// Fetching or scoring failed; the ticker is dropped.
    Failed {
        /// Ticker.
        ticker: String,
        /// Failure description.
        error: String,
        /// Whether the failure was upstream rate limiting.
        rate_limited: bool,
    },
}

impl TickerOutcome {
    /// Ticker this outcome belongs to.
    pub fn ticker(&self) -> &str {
        match self {
            Self::Recorded { ticker, .. }
            | Self::Discarded { ticker, .. }
            | Self::Failed { ticker, .. } => ticker,
        }
    }

    /// Whether the ticker made it into the results.
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

/// Score one ticker and record it when it clears the cutoff.
fn process_ticker(
    ctx: &ScreenContext<'_>,
    config: &PipelineConfig,
    results: &Mutex<Vec<ResultRecord>>,
    ticker: &str,
) -> TickerOutcome {
    let evaluation = match evaluate_ticker(ctx, ticker, config) {
        Ok(evaluation) => evaluation,
        Err(e) => {
            let rate_limited = e.is_rate_limited();
            if rate_limited {
                warn!(ticker = %ticker, "Rate limited, backing off");
            } else {
                debug!(ticker = %ticker, error = %e, "Ticker failed");
            }
            return TickerOutcome::Failed {
                ticker: ticker.to_string(),
                error: e.to_string(),
                rate_limited,
            };
        }
    };

    let name = evaluation.name();
    let score = evaluation.score;

    if let Some(cache) = ctx.cache
        && let Err(e) = cache.put_company_score(&name, score)
    {
        warn!(ticker = %ticker, error = %e, "Failed to cache company score");
    }

    if score < config.cutoff {
        debug!(ticker = %ticker, score, "Below cutoff");
        return TickerOutcome::Discarded {
            ticker: ticker.to_string(),
            score,
        };
    }

    let record = evaluation.to_record(ctx.country);
    results
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(record);

    if let Some(cache) = ctx.cache
        && let Err(e) = cache.put_ticker_name(ticker, &name)
    {
        warn!(ticker = %ticker, error = %e, "Failed to cache ticker name");
    }

    debug!(ticker = %ticker, name = %name, score, "Recorded");
    TickerOutcome::Recorded {
        ticker: ticker.to_string(),
        score,
    }
}

fn worker_loop<F>(
    worker: usize,
    ctx: &ScreenContext<'_>,
    config: &PipelineConfig,
    queue: &Mutex<VecDeque<String>>,
    results: &Mutex<Vec<ResultRecord>>,
    on_outcome: &F,
) where
    F: Fn(&TickerOutcome) + Sync,
{
    let mut processed = 0usize;

    loop {
        let Some(ticker) = queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
        else {
            break;
        };

        let outcome = process_ticker(ctx, config, results, &ticker);
        on_outcome(&outcome);
        processed += 1;

        if matches!(outcome, TickerOutcome::Failed { rate_limited: true, .. }) {
            thread::sleep(config.rate_limit_backoff);
        }
        thread::sleep(config.item_delay);
    }

    debug!(worker, processed, "Worker finished");
}

/// Screen `tickers` and return the records that cleared the cutoff.
///
/// The returned order depends on scheduling; rank before presenting.
/// `on_outcome` is called from worker threads once per ticker.
pub fn run<F>(
    ctx: &ScreenContext<'_>,
    tickers: Vec<String>,
    config: &PipelineConfig,
    on_outcome: F,
) -> Vec<ResultRecord>
where
    F: Fn(&TickerOutcome) + Sync,
{
    let total = tickers.len();
    let workers = config.worker_count().min(total.max(1));
    info!(tickers = total, workers, cutoff = config.cutoff, "Starting screen");

    let queue = Mutex::new(VecDeque::from(tickers));
    let results = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for worker in 0..workers {
            let (queue, results, on_outcome) = (&queue, &results, &on_outcome);
            scope.spawn(move || worker_loop(worker, ctx, config, queue, results, on_outcome));
        }
    });

    let records = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    info!(recorded = records.len(), tickers = total, "Screen complete");
    records
}
