//! Omaha CLI binary.
//!
//! Provides the command-line interface for the Omaha value screener.

mod integration;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use integration::cache_manager::{open_cache, resolve_cache_path};
use integration::setup::ScreenSetup;
use omaha::pipeline::{self, evaluate_ticker, quarterly_eps_stability};
use omaha::{
    Country, PipelineConfig, ScreenError, TickerOutcome, TickerUniverse, Universe, UniverseSource,
};
use omaha_data::ScoreCache;
use omaha_output::{ExportFormat, Exporter, export_file_stem, rank, render_table};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "omaha")]
#[command(about = "Omaha: value-investing equity screener", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Score cache database (default: platform cache dir)
    #[arg(long, global = true)]
    cache_path: Option<PathBuf>,

    /// Do not read or write the score cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen a universe and export the ranked results
    Screen(ScreenArgs),

    /// Score a single ticker and show every component
    Inspect {
        /// Ticker symbol
        ticker: String,

        /// Market of the ticker (two-letter code)
        #[arg(long, default_value = "US")]
        country: String,

        /// Apply the cyclicality adjustment
        #[arg(long)]
        cyclicality: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show cached company scores
    Cached {
        /// Only companies scoring at least this much
        #[arg(long)]
        cutoff: Option<f64>,

        /// List cached ticker names instead of scores
        #[arg(long)]
        tickers: bool,

        /// Delete every cached entry
        #[arg(long)]
        clear: bool,
    },

    /// Print the resolved ticker universe without scoring
    Universe(UniverseArgs),
}

#[derive(Args)]
struct UniverseArgs {
    /// Screen the largest listings of a country (two-letter code)
    #[arg(long)]
    country: Option<String>,

    /// Number of listings to request for a country universe
    #[arg(long, default_value = "100")]
    limit: usize,

    /// Screen the NASDAQ-100 instead of the S&P 500
    #[arg(long, conflicts_with = "country")]
    nasdaq100: bool,

    /// FinancialModelingPrep API key for country universes
    #[arg(long, env = "FMP_API_KEY", hide_env_values = true)]
    fmp_api_key: Option<String>,
}

impl UniverseArgs {
    fn source(&self) -> Result<UniverseSource, ScreenError> {
        if self.nasdaq100 {
            return Ok(UniverseSource::Nasdaq100);
        }

        self.country
            .as_deref()
            .map_or(Ok(UniverseSource::Sp500), |code| {
                Ok(UniverseSource::Country {
                    country: code.parse()?,
                    limit: self.limit,
                })
            })
    }
}

#[derive(Args)]
struct ScreenArgs {
    #[command(flatten)]
    universe: UniverseArgs,

    /// Worker threads
    #[arg(long, default_value = "20")]
    threads: usize,

    /// Minimum composite score to record
    #[arg(long, default_value = "5.0")]
    cutoff: f64,

    /// Pause after each ticker, per worker, in milliseconds
    #[arg(long, default_value = "2000")]
    delay_ms: u64,

    /// Extra pause after a rate-limited ticker, in seconds
    #[arg(long, default_value = "10")]
    backoff_secs: u64,

    /// Apply the cyclicality adjustment
    #[arg(long)]
    cyclicality: bool,

    /// Export format (csv, json or pretty-json)
    #[arg(long, default_value = "csv")]
    format: String,

    /// Directory for the export file
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Rows to show in the summary table
    #[arg(long, default_value = "20")]
    top: usize,
}

impl ScreenArgs {
    const fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            threads: self.threads,
            cutoff: self.cutoff,
            item_delay: Duration::from_millis(self.delay_ms),
            rate_limit_backoff: Duration::from_secs(self.backoff_secs),
            cyclicality: self.cyclicality,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cache_path = if cli.no_cache {
        None
    } else {
        Some(resolve_cache_path(cli.cache_path.as_deref()))
    };

    match cli.command {
        Commands::Screen(args) => {
            let runtime = build_runtime()?;
            screen(&runtime, &args, cache_path.as_deref())?;
        }
        Commands::Inspect {
            ticker,
            country,
            cyclicality,
            format,
        } => {
            let runtime = build_runtime()?;
            inspect(&runtime, &ticker, &country, cyclicality, &format)?;
        }
        Commands::Cached {
            cutoff,
            tickers,
            clear,
        } => {
            let path = cache_path.ok_or("the score cache is disabled (--no-cache)")?;
            show_cache(&path, cutoff, tickers, clear)?;
        }
        Commands::Universe(args) => {
            let runtime = build_runtime()?;
            list_universe(&runtime, &args)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn print_header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn screen(
    runtime: &Runtime,
    args: &ScreenArgs,
    cache_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: ExportFormat = args.format.parse()?;
    let source = args.universe.source()?;
    let country = source.country();
    let config = args.pipeline_config();

    print_header(&format!("VALUE SCREEN: {}", source.label()));

    let universe =
        runtime.block_on(TickerUniverse::resolve(source, args.universe.fmp_api_key.clone()))?;
    println!("Universe: {} tickers", universe.size());
    println!("Country: {}", country);
    println!(
        "Workers: {}  Cutoff: {:.1}  Cyclicality: {}",
        config.worker_count(),
        config.cutoff,
        if config.cyclicality { "on" } else { "off" }
    );

    let cache = cache_path.and_then(|path| {
        open_cache(Some(path))
            .inspect_err(|e| warn!(error = %e, "Score cache unavailable, continuing without it"))
            .ok()
    });
    match (&cache, cache_path) {
        (Some(_), Some(path)) => println!("  Cache: {}", path.display()),
        _ => println!("  Cache: Disabled"),
    }
    println!();

    let setup = ScreenSetup::prepare(runtime, country, universe.as_slice())?;
    let today = today();
    let base = setup.context(today);
    let ctx = cache.as_ref().map_or(base, |cache| base.with_cache(cache));

    let label = universe.source().label();
    let tickers = universe.into_symbols();
    let total = tickers.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Screening...");

    let recorded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);
    let records = pipeline::run(&ctx, tickers, &config, |outcome| {
        match outcome {
            TickerOutcome::Recorded { .. } => {
                recorded.fetch_add(1, Ordering::Relaxed);
            }
            TickerOutcome::Failed { .. } => {
                failed.fetch_add(1, Ordering::Relaxed);
            }
            TickerOutcome::Discarded { .. } => {}
        }
        pb.set_message(format!(
            "{} ({} recorded)",
            outcome.ticker(),
            recorded.load(Ordering::Relaxed)
        ));
        pb.inc(1);
    });
    pb.finish_with_message(format!(
        "Screened {} tickers: {} recorded, {} failed",
        total,
        records.len(),
        failed.load(Ordering::Relaxed)
    ));

    let ranked = rank(records);
    println!();
    println!("{}", render_table(&ranked, args.top));

    std::fs::create_dir_all(&args.output_dir)?;
    let path = args.output_dir.join(format!(
        "{}.{}",
        export_file_stem(&label, today),
        format.extension()
    ));
    ranked.export_to_file(&path, format)?;
    info!(path = %path.display(), records = ranked.len(), "Exported results");
    println!("Saved {} records to {}", ranked.len(), path.display());

    Ok(())
}

fn inspect(
    runtime: &Runtime,
    ticker: &str,
    country: &str,
    cyclicality: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ticker = ticker.to_uppercase();
    let country: Country = country.parse()?;
    let config = PipelineConfig::default().with_cyclicality(cyclicality);

    let setup = ScreenSetup::prepare(runtime, country, std::slice::from_ref(&ticker))?;
    let ctx = setup.context(today());

    let evaluation = evaluate_ticker(&ctx, &ticker, &config)?;
    let quarterly = quarterly_eps_stability(&ctx, &ticker)
        .inspect_err(|e| warn!(ticker = %ticker, error = %e, "Quarterly EPS unavailable"))
        .ok()
        .flatten();

    if format == "json" {
        let output = json!({
            "evaluation": evaluation,
            "quarterly_eps_stable": quarterly,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_header(&format!("SCORE BREAKDOWN: {}", ticker));

    let snapshot = &evaluation.snapshot;
    println!("Name: {}", evaluation.name());
    println!(
        "Industry: {} ({})",
        snapshot.industry.as_deref().unwrap_or("Unknown"),
        evaluation
            .cyclicality
            .map_or_else(|| "unclassified".to_string(), |c| c.to_string())
    );
    println!("Sector: {}", snapshot.sector.as_deref().unwrap_or("Unknown"));
    println!(
        "Industry P/E: {}  ROE: {}  ROA: {}",
        fmt_value(evaluation.baseline.pe),
        fmt_pct(evaluation.baseline.roe),
        fmt_pct(evaluation.baseline.roa)
    );
    println!();

    println!("{:<24} {:>8}", "Component", "Points");
    println!("{}", "-".repeat(33));
    for (name, points) in evaluation.components.entries() {
        println!("{:<24} {:>8.2}", name, points);
    }
    println!("{}", "-".repeat(33));
    println!("{:<24} {:>8.2}", "Fundamental", evaluation.components.total());
    println!("{:<24} {:>8.2}", "Momentum", evaluation.momentum_score);
    println!("{:<24} {:>8.2}", "Cyclicality", evaluation.cyclicality_adjustment);
    println!("{:<24} {:>8.2}", "B-Score", evaluation.score);
    println!();

    let indicators = &evaluation.indicators;
    println!("Indicators:");
    println!("  D/E:                    {}", fmt_value(snapshot.debt_to_equity));
    println!("  Current ratio:          {}", fmt_value(snapshot.current_ratio));
    println!("  P/B:                    {}", fmt_value(snapshot.price_to_book));
    println!("  Trailing P/E:           {}", fmt_value(snapshot.trailing_pe));
    println!("  ROE:                    {}", fmt_pct(snapshot.return_on_equity));
    println!("  ROA:                    {}", fmt_pct(snapshot.return_on_assets));
    println!("  Interest coverage:      {}", fmt_value(indicators.icr));
    println!("  EPS growth:             {}", indicators.eps);
    println!("  EPS stable (annual):    {}", fmt_flag(indicators.eps_stable));
    println!("  EPS stable (quarterly): {}", fmt_flag(quarterly));
    println!("  Dividend CAGR:          {}", fmt_pct(indicators.dividend_cagr));
    println!("  Dividend stable:        {}", fmt_flag(indicators.dividend_stable));
    println!("  BVPS stable:            {}", fmt_flag(indicators.book_value_stable));
    println!(
        "  Momentum (3/6/12m):     {} / {} / {}",
        fmt_pct(indicators.momentum.short),
        fmt_pct(indicators.momentum.mid),
        fmt_pct(indicators.momentum.long)
    );

    Ok(())
}

fn show_cache(
    path: &Path,
    cutoff: Option<f64>,
    tickers: bool,
    clear: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache = open_cache(Some(path))?;

    if clear {
        cache.clear_all()?;
        println!("Cleared cache at {}", path.display());
        return Ok(());
    }

    let stats = cache.get_stats()?;
    println!("Cache: {}", path.display());
    println!(
        "  {} company scores, {} ticker names",
        stats.company_count, stats.ticker_count
    );
    println!();

    if tickers {
        for (ticker, name) in cache.ticker_names()? {
            println!("{:<12} {}", ticker, name);
        }
        return Ok(());
    }

    let scores = cutoff.map_or_else(
        || cache.company_scores(),
        |cutoff| cache.company_scores_above(cutoff),
    )?;
    for (name, score) in &scores {
        println!("{:>7.2}  {}", score, name);
    }
    if scores.is_empty() {
        println!("No cached scores");
    }

    Ok(())
}

fn list_universe(runtime: &Runtime, args: &UniverseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = args.source()?;
    let label = source.label();
    let universe = runtime.block_on(TickerUniverse::resolve(source, args.fmp_api_key.clone()))?;

    for symbol in universe.as_slice() {
        println!("{}", symbol);
    }
    eprintln!("{}: {} tickers", label, universe.size());

    Ok(())
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}", v))
}

fn fmt_pct(fraction: Option<f64>) -> String {
    fraction.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn fmt_flag(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
    .to_string()
}
