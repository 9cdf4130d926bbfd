//! Project every symbol of an event type over a grid of expected rates
//!
//! Outputs one CSV row per symbol and rate with the stock-price projection

use anyhow::{bail, Context};
use clap::Parser;
use event_sensitivity::dataset::{DatasetStore, DEFAULT_DATA_DIR};
use event_sensitivity::{
    CalculationMode, EventType, ProjectionConfig, ProjectionEngine, QueryError,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rate_sweep")]
#[command(about = "Sweep expected rates across every symbol of an event type", long_about = None)]
struct Args {
    /// Event type: "inflation" or "interest-rate"
    #[arg(long, default_value = "inflation")]
    event: EventType,

    /// Calculation method: "simple" or "dynamic"
    #[arg(long, default_value = "dynamic")]
    method: CalculationMode,

    /// First rate of the grid, in percent
    #[arg(long, allow_negative_numbers = true)]
    from: f64,

    /// Last rate of the grid (inclusive), in percent
    #[arg(long, allow_negative_numbers = true)]
    to: f64,

    /// Grid step, in percent
    #[arg(long, default_value_t = 0.25)]
    step: f64,

    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

/// One symbol at one rate
#[derive(Debug, Clone, Serialize)]
struct SweepRow {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Expected Rate")]
    expected_rate: f64,
    #[serde(rename = "Current Price")]
    current_price: Option<f64>,
    #[serde(rename = "Projected Price")]
    projected_price: Option<f64>,
    #[serde(rename = "Change")]
    change: Option<f64>,
    #[serde(rename = "Warnings")]
    warnings: usize,
}

/// Upper bound on the number of rates in one sweep
const MAX_GRID_POINTS: usize = 100_000;

fn rate_grid(from: f64, to: f64, step: f64) -> anyhow::Result<Vec<f64>> {
    if !(from.is_finite() && to.is_finite()) {
        bail!(QueryError::InvalidRate(if from.is_finite() { to } else { from }));
    }
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number, got {}", step);
    }
    if to < from {
        bail!("--to ({}) is below --from ({})", to, from);
    }

    let steps = (to - from) / step;
    if !steps.is_finite() || steps >= MAX_GRID_POINTS as f64 {
        bail!(
            "rate grid {}..={} by {} exceeds {} points",
            from,
            to,
            step,
            MAX_GRID_POINTS
        );
    }

    // Index-based so the grid does not drift with repeated addition
    let count = (steps + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| from + step * i as f64).collect())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading datasets from {}...", args.data_dir.display());

    let store = DatasetStore::load_dir(&args.data_dir)
        .with_context(|| format!("Failed to load datasets from {}", args.data_dir.display()))?;
    let symbols = store.symbols(args.event);
    println!("Loaded {} {} symbols in {:?}", symbols.len(), args.event, start.elapsed());

    let rates = rate_grid(args.from, args.to, args.step)?;
    let engine = ProjectionEngine::new(ProjectionConfig::default());

    println!("Running {} projections...", symbols.len() * rates.len());
    let proj_start = Instant::now();

    // Store is read-only, so symbols project in parallel
    let results: Vec<Vec<SweepRow>> = symbols
        .par_iter()
        .map(|symbol| {
            let Some((event, income)) = store.find(symbol, args.event) else {
                return Vec::new();
            };
            rates
                .iter()
                .map(|&rate| {
                    let projection = engine.project(event, income, rate, args.event, args.method);
                    let price = projection.table.stock_price();
                    SweepRow {
                        symbol: symbol.to_string(),
                        expected_rate: rate,
                        current_price: price.map(|r| r.current_value()),
                        projected_price: price.map(|r| r.projected_value()),
                        change: price.map(|r| r.change()),
                        warnings: projection.warnings.len(),
                    }
                })
                .collect()
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    for row in results.iter().flatten() {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    let missing_price = results
        .iter()
        .filter(|rows| rows.first().is_some_and(|r| r.projected_price.is_none()))
        .count();
    if missing_price > 0 {
        println!("  {} symbols had no stock-price projection (see warnings)", missing_price);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
