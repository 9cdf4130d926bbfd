//! Event Sensitivity CLI
//!
//! Looks up one stock and prints its projection for an expected rate

use anyhow::Context;
use clap::{Parser, ValueEnum};
use event_sensitivity::dataset::{DatasetStore, Field, DEFAULT_DATA_DIR};
use event_sensitivity::interpret::INCOME_INTERPRETATION_HEADING;
use event_sensitivity::query::DEFAULT_EXPECTED_RATE;
use event_sensitivity::report::{write_table_csv, ProjectionReport};
use event_sensitivity::{
    query, CalculationMode, DuplicatePolicy, EventType, ProjectionConfig, QueryError, QueryRequest,
};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EventArg {
    Inflation,
    InterestRate,
}

impl From<EventArg> for EventType {
    fn from(arg: EventArg) -> Self {
        match arg {
            EventArg::Inflation => EventType::Inflation,
            EventArg::InterestRate => EventType::InterestRate,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Simple,
    Dynamic,
}

impl From<MethodArg> for CalculationMode {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Simple => CalculationMode::Simple,
            MethodArg::Dynamic => CalculationMode::Dynamic,
        }
    }
}

#[derive(Parser)]
#[command(name = "event_sensitivity")]
#[command(about = "Project a stock's price and income statement for an expected inflation or interest rate", long_about = None)]
#[command(version)]
struct Cli {
    /// Stock symbol (exact, case-sensitive)
    symbol: String,

    /// Macroeconomic event to analyze
    #[arg(long, value_enum, default_value = "inflation")]
    event: EventArg,

    /// Expected upcoming rate, in percent
    #[arg(long, default_value_t = DEFAULT_EXPECTED_RATE, allow_negative_numbers = true)]
    rate: f64,

    /// Calculation method
    #[arg(long, value_enum, default_value = "dynamic")]
    method: MethodArg,

    /// Directory holding the four CSV datasets
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Project repeated column names again instead of keeping the first row
    #[arg(long)]
    allow_duplicates: bool,

    /// Print the source event and income rows
    #[arg(long)]
    show_rows: bool,

    /// Write the projection table to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON report
    #[arg(long)]
    json: Option<PathBuf>,
}

fn print_fields(fields: &[Field]) {
    for field in fields {
        println!("  {:<50} {:?}", field.name, field.value);
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let store = DatasetStore::load_dir(&cli.data_dir)
        .with_context(|| format!("Failed to load datasets from {}", cli.data_dir.display()))?;

    let config = ProjectionConfig {
        duplicate_policy: if cli.allow_duplicates {
            DuplicatePolicy::Allow
        } else {
            DuplicatePolicy::SkipExisting
        },
    };
    let request = QueryRequest::new(cli.symbol.clone(), cli.event.into(), cli.rate, cli.method.into());

    let outcome = match query(&store, &request, &config) {
        Ok(outcome) => outcome,
        Err(QueryError::NotFound { .. }) => {
            eprintln!("Stock symbol not found in the data. Please check the symbol and try again.");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let event_type = request.event_type;
    println!("Details for {}", request.symbol);
    println!("{}", "=".repeat(60));

    if cli.show_rows {
        println!("\n{} Event Data ({}):", event_type, outcome.event_row.symbol);
        print_fields(&outcome.event_row.fields);
        println!("\nIncome Statement Data ({}):", outcome.income_row.stock_name);
        print_fields(&outcome.income_row.fields);
    }

    let projection = &outcome.projection;
    println!(
        "\nProjected Changes Based on Expected {} ({} method, {:.2}%):",
        event_type, projection.method, projection.expected_rate
    );
    if let Some(rate_change) = projection.rate_change {
        println!("  Rate change from latest event value: {:+.4}", rate_change);
    }
    println!("{:<50} {:>18} {:>18} {:>16}", "Parameter", "Current Value", "Projected Value", "Change");
    println!("{}", "-".repeat(105));
    for row in &projection.table {
        println!(
            "{:<50} {:>18.4} {:>18.4} {:>+16.4}",
            row.parameter(),
            row.current_value(),
            row.projected_value(),
            row.change()
        );
    }

    if !projection.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &projection.warnings {
            println!("  - {}", warning);
        }
    }

    println!("\n{}", event_type.interpretation_heading());
    for judgment in outcome.event_judgments() {
        println!("  {}", judgment);
    }
    println!("\n{}", INCOME_INTERPRETATION_HEADING);
    for judgment in outcome.income_judgments() {
        println!("  {}", judgment);
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        write_table_csv(&projection.table, file)?;
        println!("\nProjection table written to: {}", path.display());
    }

    if let Some(path) = &cli.json {
        let report = ProjectionReport::from_outcome(&outcome);
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("Unable to write {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

