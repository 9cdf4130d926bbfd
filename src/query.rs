//! Query path: resolve a symbol, project it and interpret it
//!
//! The store is loaded once and passed in by reference, so any number of
//! queries can run against the same read-only tables.

use crate::dataset::{DatasetStore, EventRow, IncomeRow};
use crate::error::{DatasetError, QueryError};
use crate::event::{CalculationMode, EventType};
use crate::interpret::{interpret_event, interpret_income};
use crate::projection::{Projection, ProjectionConfig, ProjectionEngine};
use std::path::Path;

/// Default target rate, in percent
pub const DEFAULT_EXPECTED_RATE: f64 = 3.65;

/// The four logical inputs of a query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub symbol: String,
    pub event_type: EventType,
    /// Target rate in percent
    pub expected_rate: f64,
    pub method: CalculationMode,
}

impl QueryRequest {
    pub fn new(
        symbol: impl Into<String>,
        event_type: EventType,
        expected_rate: f64,
        method: CalculationMode,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            event_type,
            expected_rate,
            method,
        }
    }
}

/// Everything the presentation side needs for one symbol
#[derive(Debug, Clone)]
pub struct QueryOutcome<'a> {
    pub event_row: &'a EventRow,
    pub income_row: &'a IncomeRow,
    pub projection: Projection,
    /// Event judgments first, then income judgments
    pub judgments: Vec<String>,
    event_judgments: usize,
}

impl QueryOutcome<'_> {
    fn split(&self) -> usize {
        self.event_judgments.min(self.judgments.len())
    }

    /// Judgments on the event coefficient
    pub fn event_judgments(&self) -> &[String] {
        &self.judgments[..self.split()]
    }

    /// Judgments on the income statement
    pub fn income_judgments(&self) -> &[String] {
        &self.judgments[self.split()..]
    }
}

/// Resolve `request.symbol` and project it
pub fn query<'a>(
    store: &'a DatasetStore,
    request: &QueryRequest,
    config: &ProjectionConfig,
) -> Result<QueryOutcome<'a>, QueryError> {
    run_query(store, &ProjectionEngine::new(config.clone()), request)
}

fn run_query<'a>(
    store: &'a DatasetStore,
    engine: &ProjectionEngine,
    request: &QueryRequest,
) -> Result<QueryOutcome<'a>, QueryError> {
    if !request.expected_rate.is_finite() {
        return Err(QueryError::InvalidRate(request.expected_rate));
    }

    let (event_row, income_row) = store
        .find(&request.symbol, request.event_type)
        .ok_or_else(|| QueryError::NotFound {
            symbol: request.symbol.clone(),
            event_type: request.event_type,
        })?;

    let projection = engine.project(
        event_row,
        income_row,
        request.expected_rate,
        request.event_type,
        request.method,
    );

    let mut judgments = interpret_event(request.event_type, event_row);
    let event_judgments = judgments.len();
    judgments.extend(interpret_income(income_row));

    Ok(QueryOutcome {
        event_row,
        income_row,
        projection,
        judgments,
        event_judgments,
    })
}

/// Pre-loaded store and engine for running many queries
///
/// # Example
/// ```ignore
/// let runner = QueryRunner::from_dir("data")?;
/// for rate in [2.5, 3.65, 5.0] {
///     let request = QueryRequest::new("ACME", EventType::Inflation, rate, CalculationMode::Dynamic);
///     let outcome = runner.run(&request)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryRunner {
    store: DatasetStore,
    engine: ProjectionEngine,
}

impl QueryRunner {
    /// Runner over an already-built store with the default configuration
    pub fn new(store: DatasetStore) -> Self {
        Self::with_config(store, ProjectionConfig::default())
    }

    pub fn with_config(store: DatasetStore, config: ProjectionConfig) -> Self {
        Self {
            store,
            engine: ProjectionEngine::new(config),
        }
    }

    /// Load the default dataset file names from a directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        Ok(Self::new(DatasetStore::load_dir(dir)?))
    }

    pub fn run(&self, request: &QueryRequest) -> Result<QueryOutcome<'_>, QueryError> {
        run_query(&self.store, &self.engine, request)
    }

    /// Run one symbol over several target rates
    pub fn run_rates(
        &self,
        symbol: &str,
        event_type: EventType,
        method: CalculationMode,
        rates: &[f64],
    ) -> Result<Vec<Projection>, QueryError> {
        rates
            .iter()
            .map(|&rate| {
                let request = QueryRequest::new(symbol, event_type, rate, method);
                self.run(&request).map(|outcome| outcome.projection)
            })
            .collect()
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{EventTables, AVERAGE_OPERATING_MARGIN, LATEST_EVENT_VALUE};
    use crate::projection::PROJECTED_STOCK_PRICE;

    fn test_store() -> DatasetStore {
        let inflation = EventTables::new(
            vec![EventRow::new("ABC", 1.5).with_close_price(100.0)],
            vec![IncomeRow::new("ABC")
                .with_number(LATEST_EVENT_VALUE, 3.0)
                .with_number(AVERAGE_OPERATING_MARGIN, 0.05)
                .with_number("Net Income", 1000.0)],
        );
        let interest_rate = EventTables::new(
            vec![EventRow::new("ABC", -0.5).with_close_price(100.0)],
            vec![IncomeRow::new("ABC").with_number(LATEST_EVENT_VALUE, 5.0)],
        );
        DatasetStore::from_tables(inflation, interest_rate)
    }

    #[test]
    fn test_query_end_to_end() {
        let store = test_store();
        let request = QueryRequest::new("ABC", EventType::Inflation, 5.0, CalculationMode::Dynamic);
        let outcome = query(&store, &request, &ProjectionConfig::default()).unwrap();

        assert_eq!(outcome.event_row.symbol, "ABC");
        assert_eq!(outcome.income_row.stock_name, "ABC");
        assert_eq!(outcome.projection.table.get(PROJECTED_STOCK_PRICE).unwrap().projected_value(), 103.0);
        assert_eq!(
            outcome.judgments,
            vec![
                "1% Increase in Inflation: Stock price increases, benefiting from inflation.",
                "Low Operating Margin: Reflects risk in profitability.",
            ]
        );
    }

    #[test]
    fn test_judgments_split_by_source() {
        let store = test_store();
        let request = QueryRequest::new("ABC", EventType::Inflation, 5.0, CalculationMode::Simple);
        let outcome = query(&store, &request, &ProjectionConfig::default()).unwrap();

        assert_eq!(
            outcome.event_judgments(),
            ["1% Increase in Inflation: Stock price increases, benefiting from inflation."]
        );
        assert_eq!(
            outcome.income_judgments(),
            ["Low Operating Margin: Reflects risk in profitability."]
        );

        // No coefficient judgment and no margin: both halves empty
        let request =
            QueryRequest::new("ABC", EventType::InterestRate, 4.0, CalculationMode::Simple);
        let outcome = query(&store, &request, &ProjectionConfig::default()).unwrap();
        assert!(outcome.event_judgments().is_empty());
        assert!(outcome.income_judgments().is_empty());
    }

    #[test]
    fn test_query_event_type_selects_tables() {
        let store = test_store();
        let request =
            QueryRequest::new("ABC", EventType::InterestRate, 4.0, CalculationMode::Dynamic);
        let outcome = query(&store, &request, &ProjectionConfig::default()).unwrap();

        // 100 + (-0.5) * (4 - 5)
        assert_eq!(outcome.projection.table.stock_price().unwrap().projected_value(), 100.5);
        assert!(outcome.judgments.is_empty());
    }

    #[test]
    fn test_query_not_found() {
        let store = test_store();
        let request = QueryRequest::new("abc", EventType::Inflation, 5.0, CalculationMode::Simple);
        let err = query(&store, &request, &ProjectionConfig::default()).unwrap_err();
        assert!(matches!(err, QueryError::NotFound { ref symbol, .. } if symbol == "abc"));
    }

    #[test]
    fn test_query_rejects_non_finite_rate() {
        let store = test_store();
        let request =
            QueryRequest::new("ABC", EventType::Inflation, f64::NAN, CalculationMode::Simple);
        let err = query(&store, &request, &ProjectionConfig::default()).unwrap_err();
        assert!(matches!(err, QueryError::InvalidRate(_)));
    }

    #[test]
    fn test_runner_rates() {
        let runner = QueryRunner::new(test_store());
        let projections = runner
            .run_rates("ABC", EventType::Inflation, CalculationMode::Dynamic, &[3.0, 4.0, 5.0])
            .unwrap();

        assert_eq!(projections.len(), 3);

        // Higher target rate moves a positive-coefficient stock higher
        let prices: Vec<f64> = projections
            .iter()
            .map(|p| p.table.stock_price().unwrap().projected_value())
            .collect();
        assert_eq!(prices, vec![100.0, 101.5, 103.0]);
    }

    #[test]
    fn test_runner_from_sample_dir() {
        let runner = QueryRunner::from_dir("data").expect("Failed to load sample data");
        let request = QueryRequest::new(
            "GLOBEX",
            EventType::Inflation,
            DEFAULT_EXPECTED_RATE,
            CalculationMode::Dynamic,
        );
        let outcome = runner.run(&request).unwrap();

        assert!(outcome.projection.table.stock_price().is_some());
        assert!(outcome.judgments[0].contains("decreases significantly"));
    }
}
