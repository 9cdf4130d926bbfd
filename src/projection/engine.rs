//! Core projection engine: applies a target rate to one stock's rows

use super::table::{Projection, ProjectionRow, PROJECTED_STOCK_PRICE};
use crate::dataset::{EventRow, IncomeRow, STOCK_NAME};
use crate::error::ProjectionWarning;
use crate::event::{CalculationMode, EventType};
use serde::{Deserialize, Serialize};

/// Whether the field loop may emit a parameter that is already in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// First row under a parameter name wins; later columns with that name are skipped
    #[default]
    SkipExisting,
    /// Every column yields a row, even if the name repeats
    Allow,
}

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    pub duplicate_policy: DuplicatePolicy,
}

/// `1 + rate / 100`, the uniform growth factor of Simple mode
fn simple_factor(expected_rate: f64) -> f64 {
    1.0 + expected_rate / 100.0
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project the stock price and every income-statement field.
    ///
    /// `expected_rate` is in percent (3.65 means 3.65%). Fields that cannot be
    /// projected are reported in [`Projection::warnings`] and left out of the
    /// table.
    pub fn project(
        &self,
        event: &EventRow,
        income: &IncomeRow,
        expected_rate: f64,
        event_type: EventType,
        method: CalculationMode,
    ) -> Projection {
        let mut projection = Projection::new(&event.symbol, event_type, method, expected_rate);

        // Dynamic mode measures the move from the last observed level
        let rate_change = match method {
            CalculationMode::Simple => None,
            CalculationMode::Dynamic => Some(
                income
                    .latest_event_value()
                    .map(|latest| expected_rate - latest),
            ),
        };
        projection.rate_change = rate_change.as_ref().and_then(|r| r.as_ref().ok().copied());

        self.project_price(event, rate_change, &mut projection);
        self.project_fields(event, income, &mut projection);

        log::debug!(
            "{}: {} rows, {} warnings ({} {} at {}%)",
            projection.symbol,
            projection.table.len(),
            projection.warnings.len(),
            method,
            event_type,
            expected_rate
        );

        projection
    }

    fn project_price(
        &self,
        event: &EventRow,
        rate_change: Option<Result<f64, ProjectionWarning>>,
        projection: &mut Projection,
    ) {
        let close = match event.latest_close_price() {
            Ok(price) => price,
            Err(warning) => {
                projection.warn(warning);
                return;
            }
        };

        let projected = match rate_change {
            None => close * simple_factor(projection.expected_rate),
            Some(Ok(rate_change)) => close + event.event_coefficient * rate_change,
            Some(Err(warning)) => {
                projection.warn(warning);
                return;
            }
        };

        projection
            .table
            .push(ProjectionRow::new(PROJECTED_STOCK_PRICE, close, projected));
    }

    fn project_fields(&self, event: &EventRow, income: &IncomeRow, projection: &mut Projection) {
        let expected_rate = projection.expected_rate;

        for field in &income.fields {
            if field.name == STOCK_NAME {
                continue;
            }

            if self.config.duplicate_policy == DuplicatePolicy::SkipExisting
                && projection.table.contains(&field.name)
            {
                log::debug!("{}: '{}' already projected, skipping", projection.symbol, field.name);
                continue;
            }

            let current = match field.numeric() {
                Ok(value) => value,
                Err(warning) => {
                    projection.warn(warning);
                    continue;
                }
            };

            let projected = match projection.method {
                CalculationMode::Simple => current * simple_factor(expected_rate),
                CalculationMode::Dynamic => {
                    // Absent correlation means uncorrelated.
                    // Scaled by the target rate itself, not by rate_change.
                    let correlation = event.correlation_factor(&field.name).unwrap_or(0.0);
                    current + current * correlation * (expected_rate / 100.0)
                }
            };

            projection
                .table
                .push(ProjectionRow::new(field.name.clone(), current, projected));
        }
    }
}
