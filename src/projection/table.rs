//! Projection output structures

use crate::error::ProjectionWarning;
use crate::event::{CalculationMode, EventType};
use serde::Serialize;

/// Parameter label of the stock-price row
pub const PROJECTED_STOCK_PRICE: &str = "Projected Stock Price";

/// One projected parameter. `change` is always `projected_value - current_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    #[serde(rename = "Parameter")]
    parameter: String,
    #[serde(rename = "Current Value")]
    current_value: f64,
    #[serde(rename = "Projected Value")]
    projected_value: f64,
    #[serde(rename = "Change")]
    change: f64,
}

impl ProjectionRow {
    pub fn new(parameter: impl Into<String>, current_value: f64, projected_value: f64) -> Self {
        Self {
            parameter: parameter.into(),
            current_value,
            projected_value,
            change: projected_value - current_value,
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn projected_value(&self) -> f64 {
        self.projected_value
    }

    pub fn change(&self) -> f64 {
        self.change
    }
}

/// Ordered projection rows: stock price first, then income fields in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectionTable {
    rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ProjectionRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a row with this parameter name is already present
    pub fn contains(&self, parameter: &str) -> bool {
        self.rows.iter().any(|r| r.parameter == parameter)
    }

    /// First row with this parameter name
    pub fn get(&self, parameter: &str) -> Option<&ProjectionRow> {
        self.rows.iter().find(|r| r.parameter == parameter)
    }

    pub fn stock_price(&self) -> Option<&ProjectionRow> {
        self.get(PROJECTED_STOCK_PRICE)
    }
}

impl<'a> IntoIterator for &'a ProjectionTable {
    type Item = &'a ProjectionRow;
    type IntoIter = std::slice::Iter<'a, ProjectionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Result of projecting one stock
#[derive(Debug, Clone)]
pub struct Projection {
    pub symbol: String,
    pub event_type: EventType,
    pub method: CalculationMode,

    /// Target rate in percent
    pub expected_rate: f64,

    /// `expected_rate - latest_event_value`, Dynamic mode only
    pub rate_change: Option<f64>,

    pub table: ProjectionTable,

    /// Fields left out of the table and why
    pub warnings: Vec<ProjectionWarning>,
}

impl Projection {
    pub fn new(
        symbol: impl Into<String>,
        event_type: EventType,
        method: CalculationMode,
        expected_rate: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            event_type,
            method,
            expected_rate,
            rate_change: None,
            table: ProjectionTable::new(),
            warnings: Vec::new(),
        }
    }

    /// Record a per-field warning. A field is reported once, even when both
    /// the price step and the field loop trip over it.
    pub(crate) fn warn(&mut self, warning: ProjectionWarning) {
        if self.warnings.contains(&warning) {
            return;
        }
        log::warn!("{} ({} projection): {}", self.symbol, self.event_type, warning);
        self.warnings.push(warning);
    }
}
