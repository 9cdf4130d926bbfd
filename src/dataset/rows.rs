//! Row structures matching the event-sensitivity and income-statement exports

use crate::error::ProjectionWarning;
use serde::{Deserialize, Serialize};

/// Identity column of the event-sensitivity tables
pub const SYMBOL: &str = "Symbol";
/// Identity column of the income-statement tables
pub const STOCK_NAME: &str = "Stock Name";
pub const EVENT_COEFFICIENT: &str = "Event Coefficient";
pub const LATEST_CLOSE_PRICE: &str = "Latest Close Price";
pub const LATEST_EVENT_VALUE: &str = "Latest Event Value";
pub const AVERAGE_OPERATING_MARGIN: &str = "Average Operating Margin";

/// A single cell as read from the spreadsheet export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Coerce raw cell text. Non-finite values (NaN, inf, overflow such as
    /// `1e400`) are kept as text, matching a failed coercion.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number(value),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }
}

/// A named cell, in the column order of the source table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: CellValue,
}

impl Field {
    pub fn new(name: impl Into<String>, value: CellValue) -> Self {
        Self { name: name.into(), value }
    }

    /// Numeric value, or the warning explaining why there is none
    pub fn numeric(&self) -> Result<f64, ProjectionWarning> {
        match &self.value {
            CellValue::Number(value) => Ok(*value),
            CellValue::Text(text) => Err(ProjectionWarning::NotNumeric {
                field: self.name.clone(),
                value: text.clone(),
            }),
            CellValue::Empty => Err(ProjectionWarning::FieldUnavailable {
                field: self.name.clone(),
            }),
        }
    }
}

fn lookup<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields.iter().find(|f| f.name == name)
}

fn numeric_field(fields: &[Field], name: &str) -> Result<f64, ProjectionWarning> {
    match lookup(fields, name) {
        Some(field) => field.numeric(),
        None => Err(ProjectionWarning::FieldUnavailable {
            field: name.to_string(),
        }),
    }
}

/// One stock's sensitivity record for a single event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    /// Ticker symbol (identity key)
    pub symbol: String,

    /// Price units per one-unit change in the event metric
    pub event_coefficient: f64,

    /// Every non-identity column in file order, including the coefficient,
    /// the close price and any per-line-item correlation factors
    pub fields: Vec<Field>,
}

impl EventRow {
    /// Build a row whose fields hold only the coefficient
    pub fn new(symbol: impl Into<String>, event_coefficient: f64) -> Self {
        Self {
            symbol: symbol.into(),
            event_coefficient,
            fields: vec![Field::new(EVENT_COEFFICIENT, CellValue::Number(event_coefficient))],
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: CellValue) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    pub fn with_close_price(self, price: f64) -> Self {
        self.with_field(LATEST_CLOSE_PRICE, CellValue::Number(price))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        lookup(&self.fields, name)
    }

    pub fn latest_close_price(&self) -> Result<f64, ProjectionWarning> {
        numeric_field(&self.fields, LATEST_CLOSE_PRICE)
    }

    /// Correlation factor stored under an income line-item name.
    ///
    /// `None` when the column is absent or not numeric; callers treat that as
    /// uncorrelated.
    pub fn correlation_factor(&self, line_item: &str) -> Option<f64> {
        self.field(line_item).and_then(|f| f.value.as_f64())
    }
}

/// One stock's income-statement record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRow {
    /// Joins to [`EventRow::symbol`]
    pub stock_name: String,

    /// Every non-identity column in file order. `Latest Event Value` and
    /// `Average Operating Margin` stay in here as regular line items.
    pub fields: Vec<Field>,
}

impl IncomeRow {
    pub fn new(stock_name: impl Into<String>) -> Self {
        Self {
            stock_name: stock_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: CellValue) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with_field(name, CellValue::Number(value))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        lookup(&self.fields, name)
    }

    /// Level of the macro metric at the last observation
    pub fn latest_event_value(&self) -> Result<f64, ProjectionWarning> {
        numeric_field(&self.fields, LATEST_EVENT_VALUE)
    }

    pub fn average_operating_margin(&self) -> Option<f64> {
        self.field(AVERAGE_OPERATING_MARGIN).and_then(|f| f.value.as_f64())
    }
}
