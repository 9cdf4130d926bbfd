//! Export of projection results as CSV tables and JSON reports

use crate::event::{CalculationMode, EventType};
use crate::projection::{Projection, ProjectionRow, ProjectionTable};
use crate::query::QueryOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Write a projection table with `Parameter,Current Value,Projected Value,Change` headers
pub fn write_table_csv<W: Write>(table: &ProjectionTable, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in table {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Serializable snapshot of one query
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub generated_at: DateTime<Utc>,
    pub symbol: String,
    pub event_type: EventType,
    pub method: CalculationMode,
    pub expected_rate: f64,
    pub rate_change: Option<f64>,
    pub rows: Vec<ProjectionRow>,
    pub warnings: Vec<String>,
    pub judgments: Vec<String>,
}

impl ProjectionReport {
    pub fn from_projection(projection: &Projection, judgments: &[String]) -> Self {
        Self {
            generated_at: Utc::now(),
            symbol: projection.symbol.clone(),
            event_type: projection.event_type,
            method: projection.method,
            expected_rate: projection.expected_rate,
            rate_change: projection.rate_change,
            rows: projection.table.rows().to_vec(),
            warnings: projection.warnings.iter().map(|w| w.to_string()).collect(),
            judgments: judgments.to_vec(),
        }
    }

    pub fn from_outcome(outcome: &QueryOutcome<'_>) -> Self {
        Self::from_projection(&outcome.projection, &outcome.judgments)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
