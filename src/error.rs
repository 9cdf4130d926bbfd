//! Error and warning types
//!
//! Loading problems and unresolved queries are returned as `Err`. Per-field
//! problems during a projection are not errors: they are collected as
//! [`ProjectionWarning`] values next to the rows that could be computed.

use crate::event::EventType;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the store keys on is not in the header
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: String, column: String },
}

/// Errors raised by a query
#[derive(Debug, Error)]
pub enum QueryError {
    /// Symbol absent from the event table, the income table, or both
    #[error("Stock symbol '{symbol}' not found in the {event_type} data")]
    NotFound { symbol: String, event_type: EventType },

    #[error("Expected rate must be a finite number, got {0}")]
    InvalidRate(f64),
}

/// A field that could not take part in a projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionWarning {
    /// The field is missing from the row, or its cell is empty
    #[error("{field} data not available")]
    FieldUnavailable { field: String },

    /// The field holds text that does not parse as a number
    #[error("Could not convert current value for {field} to numeric (found '{value}')")]
    NotNumeric { field: String, value: String },
}

impl ProjectionWarning {
    /// Name of the field the warning refers to
    pub fn field(&self) -> &str {
        match self {
            ProjectionWarning::FieldUnavailable { field } => field,
            ProjectionWarning::NotNumeric { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        let missing = ProjectionWarning::FieldUnavailable {
            field: "Latest Close Price".to_string(),
        };
        assert_eq!(missing.to_string(), "Latest Close Price data not available");
        assert_eq!(missing.field(), "Latest Close Price");

        let text = ProjectionWarning::NotNumeric {
            field: "June 2024 EBIT".to_string(),
            value: "n/a".to_string(),
        };
        assert!(text.to_string().contains("June 2024 EBIT"));
        assert!(text.to_string().contains("n/a"));
    }

    #[test]
    fn test_not_found_message() {
        let err = QueryError::NotFound {
            symbol: "ABC".to_string(),
            event_type: EventType::InterestRate,
        };
        assert_eq!(err.to_string(), "Stock symbol 'ABC' not found in the Interest Rate data");
    }
}
