//! Event Sensitivity - projects how an expected inflation or interest rate moves a stock
//!
//! This library provides:
//! - Loading of pre-computed event-sensitivity and income-statement tables
//! - Symbol lookup per event type (inflation, interest rate)
//! - Simple and Dynamic projections of stock price and income line items
//! - Threshold-based interpretation of event coefficients and operating margins
//! - CSV and JSON export of projection results

pub mod dataset;
pub mod error;
pub mod event;
pub mod interpret;
pub mod projection;
pub mod query;
pub mod report;

// Re-export commonly used types
pub use dataset::{DatasetPaths, DatasetStore, EventRow, IncomeRow};
pub use error::{DatasetError, ProjectionWarning, QueryError};
pub use event::{CalculationMode, EventType};
pub use projection::{DuplicatePolicy, Projection, ProjectionConfig, ProjectionEngine, ProjectionRow, ProjectionTable};
pub use query::{query, QueryOutcome, QueryRequest, QueryRunner};
