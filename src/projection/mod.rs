//! Projection engine for stock price and income-statement line items

mod engine;
mod table;

pub use engine::{DuplicatePolicy, ProjectionConfig, ProjectionEngine};
pub use table::{Projection, ProjectionRow, ProjectionTable, PROJECTED_STOCK_PRICE};
