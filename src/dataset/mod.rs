//! Dataset rows, CSV loading and the symbol lookup store

mod rows;
mod store;
pub mod loader;

pub use rows::{
    CellValue, EventRow, Field, IncomeRow, AVERAGE_OPERATING_MARGIN, EVENT_COEFFICIENT,
    LATEST_CLOSE_PRICE, LATEST_EVENT_VALUE, STOCK_NAME, SYMBOL,
};
pub use store::{
    DatasetPaths, DatasetStore, EventTables, DEFAULT_DATA_DIR, INFLATION_EVENTS_FILE,
    INFLATION_INCOME_FILE, INTEREST_RATE_EVENTS_FILE, INTEREST_RATE_INCOME_FILE,
};
pub use loader::{
    load_event_rows, load_event_rows_from_reader, load_income_rows, load_income_rows_from_reader,
};
