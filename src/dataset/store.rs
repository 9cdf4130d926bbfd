//! In-memory store of the four pre-computed tables

use super::loader::{load_event_rows, load_income_rows};
use super::rows::{EventRow, IncomeRow};
use crate::error::DatasetError;
use crate::event::EventType;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default directory holding the CSV exports
pub const DEFAULT_DATA_DIR: &str = "data";

pub const INFLATION_EVENTS_FILE: &str = "Inflation_event_stock_analysis_resultsOct.csv";
pub const INFLATION_INCOME_FILE: &str = "Inflation_IncomeStatement_correlation_results.csv";
pub const INTEREST_RATE_EVENTS_FILE: &str = "interestrate_event_stock_analysis_resultsOct.csv";
pub const INTEREST_RATE_INCOME_FILE: &str = "interestrate_IncomeStatement_correlation_results.csv";

/// Locations of the four tables
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub inflation_events: PathBuf,
    pub inflation_income: PathBuf,
    pub interest_rate_events: PathBuf,
    pub interest_rate_income: PathBuf,
}

impl DatasetPaths {
    /// Default file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            inflation_events: dir.join(INFLATION_EVENTS_FILE),
            inflation_income: dir.join(INFLATION_INCOME_FILE),
            interest_rate_events: dir.join(INTEREST_RATE_EVENTS_FILE),
            interest_rate_income: dir.join(INTEREST_RATE_INCOME_FILE),
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

/// Event table and income table for one event type
#[derive(Debug, Clone, Default)]
pub struct EventTables {
    pub events: Vec<EventRow>,
    pub income: Vec<IncomeRow>,
}

impl EventTables {
    pub fn new(events: Vec<EventRow>, income: Vec<IncomeRow>) -> Self {
        Self { events, income }
    }

    fn event_row(&self, symbol: &str) -> Option<&EventRow> {
        self.events.iter().find(|row| row.symbol == symbol)
    }

    fn income_row(&self, symbol: &str) -> Option<&IncomeRow> {
        self.income.iter().find(|row| row.stock_name == symbol)
    }
}

/// Read-only tables, loaded once and shared by reference
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    inflation: EventTables,
    interest_rate: EventTables,
}

impl DatasetStore {
    /// Build a store from already-loaded tables
    pub fn from_tables(inflation: EventTables, interest_rate: EventTables) -> Self {
        Self { inflation, interest_rate }
    }

    /// Load all four tables
    pub fn load(paths: &DatasetPaths) -> Result<Self, DatasetError> {
        let inflation = EventTables::new(
            load_event_rows(&paths.inflation_events)?,
            load_income_rows(&paths.inflation_income)?,
        );
        let interest_rate = EventTables::new(
            load_event_rows(&paths.interest_rate_events)?,
            load_income_rows(&paths.interest_rate_income)?,
        );

        Ok(Self::from_tables(inflation, interest_rate))
    }

    /// Load the default file names from a directory
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DatasetError> {
        Self::load(&DatasetPaths::in_dir(dir))
    }

    pub fn tables(&self, event_type: EventType) -> &EventTables {
        match event_type {
            EventType::Inflation => &self.inflation,
            EventType::InterestRate => &self.interest_rate,
        }
    }

    /// Exact, case-sensitive lookup. First match wins in each table and both
    /// rows must exist.
    pub fn find(&self, symbol: &str, event_type: EventType) -> Option<(&EventRow, &IncomeRow)> {
        let tables = self.tables(event_type);
        let event = tables.event_row(symbol)?;
        let income = tables.income_row(symbol)?;
        Some((event, income))
    }

    /// Symbols that resolve in both tables, in event-table order
    pub fn symbols(&self, event_type: EventType) -> Vec<&str> {
        let tables = self.tables(event_type);
        let income: HashSet<&str> = tables.income.iter().map(|r| r.stock_name.as_str()).collect();
        let mut seen = HashSet::new();

        tables
            .events
            .iter()
            .map(|r| r.symbol.as_str())
            .filter(|s| income.contains(s) && seen.insert(*s))
            .collect()
    }
}
