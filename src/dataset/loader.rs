//! Load event-sensitivity and income-statement tables from CSV exports

use super::rows::{CellValue, EventRow, Field, IncomeRow, EVENT_COEFFICIENT, STOCK_NAME, SYMBOL};
use crate::error::DatasetError;
use csv::{Reader, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header row plus data records of one table
struct RawTable {
    headers: StringRecord,
    identity: usize,
    records: Vec<StringRecord>,
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn read_table<R: Read>(reader: R, source: &str, identity: &str) -> Result<RawTable, DatasetError> {
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let identity = column_index(&headers, identity).ok_or_else(|| DatasetError::MissingColumn {
        path: source.to_string(),
        column: identity.to_string(),
    })?;

    let records = csv_reader.records().collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable { headers, identity, records })
}

/// All cells except the identity column, in header order
fn fields_of(headers: &StringRecord, record: &StringRecord, identity: usize) -> Vec<Field> {
    headers
        .iter()
        .zip(record.iter())
        .enumerate()
        .filter(|(i, _)| *i != identity)
        .map(|(_, (name, raw))| Field::new(name.trim(), CellValue::parse(raw)))
        .collect()
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load an event-sensitivity table from a CSV file
pub fn load_event_rows<P: AsRef<Path>>(path: P) -> Result<Vec<EventRow>, DatasetError> {
    let path = path.as_ref();
    load_event_rows_from_reader(open(path)?, &path.display().to_string())
}

/// Load an event-sensitivity table from any reader.
///
/// Rows whose `Event Coefficient` is not numeric are skipped with a warning.
pub fn load_event_rows_from_reader<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<EventRow>, DatasetError> {
    let table = read_table(reader, source, SYMBOL)?;
    let coefficient = column_index(&table.headers, EVENT_COEFFICIENT).ok_or_else(|| {
        DatasetError::MissingColumn {
            path: source.to_string(),
            column: EVENT_COEFFICIENT.to_string(),
        }
    })?;

    let mut rows = Vec::with_capacity(table.records.len());

    for record in &table.records {
        let symbol = record.get(table.identity).unwrap_or_default();
        let raw = record.get(coefficient).unwrap_or_default();

        let event_coefficient = match CellValue::parse(raw) {
            CellValue::Number(value) => value,
            _ => {
                log::warn!(
                    "Skipping {} in {}: {} '{}' is not numeric",
                    symbol, source, EVENT_COEFFICIENT, raw
                );
                continue;
            }
        };

        rows.push(EventRow {
            symbol: symbol.to_string(),
            event_coefficient,
            fields: fields_of(&table.headers, record, table.identity),
        });
    }

    log::info!("Loaded {} event rows from {}", rows.len(), source);
    Ok(rows)
}

/// Load an income-statement table from a CSV file
pub fn load_income_rows<P: AsRef<Path>>(path: P) -> Result<Vec<IncomeRow>, DatasetError> {
    let path = path.as_ref();
    load_income_rows_from_reader(open(path)?, &path.display().to_string())
}

/// Load an income-statement table from any reader
pub fn load_income_rows_from_reader<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<IncomeRow>, DatasetError> {
    let table = read_table(reader, source, STOCK_NAME)?;

    let rows: Vec<IncomeRow> = table
        .records
        .iter()
        .map(|record| IncomeRow {
            stock_name: record.get(table.identity).unwrap_or_default().to_string(),
            fields: fields_of(&table.headers, record, table.identity),
        })
        .collect();

    log::info!("Loaded {} income rows from {}", rows.len(), source);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::rows::{LATEST_CLOSE_PRICE, LATEST_EVENT_VALUE};

    const EVENTS: &str = "\
Symbol,Event Coefficient,Latest Close Price,June 2024 Net Income
ABC,1.5,100.0,0.4
BAD,n/a,50.0,
XYZ,-2.25,,0.1
";

    const INCOME: &str = "\
Stock Name,Latest Event Value,June 2024 Net Income,June 2024 EPS (Earning Per Share)
ABC,3.0,1000.0,2.5
XYZ,3.0,-50,not reported
";

    #[test]
    fn test_load_event_rows() {
        let rows = load_event_rows_from_reader(EVENTS.as_bytes(), "events").unwrap();

        // BAD has no numeric coefficient
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "ABC");
        assert_eq!(rows[0].event_coefficient, 1.5);
        assert_eq!(rows[0].latest_close_price(), Ok(100.0));
        assert_eq!(rows[0].correlation_factor("June 2024 Net Income"), Some(0.4));

        assert_eq!(rows[1].symbol, "XYZ");
        assert_eq!(rows[1].field(LATEST_CLOSE_PRICE).unwrap().value, CellValue::Empty);
        assert!(rows[1].field(SYMBOL).is_none());
    }

    #[test]
    fn test_load_income_rows_keeps_column_order() {
        let rows = load_income_rows_from_reader(INCOME.as_bytes(), "income").unwrap();
        assert_eq!(rows.len(), 2);

        let names: Vec<&str> = rows[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![LATEST_EVENT_VALUE, "June 2024 Net Income", "June 2024 EPS (Earning Per Share)"]
        );
        assert_eq!(
            rows[1].field("June 2024 EPS (Earning Per Share)").unwrap().value,
            CellValue::Text("not reported".to_string())
        );
    }

    #[test]
    fn test_missing_identity_column() {
        let err = load_income_rows_from_reader("Name,Revenue\nABC,1\n".as_bytes(), "income")
            .unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => assert_eq!(column, STOCK_NAME),
            other => panic!("unexpected error: {}", other),
        }

        let err = load_event_rows_from_reader("Symbol,Beta\nABC,1\n".as_bytes(), "events")
            .unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column, .. } if column == EVENT_COEFFICIENT));
    }

    #[test]
    fn test_missing_file() {
        let err = load_event_rows("no/such/file.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
