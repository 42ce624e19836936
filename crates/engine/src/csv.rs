//! CSV ingestion: parse delimited text (first row = headers) into the
//! engine's table model. Used by the CLI for `.csv` inputs and by tests for
//! fixtures.

use crate::error::AnalysisError;
use crate::model::{Cell, Table};

/// Parse CSV text into a `Table`. Numeric-looking cells become numbers
/// (mirroring spreadsheet type inference); blank cells stay empty.
///
/// With a flexible reader over guaranteed-UTF-8 input the csv crate has no
/// reachable parse failures (an unterminated quote is closed at EOF), so
/// this is total over `&str`; the `Result` covers the reader API surface.
pub fn load_csv_table(data: &str) -> Result<Table, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(headers);

    for record in reader.records() {
        let record = record.map_err(|e| AnalysisError::Csv(e.to_string()))?;
        let row: Vec<Cell> = record.iter().map(cell_from_str).collect();
        table.push_row(row);
    }

    Ok(table)
}

fn cell_from_str(raw: &str) -> Cell {
    if raw.is_empty() {
        return Cell::Empty;
    }
    match raw.parse::<f64>() {
        Ok(n) => Cell::Number(n),
        Err(_) => Cell::Text(raw.to_string()),
    }
}
