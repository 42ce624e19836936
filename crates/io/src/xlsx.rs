// Excel report import (xlsx, xls, xlsb, ods) and workbook export (xlsx only)
//
// Import: one-way conversion into the engine's table model. Formulas are
// read through their cached values; formatting is discarded.
// Export: flat data snapshot of one analysis run, one sheet per output
// table. Not a round-trip format beyond cell values.

use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet, XlsxError};

use maxhour_engine::model::{AnalysisResult, CompanySummary};
use maxhour_engine::{Cell, Table};

/// Maximum number of cells to import (prevents runaway memory on huge files)
const MAX_CELLS: usize = 5_000_000;

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// How to locate the data inside a workbook.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Sheet to read. `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Zero-based index of the header row within the used range. Rows above
    /// it are ignored; rows below are data.
    pub header_row: usize,
}

/// Per-file import statistics.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub sheet: String,
    pub rows_imported: usize,
    pub cells_imported: usize,
    pub warnings: Vec<String>,
}

/// Read one sheet of a spreadsheet file into a `Table`. The header row
/// supplies the column names; everything below it becomes data rows.
pub fn import_table(path: &Path, options: &ImportOptions) -> Result<(Table, ImportStats), String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open spreadsheet '{}': {}", path.display(), e))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(format!("'{}' contains no sheets", path.display()));
    }

    let sheet_name = match &options.sheet {
        Some(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(format!(
                    "sheet '{}' not found in '{}' (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                ));
            }
            name.clone()
        }
        None => sheet_names[0].clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| format!("Failed to read sheet '{}': {}", sheet_name, e))?;

    let mut stats = ImportStats {
        sheet: sheet_name.clone(),
        ..Default::default()
    };

    let mut rows = range.rows().skip(options.header_row);
    let header = rows.next().ok_or_else(|| {
        format!(
            "sheet '{}' has no header row at index {}",
            sheet_name, options.header_row
        )
    })?;

    // Blank header cells still need a name for positional access.
    let columns: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let name = convert_cell(c).canonical();
            if name.is_empty() {
                format!("Column {}", idx + 1)
            } else {
                name
            }
        })
        .collect();
    let mut table = Table::new(columns);

    let mut total_cells = 0;
    for row in rows {
        if total_cells >= MAX_CELLS {
            stats.warnings.push(format!(
                "Import stopped at {} cells (limit reached)",
                MAX_CELLS
            ));
            break;
        }

        // Fully blank rows are trailing padding, not data.
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }

        let cells: Vec<Cell> = row.iter().map(convert_cell).collect();
        total_cells += cells.len();
        stats.cells_imported += cells.iter().filter(|c| !matches!(c, Cell::Empty)).count();
        table.push_row(cells);
    }

    stats.rows_imported = table.row_count();
    Ok((table, stats))
}

/// Map one calamine cell onto the engine's cell model. Numbers stay
/// numeric; booleans and errors degrade to text.
fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Cell::Text(s.clone()),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Per-file export statistics.
#[derive(Debug, Default, Clone)]
pub struct ExportStats {
    pub sheets_exported: usize,
    pub rows_exported: usize,
    pub cells_exported: usize,
    pub export_duration_ms: u128,
}

const SUMMARY_HEADERS: [&str; 4] = ["Company", "Total", "Over", "Percentage"];

/// Write the full analysis output as a five-sheet workbook: the final
/// report, both company summaries, and both over-limit listings. Over-limit
/// sheets keep their full column set; display truncation never applies to
/// the export.
pub fn export_report(result: &AnalysisResult, path: &Path) -> Result<ExportStats, String> {
    let start_time = Instant::now();
    let mut workbook = XlsxWorkbook::new();
    let mut stats = ExportStats::default();

    {
        let worksheet = add_sheet(&mut workbook, "Summary Report")?;
        write_headers(worksheet, &["Company", "Period", "Percentage"])?;
        for (idx, row) in result.report.iter().enumerate() {
            let r = idx as u32 + 1;
            write_text(worksheet, r, 0, &row.company)?;
            write_text(worksheet, r, 1, &row.period)?;
            write_text(worksheet, r, 2, &row.percentage)?;
            stats.rows_exported += 1;
            stats.cells_exported += 3;
        }
        stats.sheets_exported += 1;
    }

    for (name, summary) in [
        ("Monthly Summary", &result.monthly_summary),
        ("Consecutive Summary", &result.consecutive_summary),
    ] {
        let worksheet = add_sheet(&mut workbook, name)?;
        write_summary_sheet(worksheet, summary, &mut stats)?;
        stats.sheets_exported += 1;
    }

    for (name, table) in [
        ("Monthly Over", &result.monthly_over),
        ("Consecutive Over", &result.consecutive_over),
    ] {
        let worksheet = add_sheet(&mut workbook, name)?;
        write_table_sheet(worksheet, table, &mut stats)?;
        stats.sheets_exported += 1;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save workbook '{}': {}", path.display(), e))?;

    stats.export_duration_ms = start_time.elapsed().as_millis();
    Ok(stats)
}

fn add_sheet<'a>(workbook: &'a mut XlsxWorkbook, name: &str) -> Result<&'a mut Worksheet, String> {
    workbook
        .add_worksheet()
        .set_name(name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", name, e))
}

fn write_summary_sheet(
    worksheet: &mut Worksheet,
    summaries: &[CompanySummary],
    stats: &mut ExportStats,
) -> Result<(), String> {
    write_headers(worksheet, &SUMMARY_HEADERS)?;
    for (idx, summary) in summaries.iter().enumerate() {
        let r = idx as u32 + 1;
        write_text(worksheet, r, 0, &summary.company)?;
        write_number(worksheet, r, 1, summary.total_ready_cockpit as f64)?;
        write_number(worksheet, r, 2, summary.over_limit as f64)?;
        write_number(worksheet, r, 3, summary.percentage)?;
        stats.rows_exported += 1;
        stats.cells_exported += 4;
    }
    Ok(())
}

fn write_table_sheet(
    worksheet: &mut Worksheet,
    table: &Table,
    stats: &mut ExportStats,
) -> Result<(), String> {
    let headers: Vec<&str> = table.columns.iter().map(String::as_str).collect();
    write_headers(worksheet, &headers)?;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => write_text(worksheet, r, c, s)?,
                Cell::Number(n) => write_number(worksheet, r, c, *n)?,
            }
            stats.cells_exported += 1;
        }
        stats.rows_exported += 1;
    }
    Ok(())
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), String> {
    for (idx, header) in headers.iter().enumerate() {
        write_text(worksheet, 0, idx as u16, header)?;
    }
    Ok(())
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> Result<(), String> {
    worksheet
        .write_string(row, col, value)
        .map(|_| ())
        .map_err(write_err)
}

fn write_number(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<(), String> {
    worksheet
        .write_number(row, col, value)
        .map(|_| ())
        .map_err(write_err)
}

fn write_err(e: XlsxError) -> String {
    format!("Failed to write cell: {}", e)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use maxhour_engine::csv::load_csv_table;
    use maxhour_engine::{run, AnalysisInput, AnalyzerConfig};
    use tempfile::TempDir;

    fn sample_result() -> AnalysisResult {
        let monthly = load_csv_table(
            "Crew ID,Flight Hours,Rank,Company,Crew Category,Crew Status\n\
             C001,115:00,CPT,AIR-X,Senior,Ready Crew\n\
             C002,90:00,CPT,AIR-X,Senior,Ready Crew\n",
        )
        .unwrap();
        let consecutive = load_csv_table(
            "ID,FLIGHT HOURS,RANK,COMPANY\n\
             C001,1100:00,CPT,AIR-X\n\
             C002,900:00,CPT,AIR-X\n",
        )
        .unwrap();
        run(
            AnalysisInput {
                monthly,
                consecutive,
            },
            &AnalyzerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn export_writes_five_sheets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xlsx");

        let stats = export_report(&sample_result(), &path).unwrap();
        assert_eq!(stats.sheets_exported, 5);

        let mut workbook = open_workbook_auto(&path).unwrap();
        assert_eq!(
            workbook.sheet_names().to_vec(),
            vec![
                "Summary Report",
                "Monthly Summary",
                "Consecutive Summary",
                "Monthly Over",
                "Consecutive Over",
            ]
        );
        let range = workbook.worksheet_range("Monthly Over").unwrap();
        // Header plus the single over-limit crew member.
        assert_eq!(range.height(), 2);
    }

    #[test]
    fn summary_report_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xlsx");

        let result = sample_result();
        export_report(&result, &path).unwrap();

        let (table, stats) = import_table(
            &path,
            &ImportOptions {
                sheet: Some("Summary Report".to_string()),
                header_row: 0,
            },
        )
        .unwrap();

        assert_eq!(stats.sheet, "Summary Report");
        assert_eq!(table.columns, vec!["Company", "Period", "Percentage"]);
        assert_eq!(table.row_count(), result.report.len());
        for (row_idx, expected) in result.report.iter().enumerate() {
            assert_eq!(table.cell(row_idx, 0).canonical(), expected.company);
            assert_eq!(table.cell(row_idx, 1).canonical(), expected.period);
            assert_eq!(table.cell(row_idx, 2).canonical(), expected.percentage);
        }
    }

    #[test]
    fn header_row_offset_skips_leading_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = XlsxWorkbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Report generated 2024-01-01").unwrap();
        worksheet.write_string(1, 0, "ID").unwrap();
        worksheet.write_string(1, 1, "FLIGHT HOURS").unwrap();
        worksheet.write_string(2, 0, "C001").unwrap();
        worksheet.write_string(2, 1, "1100:00").unwrap();
        workbook.save(&path).unwrap();

        let (table, _) = import_table(
            &path,
            &ImportOptions {
                sheet: None,
                header_row: 1,
            },
        )
        .unwrap();

        assert_eq!(table.columns[0], "ID");
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.cell(0, 1).canonical(), "1100:00");
    }

    #[test]
    fn numbers_survive_import_as_numbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("numbers.xlsx");

        let mut workbook = XlsxWorkbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Crew ID").unwrap();
        worksheet.write_string(0, 1, "Flight Hours").unwrap();
        worksheet.write_number(1, 0, 1234.0).unwrap();
        worksheet.write_number(1, 1, 95.5).unwrap();
        workbook.save(&path).unwrap();

        let (table, _) = import_table(&path, &ImportOptions::default()).unwrap();
        assert_eq!(table.cell(0, 0), &Cell::Number(1234.0));
        assert_eq!(table.cell(0, 0).canonical(), "1234");
        assert_eq!(table.cell(0, 1), &Cell::Number(95.5));
    }

    #[test]
    fn missing_sheet_lists_available_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("one_sheet.xlsx");

        let mut workbook = XlsxWorkbook::new();
        workbook.add_worksheet().set_name("Data").unwrap();
        workbook.save(&path).unwrap();

        let err = import_table(
            &path,
            &ImportOptions {
                sheet: Some("Standardized_Company".to_string()),
                header_row: 0,
            },
        )
        .unwrap_err();
        assert!(err.contains("Standardized_Company"));
        assert!(err.contains("Data"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = import_table(Path::new("/nonexistent/report.xlsx"), &ImportOptions::default())
            .unwrap_err();
        assert!(err.contains("Failed to open"));
    }

    #[test]
    fn convert_cell_maps_calamine_types() {
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
        assert_eq!(convert_cell(&Data::String("".into())), Cell::Empty);
        assert_eq!(
            convert_cell(&Data::String("115:00".into())),
            Cell::Text("115:00".into())
        );
        assert_eq!(convert_cell(&Data::Float(8.5)), Cell::Number(8.5));
        assert_eq!(convert_cell(&Data::Int(8)), Cell::Number(8.0));
        assert_eq!(convert_cell(&Data::Bool(true)), Cell::Text("TRUE".into()));
    }
}
