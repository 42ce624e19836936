//! `maxhour analyze` — run the compliance pipeline over two report files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use maxhour_engine::csv::load_csv_table;
use maxhour_engine::report::display_columns;
use maxhour_engine::{
    run, AnalysisError, AnalysisInput, AnalysisResult, AnalyzerConfig, DatasetKind, Table,
};
use maxhour_io::xlsx::{export_report, import_table, ImportOptions};

use crate::CliError;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Monthly flight-hour report (.xlsx, .xls, .ods or .csv)
    pub monthly: PathBuf,

    /// Consecutive-year (trailing 12 months) report
    pub consecutive: PathBuf,

    /// Export the full analysis as a five-sheet workbook
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Output JSON to stdout instead of human summary
    #[arg(long)]
    pub json: bool,

    /// TOML config overriding thresholds and crew population
    #[arg(long, env = "MAXHOUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sheet holding the monthly data (spreadsheet inputs only)
    #[arg(long, default_value = "Standardized_Company")]
    pub monthly_sheet: String,

    /// 1-based row carrying the consecutive report's headers
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub consecutive_header_row: u32,

    /// Maximum over-limit rows to display (export is never truncated)
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    /// Suppress informational output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn cmd_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let monthly = load_table(
        &args.monthly,
        &ImportOptions {
            sheet: Some(args.monthly_sheet.clone()),
            header_row: 0,
        },
    )?;
    let consecutive = load_table(
        &args.consecutive,
        &ImportOptions {
            sheet: None,
            header_row: args.consecutive_header_row as usize - 1,
        },
    )?;

    let result = run(
        AnalysisInput {
            monthly,
            consecutive,
        },
        &config,
    )
    .map_err(analysis_err)?;

    for warning in &result.warnings {
        eprintln!("warning: {}", warning);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::export(format!("cannot serialize result: {e}")))?;
        println!("{json}");
    } else {
        print_human_summary(&result, args.limit);
    }

    if let Some(output) = &args.output {
        let stats = export_report(&result, output).map_err(CliError::export)?;
        if !args.quiet {
            eprintln!(
                "wrote {} ({} sheets, {} rows)",
                output.display(),
                stats.sheets_exported,
                stats.rows_exported
            );
        }
    }

    Ok(())
}

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    let parsed = load_config(Some(&config))?;
    println!("OK: {}", config.display());
    println!(
        "  monthly threshold:     {} h",
        parsed.thresholds.monthly_hours
    );
    println!(
        "  consecutive threshold: {} h",
        parsed.thresholds.consecutive_hours
    );
    println!("  ready status:          {}", parsed.population.ready_status);
    println!(
        "  cockpit ranks:         {}",
        parsed.population.cockpit_ranks.join(", ")
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, CliError> {
    match path {
        None => Ok(AnalyzerConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| CliError::config(format!("cannot read {}: {}", path.display(), e)))?;
            AnalyzerConfig::from_toml(&text)
                .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
        }
    }
}

/// Dispatch on extension: `.csv` goes through the CSV reader, everything
/// else through the spreadsheet importer.
fn load_table(path: &Path, options: &ImportOptions) -> Result<Table, CliError> {
    if !path.exists() {
        return Err(CliError::input(format!(
            "input file not found: {}",
            path.display()
        )));
    }

    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::input(format!("cannot read {}: {}", path.display(), e)))?;
        load_csv_table(&text).map_err(|e| CliError::schema(format!("{}: {}", path.display(), e)))
    } else {
        let (table, stats) = import_table(path, options).map_err(CliError::schema)?;
        for warning in &stats.warnings {
            eprintln!("warning: {}", warning);
        }
        Ok(table)
    }
}

fn analysis_err(err: AnalysisError) -> CliError {
    match &err {
        AnalysisError::MissingFlightHours { .. } => CliError::schema(err.to_string())
            .with_hint("accepted headers: 'Flight Hours', 'FLIGHT HOURS', 'flight hours'"),
        AnalysisError::ConfigParse(_) | AnalysisError::ConfigValidation(_) => {
            CliError::config(err.to_string())
        }
        AnalysisError::Csv(_) => CliError::schema(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Human output
// ---------------------------------------------------------------------------

fn print_human_summary(result: &AnalysisResult, limit: usize) {
    println!("Summary Report");
    print_rows(
        &["Company", "Period", "Percentage"],
        result
            .report
            .iter()
            .map(|r| vec![r.company.clone(), r.period.clone(), r.percentage.clone()])
            .collect(),
    );

    for (title, table, kind) in [
        ("Monthly over limit", &result.monthly_over, DatasetKind::Monthly),
        (
            "Consecutive over limit",
            &result.consecutive_over,
            DatasetKind::Consecutive,
        ),
    ] {
        println!();
        println!("{} ({} rows)", title, table.row_count());
        if table.row_count() == 0 {
            continue;
        }

        let display = display_columns(table, kind);
        let headers: Vec<&str> = display.columns.iter().map(String::as_str).collect();
        let rows: Vec<Vec<String>> = display
            .rows
            .iter()
            .take(limit)
            .map(|row| row.iter().map(|c| c.canonical()).collect())
            .collect();
        print_rows(&headers, rows);

        if display.rows.len() > limit {
            println!("  ... {} more rows (see exported workbook)", display.rows.len() - limit);
        }
    }
}

/// Fixed-width text table: header, dashed rule, rows.
fn print_rows(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter().copied())
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    println!("  {}", header_line.join("  "));

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    println!("  {}", rule.join("  "));

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        println!("  {}", line.join("  "));
    }
}
