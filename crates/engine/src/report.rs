//! Final report assembly and the over-limit row listings.

use std::collections::BTreeSet;

use crate::columns::{resolve_field, Field};
use crate::model::{
    CompanySummary, DatasetKind, HourStatus, ReportRow, Table, COL_CREW_HOUR_STATUS,
    COL_CREW_STATUS, COL_FLIGHT_HOURS_DECIMAL,
};

/// Combine the two company aggregates into the ordered summary report.
///
/// Companies are the sorted union of those appearing in either aggregate.
/// Each company emits a Monthly row followed by a "12 Consecutive Months"
/// row whose company cell is blank, matching the layout of the original
/// printed report. A company absent from one aggregate renders as "0.00%"
/// for that period rather than being omitted.
pub fn assemble_report(
    monthly: &[CompanySummary],
    consecutive: &[CompanySummary],
) -> Vec<ReportRow> {
    let companies: BTreeSet<&str> = monthly
        .iter()
        .chain(consecutive)
        .map(|s| s.company.as_str())
        .collect();

    let mut rows = Vec::with_capacity(companies.len() * 2);
    for company in companies {
        rows.push(ReportRow {
            company: company.to_string(),
            period: DatasetKind::Monthly.period_label().to_string(),
            percentage: format_percentage(percentage_for(monthly, company)),
        });
        rows.push(ReportRow {
            company: String::new(),
            period: DatasetKind::Consecutive.period_label().to_string(),
            percentage: format_percentage(percentage_for(consecutive, company)),
        });
    }
    rows
}

fn percentage_for(summaries: &[CompanySummary], company: &str) -> f64 {
    summaries
        .iter()
        .find(|s| s.company == company)
        .map(|s| s.percentage)
        .unwrap_or(0.0)
}

/// Two decimals with a trailing percent sign, e.g. "50.00%".
pub fn format_percentage(pct: f64) -> String {
    format!("{pct:.2}%")
}

/// Rows of an enriched table flagged OVER. Columns are unchanged.
pub fn over_limit_rows(table: &Table) -> Table {
    match table.column_index(COL_CREW_HOUR_STATUS) {
        Some(idx) => table.filter_rows(|row| {
            row.get(idx)
                .map(|c| c.canonical() == HourStatus::Over.as_str())
                .unwrap_or(false)
        }),
        None => Table::new(table.columns.clone()),
    }
}

/// Column subset for the on-screen over-limit listings: name-like,
/// company-like and rank-like columns when resolvable, plus the decimal
/// hours and crew status. Export keeps the full column set; this subset is
/// display only.
pub fn display_columns(table: &Table, kind: DatasetKind) -> Table {
    let mut indices = Vec::new();
    for field in [Field::CrewName, Field::Company, Field::Rank] {
        if let Some(idx) = resolve_field(table, field, kind) {
            indices.push(idx);
        }
    }
    for name in [COL_FLIGHT_HOURS_DECIMAL, COL_CREW_STATUS] {
        if let Some(idx) = table.column_index(name) {
            indices.push(idx);
        }
    }
    table.select_columns(&indices)
}
