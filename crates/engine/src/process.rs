//! Dataset processing: enrich one raw report with the derived columns.

use crate::classify::{hour_status, rank_group};
use crate::columns::{resolve_field, Field};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::hours::decimal_flight_hours;
use crate::model::{
    Cell, DatasetKind, RankGroup, Table, COL_ACTUAL_RANK, COL_CREW_HOUR_STATUS,
    COL_FLIGHT_HOURS_DECIMAL,
};

/// Enrich a raw report with `Flight Hours Decimal`, `Actual Rank` and
/// `Crew Hour Status`. All original columns are preserved unchanged.
///
/// A missing flight-hours column is the one fatal precondition; a missing
/// rank column degrades to CABIN for every row with a warning.
pub fn process_dataset(
    mut table: Table,
    kind: DatasetKind,
    config: &AnalyzerConfig,
    warnings: &mut Vec<String>,
) -> Result<Table, AnalysisError> {
    let hours_col = resolve_field(&table, Field::FlightHours, kind)
        .ok_or(AnalysisError::MissingFlightHours { dataset: kind })?;

    let rank_col = resolve_field(&table, Field::Rank, kind);
    if rank_col.is_none() {
        warnings.push(format!(
            "{} report: no rank column found, every row defaults to CABIN",
            kind.report_name()
        ));
    }

    let threshold = config.threshold_for(kind);

    let mut decimals = Vec::with_capacity(table.row_count());
    let mut ranks = Vec::with_capacity(table.row_count());
    let mut statuses = Vec::with_capacity(table.row_count());

    for row in &table.rows {
        let hours = decimal_flight_hours(&row[hours_col]);
        let rank = match rank_col {
            Some(idx) => rank_group(&row[idx], &config.population.cockpit_ranks),
            None => RankGroup::Cabin,
        };
        decimals.push(Cell::Number(hours));
        ranks.push(Cell::Text(rank.as_str().to_string()));
        statuses.push(Cell::Text(hour_status(hours, threshold).as_str().to_string()));
    }

    table.push_column(COL_FLIGHT_HOURS_DECIMAL, decimals);
    table.push_column(COL_ACTUAL_RANK, ranks);
    table.push_column(COL_CREW_HOUR_STATUS, statuses);

    Ok(table)
}
