//! Cross-dataset merge: copy crew category and crew status from the monthly
//! report onto the consecutive-year report, keyed by crew identifier.

use std::collections::HashMap;

use crate::columns::{resolve_field, Field};
use crate::model::{
    Cell, DatasetKind, Table, COL_CREW_CATEGORY, COL_CREW_STATUS, MERGE_SENTINEL,
};

/// Left join: every consecutive-year row is kept exactly once, regardless of
/// duplicate keys on the monthly side (the first monthly occurrence wins).
/// Unmatched rows get the "-" sentinel for both fields. If the identifier or
/// either source field cannot be resolved, the join is skipped entirely and
/// every row gets the sentinel, with a warning.
pub fn merge_monthly_fields(
    mut consecutive: Table,
    monthly: &Table,
    warnings: &mut Vec<String>,
) -> Table {
    let resolved = (
        resolve_field(&consecutive, Field::CrewId, DatasetKind::Consecutive),
        resolve_field(monthly, Field::CrewId, DatasetKind::Monthly),
        resolve_field(monthly, Field::CrewCategory, DatasetKind::Monthly),
        resolve_field(monthly, Field::CrewStatus, DatasetKind::Monthly),
    );

    let (categories, statuses) = match resolved {
        (Some(consec_id), Some(mon_id), Some(mon_cat), Some(mon_status)) => {
            // First occurrence wins on duplicate monthly crew ids.
            let mut by_id: HashMap<String, (&Cell, &Cell)> = HashMap::new();
            for row in &monthly.rows {
                by_id
                    .entry(row[mon_id].canonical())
                    .or_insert((&row[mon_cat], &row[mon_status]));
            }

            let mut categories = Vec::with_capacity(consecutive.row_count());
            let mut statuses = Vec::with_capacity(consecutive.row_count());
            for row in &consecutive.rows {
                match by_id.get(&row[consec_id].canonical()) {
                    Some((category, status)) => {
                        categories.push(sentinel_if_missing(category));
                        statuses.push(sentinel_if_missing(status));
                    }
                    None => {
                        categories.push(Cell::Text(MERGE_SENTINEL.into()));
                        statuses.push(Cell::Text(MERGE_SENTINEL.into()));
                    }
                }
            }
            (categories, statuses)
        }
        _ => {
            warnings.push(
                "Consecutive Year report: crew id, crew category and crew status could not all \
                 be resolved; merge skipped, fields set to \"-\""
                    .to_string(),
            );
            let fill = vec![Cell::Text(MERGE_SENTINEL.to_string()); consecutive.row_count()];
            (fill.clone(), fill)
        }
    };

    consecutive.push_column(COL_CREW_CATEGORY, categories);
    consecutive.push_column(COL_CREW_STATUS, statuses);
    consecutive
}

/// Matched rows keep the monthly value; only genuinely missing cells are
/// filled with the sentinel (empty strings pass through).
fn sentinel_if_missing(cell: &Cell) -> Cell {
    match cell {
        Cell::Empty => Cell::Text(MERGE_SENTINEL.into()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::load_csv_table;

    fn monthly_fixture() -> Table {
        load_csv_table(
            "Crew ID,Crew Category,Crew Status\n\
             C001,Senior,Ready Crew\n\
             C002,Junior,Standby\n",
        )
        .unwrap()
    }

    #[test]
    fn copies_fields_for_matching_ids() {
        let consecutive = load_csv_table("ID,FLIGHT HOURS\nC001,1100:00\nC002,900:00\n").unwrap();
        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly_fixture(), &mut warnings);

        assert!(warnings.is_empty());
        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        let status = merged.column_index(COL_CREW_STATUS).unwrap();
        assert_eq!(merged.cell(0, cat), &Cell::Text("Senior".into()));
        assert_eq!(merged.cell(0, status), &Cell::Text("Ready Crew".into()));
        assert_eq!(merged.cell(1, cat), &Cell::Text("Junior".into()));
    }

    #[test]
    fn unmatched_ids_get_the_sentinel() {
        let consecutive = load_csv_table("ID\nC999\n").unwrap();
        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly_fixture(), &mut warnings);

        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        let status = merged.column_index(COL_CREW_STATUS).unwrap();
        assert_eq!(merged.cell(0, cat), &Cell::Text("-".into()));
        assert_eq!(merged.cell(0, status), &Cell::Text("-".into()));
    }

    #[test]
    fn duplicate_monthly_ids_first_match_wins() {
        let monthly = load_csv_table(
            "Crew ID,Crew Category,Crew Status\n\
             C001,First,Ready Crew\n\
             C001,Second,Standby\n",
        )
        .unwrap();
        let consecutive = load_csv_table("ID\nC001\n").unwrap();

        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly, &mut warnings);

        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        assert_eq!(merged.row_count(), 1, "left join must not fan out");
        assert_eq!(merged.cell(0, cat), &Cell::Text("First".into()));
    }

    #[test]
    fn numeric_and_text_ids_join_on_canonical_form() {
        let monthly =
            load_csv_table("Crew ID,Crew Category,Crew Status\n1234,Senior,Ready Crew\n").unwrap();
        let mut consecutive = Table::new(vec!["ID".into()]);
        consecutive.push_row(vec![Cell::Text("1234".into())]);

        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly, &mut warnings);

        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        assert_eq!(merged.cell(0, cat), &Cell::Text("Senior".into()));
    }

    #[test]
    fn missing_monthly_fields_skip_the_join_with_warning() {
        // Monthly report lacks a crew-status column.
        let monthly = load_csv_table("Crew ID,Crew Category\nC001,Senior\n").unwrap();
        let consecutive = load_csv_table("ID\nC001\nC002\n").unwrap();

        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly, &mut warnings);

        assert_eq!(warnings.len(), 1);
        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        let status = merged.column_index(COL_CREW_STATUS).unwrap();
        for row in 0..merged.row_count() {
            assert_eq!(merged.cell(row, cat), &Cell::Text("-".into()));
            assert_eq!(merged.cell(row, status), &Cell::Text("-".into()));
        }
    }

    #[test]
    fn matched_rows_with_missing_cells_get_the_sentinel() {
        let monthly = load_csv_table("Crew ID,Crew Category,Crew Status\nC001,,Ready Crew\n").unwrap();
        let consecutive = load_csv_table("ID\nC001\n").unwrap();

        let mut warnings = Vec::new();
        let merged = merge_monthly_fields(consecutive, &monthly, &mut warnings);

        let cat = merged.column_index(COL_CREW_CATEGORY).unwrap();
        let status = merged.column_index(COL_CREW_STATUS).unwrap();
        assert_eq!(merged.cell(0, cat), &Cell::Text("-".into()));
        assert_eq!(merged.cell(0, status), &Cell::Text("Ready Crew".into()));
    }
}
