//! Per-company aggregation: the share of ready cockpit crew over the limit.

use std::collections::HashMap;

use crate::columns::{resolve_field, Field};
use crate::config::AnalyzerConfig;
use crate::hours::round2;
use crate::model::{
    CompanySummary, DatasetKind, HourStatus, RankGroup, Table, COL_ACTUAL_RANK,
    COL_CREW_HOUR_STATUS,
};

/// Group an enriched table by company and compute, per company, the count of
/// rows where the crew status equals the configured ready value and the rank
/// group is COCKPIT, the subset of those flagged OVER, and the resulting
/// percentage (0 when the denominator is 0, rounded to 2 decimals).
///
/// Every distinct non-blank company emits a summary row, qualifying crew or
/// not: a company whose rows are all cabin or non-ready still appears with
/// zero totals. A missing company column degrades to an empty aggregate with
/// a warning. Summaries come out in first-appearance order; the final report
/// imposes its own ordering.
pub fn summarize_by_company(
    table: &Table,
    kind: DatasetKind,
    config: &AnalyzerConfig,
    warnings: &mut Vec<String>,
) -> Vec<CompanySummary> {
    let company_col = match resolve_field(table, Field::Company, kind) {
        Some(idx) => idx,
        None => {
            warnings.push(format!(
                "{} report: no company column found, summary is empty",
                kind.report_name()
            ));
            return Vec::new();
        }
    };
    let status_col = resolve_field(table, Field::CrewStatus, kind);
    if status_col.is_none() {
        warnings.push(format!(
            "{} report: no crew-status column found, no rows qualify as ready crew",
            kind.report_name()
        ));
    }

    // Derived columns are appended under fixed names, so exact lookup is
    // enough here.
    let rank_col = table.column_index(COL_ACTUAL_RANK);
    let hour_status_col = table.column_index(COL_CREW_HOUR_STATUS);

    let ready = config.population.ready_status.as_str();

    let mut summaries: Vec<CompanySummary> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in &table.rows {
        if row[company_col].is_blank() {
            continue;
        }
        let company = row[company_col].canonical();

        // Register the company before any filtering so zero-qualifying
        // companies still get a row.
        let slot = *index.entry(company.clone()).or_insert_with(|| {
            summaries.push(CompanySummary {
                company,
                total_ready_cockpit: 0,
                over_limit: 0,
                percentage: 0.0,
            });
            summaries.len() - 1
        });

        // Exact status comparison; rank normalization happened upstream.
        let is_ready = status_col
            .map(|idx| row[idx].canonical() == ready)
            .unwrap_or(false);
        let is_cockpit = rank_col
            .map(|idx| row[idx].canonical() == RankGroup::Cockpit.as_str())
            .unwrap_or(false);
        if !is_ready || !is_cockpit {
            continue;
        }

        summaries[slot].total_ready_cockpit += 1;
        let is_over = hour_status_col
            .map(|idx| row[idx].canonical() == HourStatus::Over.as_str())
            .unwrap_or(false);
        if is_over {
            summaries[slot].over_limit += 1;
        }
    }

    for summary in &mut summaries {
        if summary.total_ready_cockpit > 0 {
            summary.percentage = round2(
                summary.over_limit as f64 / summary.total_ready_cockpit as f64 * 100.0,
            );
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::load_csv_table;
    use crate::process::process_dataset;

    fn summarize(csv: &str, kind: DatasetKind) -> (Vec<CompanySummary>, Vec<String>) {
        let table = load_csv_table(csv).unwrap();
        let config = AnalyzerConfig::default();
        let mut warnings = Vec::new();
        let enriched = process_dataset(table, kind, &config, &mut warnings).unwrap();
        let summaries = summarize_by_company(&enriched, kind, &config, &mut warnings);
        (summaries, warnings)
    }

    #[test]
    fn over_limit_ratio_per_company() {
        let (summaries, warnings) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,CPT,AIR-X,Ready Crew\n\
             C002,90:00,FO,AIR-X,Ready Crew\n",
            DatasetKind::Monthly,
        );

        assert!(warnings.is_empty());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].company, "AIR-X");
        assert_eq!(summaries[0].total_ready_cockpit, 2);
        assert_eq!(summaries[0].over_limit, 1);
        assert_eq!(summaries[0].percentage, 50.0);
    }

    #[test]
    fn only_ready_cockpit_rows_count() {
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,CPT,AIR-X,Ready Crew\n\
             C002,120:00,PURSER,AIR-X,Ready Crew\n\
             C003,120:00,CPT,AIR-X,Standby\n",
            DatasetKind::Monthly,
        );

        // Cabin ranks and non-ready crew stay out of both counts.
        assert_eq!(summaries[0].total_ready_cockpit, 1);
        assert_eq!(summaries[0].over_limit, 1);
        assert_eq!(summaries[0].percentage, 100.0);
    }

    #[test]
    fn zero_qualifying_rows_is_not_a_division_error() {
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,PURSER,AIR-X,Ready Crew\n",
            DatasetKind::Monthly,
        );
        // Cabin-only companies still get a row, with zero totals.
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].company, "AIR-X");
        assert_eq!(summaries[0].total_ready_cockpit, 0);
        assert_eq!(summaries[0].over_limit, 0);
        assert_eq!(summaries[0].percentage, 0.0);
    }

    #[test]
    fn cabin_only_company_keeps_its_summary_row_alongside_others() {
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,CPT,AIR-X,Ready Crew\n\
             C002,95:00,PURSER,AIR-Z,Ready Crew\n",
            DatasetKind::Monthly,
        );
        let companies: Vec<&str> = summaries.iter().map(|s| s.company.as_str()).collect();
        assert_eq!(companies, vec!["AIR-X", "AIR-Z"]);
        assert_eq!(summaries[1].total_ready_cockpit, 0);
        assert_eq!(summaries[1].percentage, 0.0);
    }

    #[test]
    fn ready_status_comparison_is_exact() {
        // Trailing space in the status cell: not ready.
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,CPT,AIR-X,Ready Crew \n",
            DatasetKind::Monthly,
        );
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_ready_cockpit, 0);
    }

    #[test]
    fn blank_company_rows_are_skipped() {
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,115:00,CPT,,Ready Crew\n\
             C002,90:00,CPT,AIR-Y,Ready Crew\n",
            DatasetKind::Monthly,
        );
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].company, "AIR-Y");
    }

    #[test]
    fn companies_keep_first_appearance_order() {
        let (summaries, _) = summarize(
            "Crew ID,Flight Hours,Rank,Company,Crew Status\n\
             C001,90:00,CPT,ZULU,Ready Crew\n\
             C002,90:00,CPT,ALFA,Ready Crew\n\
             C003,120:00,CPT,ZULU,Ready Crew\n",
            DatasetKind::Monthly,
        );
        let companies: Vec<&str> = summaries.iter().map(|s| s.company.as_str()).collect();
        assert_eq!(companies, vec!["ZULU", "ALFA"]);
        assert_eq!(summaries[0].total_ready_cockpit, 2);
    }

    #[test]
    fn missing_company_column_yields_empty_summary_with_warning() {
        let (summaries, warnings) = summarize(
            "Crew ID,Flight Hours,Rank,Crew Status\nC001,115:00,CPT,Ready Crew\n",
            DatasetKind::Monthly,
        );
        assert!(summaries.is_empty());
        assert!(warnings.iter().any(|w| w.contains("company")));
    }

    #[test]
    fn missing_crew_status_column_means_nobody_qualifies() {
        let (summaries, warnings) = summarize(
            "Crew ID,Flight Hours,Rank,Company\nC001,115:00,CPT,AIR-X\n",
            DatasetKind::Monthly,
        );
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_ready_cockpit, 0);
        assert_eq!(summaries[0].percentage, 0.0);
        assert!(warnings.iter().any(|w| w.contains("crew-status")));
    }

    #[test]
    fn consecutive_kind_resolves_upper_cased_headers() {
        let (summaries, _) = summarize(
            "ID,FLIGHT HOURS,RANK,COMPANY,Crew Status\n\
             C001,1100:00,CPT,AIR-X,Ready Crew\n",
            DatasetKind::Consecutive,
        );
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].over_limit, 1);
    }
}
