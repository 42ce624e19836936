//! Pipeline entry point: raw tables in, structured analysis out.

use crate::aggregate::summarize_by_company;
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::merge::merge_monthly_fields;
use crate::model::{AnalysisInput, AnalysisMeta, AnalysisResult, DatasetKind};
use crate::process::process_dataset;
use crate::report::{assemble_report, over_limit_rows};

/// Run one complete analysis over the two raw report tables.
///
/// Each run is self-contained: nothing is shared between runs and the
/// result is never mutated afterwards. Fatal errors (an unresolvable
/// flight-hours column) abort with no partial output; everything else
/// degrades and lands in `warnings`.
pub fn run(input: AnalysisInput, config: &AnalyzerConfig) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;

    let mut warnings = Vec::new();

    let monthly = process_dataset(input.monthly, DatasetKind::Monthly, config, &mut warnings)?;
    let consecutive = process_dataset(
        input.consecutive,
        DatasetKind::Consecutive,
        config,
        &mut warnings,
    )?;
    let consecutive = merge_monthly_fields(consecutive, &monthly, &mut warnings);

    let monthly_summary =
        summarize_by_company(&monthly, DatasetKind::Monthly, config, &mut warnings);
    let consecutive_summary =
        summarize_by_company(&consecutive, DatasetKind::Consecutive, config, &mut warnings);

    let report = assemble_report(&monthly_summary, &consecutive_summary);

    Ok(AnalysisResult {
        meta: AnalysisMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        monthly_over: over_limit_rows(&monthly),
        consecutive_over: over_limit_rows(&consecutive),
        monthly,
        consecutive,
        monthly_summary,
        consecutive_summary,
        report,
        warnings,
    })
}
