//! Column resolution: maps heterogeneous, inconsistently-cased report
//! headers onto the canonical fields the analyzer needs.

use crate::model::{DatasetKind, Table};

/// Logical fields resolvable from an uploaded report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    CrewId,
    FlightHours,
    Rank,
    Company,
    CrewCategory,
    CrewStatus,
    CrewName,
}

impl Field {
    /// Accepted header spellings, in priority order. Alias order differs
    /// between the two reports: each report's native casing comes first.
    pub fn aliases(&self, kind: DatasetKind) -> &'static [&'static str] {
        use DatasetKind::{Consecutive, Monthly};
        match (self, kind) {
            (Field::CrewId, Monthly) => &["Crew ID", "ID", "crew id", "id"],
            (Field::CrewId, Consecutive) => &["ID", "Crew ID", "id", "crew id"],
            (Field::FlightHours, Monthly) => &["Flight Hours", "FLIGHT HOURS", "flight hours"],
            (Field::FlightHours, Consecutive) => &["FLIGHT HOURS", "Flight Hours", "flight hours"],
            (Field::Rank, Monthly) => &["Rank", "RANK", "rank"],
            (Field::Rank, Consecutive) => &["RANK", "Rank", "rank"],
            (Field::Company, Monthly) => &["Company", "COMPANY", "company"],
            (Field::Company, Consecutive) => &["COMPANY", "Company", "company"],
            // Category and status are sourced from the monthly report only;
            // the merged consecutive table reuses the same spellings.
            (Field::CrewCategory, _) => &["Crew Category", "CREW CATEGORY", "crew category"],
            (Field::CrewStatus, _) => &["Crew Status", "CREW STATUS", "crew status"],
            (Field::CrewName, Monthly) => &["Name", "name", "Crew Name", "crew name"],
            (Field::CrewName, Consecutive) => &["Crew Name", "crew name", "Name", "name"],
        }
    }
}

/// Two-pass header resolution.
///
/// Pass 1 scans candidates in order for a byte-for-byte column match; pass 2
/// rescans for a case-insensitive match. The exact pass runs to completion
/// across all candidates before any case-insensitive fallback, so a column
/// literally named "id" beats a case-insensitive hit on an earlier
/// candidate. `None` means "not found"; the caller decides whether that is
/// fatal for the field.
pub fn resolve_column(columns: &[String], candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        if let Some(idx) = columns.iter().position(|c| c == candidate) {
            return Some(idx);
        }
    }
    for candidate in candidates {
        let lower = candidate.to_lowercase();
        if let Some(idx) = columns.iter().position(|c| c.to_lowercase() == lower) {
            return Some(idx);
        }
    }
    None
}

/// Resolve a canonical field in a table using the dataset's alias order.
pub fn resolve_field(table: &Table, field: Field, kind: DatasetKind) -> Option<usize> {
    resolve_column(&table.columns, field.aliases(kind))
}
