use serde::Serialize;

// ---------------------------------------------------------------------------
// Cells and tables
// ---------------------------------------------------------------------------

/// A single cell from an uploaded report. Input schemas are not fixed in
/// advance; reports only need to carry the expected columns under some
/// accepted header alias.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Canonical string form, used for join keys and text rendering.
    /// Integral numbers render without a decimal point so a numeric crew id
    /// matches its text spelling from the other report.
    pub fn canonical(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    /// True for genuinely missing values and empty strings.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// An in-memory report table: ordered column names plus rows of cells.
/// Rows are padded with `Cell::Empty` to the column count on insertion.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Index of an exactly-named column. Alias-aware lookup lives in
    /// `columns::resolve_column`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows[row].get(col).unwrap_or(&Cell::Empty)
    }

    /// Append a derived column. `values` must carry one entry per row.
    pub fn push_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// New table with the same columns and only the rows passing `keep`.
    pub fn filter_rows(&self, keep: impl Fn(&[Cell]) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }

    /// New table holding only the given columns, in the given order.
    pub fn select_columns(&self, indices: &[usize]) -> Table {
        Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Derived column names
// ---------------------------------------------------------------------------

// Kept verbatim from the original printed report so exported workbooks stay
// drop-in compatible with downstream consumers.
pub const COL_FLIGHT_HOURS_DECIMAL: &str = "Flight Hours Decimal";
pub const COL_ACTUAL_RANK: &str = "Actual Rank";
pub const COL_CREW_HOUR_STATUS: &str = "Crew Hour Status";
pub const COL_CREW_CATEGORY: &str = "Crew Category";
pub const COL_CREW_STATUS: &str = "Crew Status";

/// Fill value for merge fields when no monthly match exists.
pub const MERGE_SENTINEL: &str = "-";

// ---------------------------------------------------------------------------
// Datasets and classifications
// ---------------------------------------------------------------------------

/// Which of the two reports a table came from. Selects the hour threshold
/// and the header alias priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Monthly,
    Consecutive,
}

impl DatasetKind {
    /// Human name used in warnings and error messages.
    pub fn report_name(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Consecutive => "Consecutive Year",
        }
    }

    /// Period label used in the final summary report.
    pub fn period_label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Consecutive => "12 Consecutive Months",
        }
    }
}

/// Role grouping derived from the rank code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankGroup {
    Cockpit,
    Cabin,
}

impl RankGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cockpit => "COCKPIT",
            Self::Cabin => "CABIN",
        }
    }
}

impl std::fmt::Display for RankGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flight-hour compliance status relative to a period threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HourStatus {
    Over,
    Other,
}

impl HourStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Over => "OVER",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for HourStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Summaries + report
// ---------------------------------------------------------------------------

/// Per-company share of ready cockpit crew over the hour limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    pub company: String,
    pub total_ready_cockpit: usize,
    pub over_limit: usize,
    /// `over_limit / total_ready_cockpit * 100`, rounded to 2 decimals.
    /// 0 when the denominator is 0.
    pub percentage: f64,
}

/// One line of the final company x period report. `percentage` is already
/// formatted ("50.00%"); the consecutive row carries a blank company name,
/// matching the layout of the original printed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub company: String,
    pub period: String,
    pub percentage: String,
}

// ---------------------------------------------------------------------------
// Analysis input + output
// ---------------------------------------------------------------------------

/// The two raw report tables for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub monthly: Table,
    pub consecutive: Table,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMeta {
    pub engine_version: String,
    pub run_at: String,
}

/// Everything one analysis run produces. Derived state is never mutated
/// after the run; a new pair of inputs starts from scratch.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub meta: AnalysisMeta,
    /// Monthly report plus the three derived columns.
    pub monthly: Table,
    /// Consecutive-year report plus derived columns and merged fields.
    pub consecutive: Table,
    pub monthly_over: Table,
    pub consecutive_over: Table,
    pub monthly_summary: Vec<CompanySummary>,
    pub consecutive_summary: Vec<CompanySummary>,
    pub report: Vec<ReportRow>,
    /// Non-fatal degradations encountered during the run.
    pub warnings: Vec<String>,
}
