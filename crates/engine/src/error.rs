use std::fmt;

use crate::model::DatasetKind;

#[derive(Debug)]
pub enum AnalysisError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad threshold, empty rank list, etc.).
    ConfigValidation(String),
    /// The flight-hours column could not be resolved under any accepted
    /// alias. Fatal: every downstream computation depends on it.
    MissingFlightHours { dataset: DatasetKind },
    /// CSV read error.
    Csv(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingFlightHours { dataset } => {
                write!(
                    f,
                    "column 'Flight Hours' not found in the {} report",
                    dataset.report_name()
                )
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for AnalysisError {}
