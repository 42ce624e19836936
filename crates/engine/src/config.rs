use serde::Deserialize;

use crate::error::AnalysisError;
use crate::model::DatasetKind;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Analyzer configuration. Defaults carry the regulatory constants; a TOML
/// file can override them for operators with different limits.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub thresholds: Thresholds,
    pub population: Population,
}

/// Flight-hour limits per accounting period.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub monthly_hours: f64,
    pub consecutive_hours: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            monthly_hours: 110.0,
            consecutive_hours: 1050.0,
        }
    }
}

/// Which crew count toward a company's over-limit ratio.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Population {
    /// Crew-status value marking active/available crew.
    pub ready_status: String,
    /// Rank codes that classify as COCKPIT (compared uppercased).
    pub cockpit_ranks: Vec<String>,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            ready_status: "Ready Crew".to_string(),
            cockpit_ranks: vec!["CPT".to_string(), "FO".to_string(), "CPT/FO".to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl AnalyzerConfig {
    pub fn from_toml(input: &str) -> Result<Self, AnalysisError> {
        let config: AnalyzerConfig =
            toml::from_str(input).map_err(|e| AnalysisError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.thresholds.monthly_hours <= 0.0 || self.thresholds.consecutive_hours <= 0.0 {
            return Err(AnalysisError::ConfigValidation(
                "thresholds must be positive".into(),
            ));
        }

        if self.thresholds.monthly_hours >= self.thresholds.consecutive_hours {
            return Err(AnalysisError::ConfigValidation(format!(
                "monthly threshold ({}) must be below the consecutive threshold ({})",
                self.thresholds.monthly_hours, self.thresholds.consecutive_hours
            )));
        }

        if self.population.ready_status.trim().is_empty() {
            return Err(AnalysisError::ConfigValidation(
                "ready_status must not be empty".into(),
            ));
        }

        if self.population.cockpit_ranks.is_empty() {
            return Err(AnalysisError::ConfigValidation(
                "at least one cockpit rank is required".into(),
            ));
        }

        Ok(())
    }

    pub fn threshold_for(&self, kind: DatasetKind) -> f64 {
        match kind {
            DatasetKind::Monthly => self.thresholds.monthly_hours,
            DatasetKind::Consecutive => self.thresholds.consecutive_hours,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
