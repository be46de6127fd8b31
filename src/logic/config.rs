//! Analysis Configuration
//!
//! Tunables shared by the miner, the impact calculator and the analyzer.
//! Can be loaded from a JSON file and overridden from the command line.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLUMNS_TO_DROP, DEFAULT_MAX_DROP_THRESHOLD, DEFAULT_MAX_MISSING_VALUES,
    DEFAULT_MIN_FREQUENCY, DEFAULT_PATTERN_LENGTHS, DEFAULT_SEVERITY_BAND, SEVERITY_FILTER_MAX,
    SEVERITY_FILTER_MIN,
};
use crate::error::{AnalysisError, AnalysisResult};

// ============================================================================
// ANALYSIS CONFIG
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sub-sequence lengths extracted from every run
    pub pattern_lengths: Vec<usize>,
    /// Distinctive patterns need a count strictly above this
    pub min_frequency: u64,
    /// Half-width of the severity_mean band used by the analyzer
    pub severity_band: f64,
    /// Lowest accepted severity filter value
    pub severity_min: f64,
    /// Highest accepted severity filter value
    pub severity_max: f64,
    /// severity_max drop counted as significant by the impact calculator
    pub max_drop_threshold: f64,
    /// Columns with more empty cells than this are pruned
    pub max_missing_values: usize,
    /// Columns always pruned from alert exports
    pub columns_to_drop: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern_lengths: DEFAULT_PATTERN_LENGTHS.to_vec(),
            min_frequency: DEFAULT_MIN_FREQUENCY,
            severity_band: DEFAULT_SEVERITY_BAND,
            severity_min: SEVERITY_FILTER_MIN,
            severity_max: SEVERITY_FILTER_MAX,
            max_drop_threshold: DEFAULT_MAX_DROP_THRESHOLD,
            max_missing_values: DEFAULT_MAX_MISSING_VALUES,
            columns_to_drop: DEFAULT_COLUMNS_TO_DROP.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> AnalysisResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        let config: AnalysisConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded analysis config from {}", path.display());
        Ok(config)
    }

    /// Reject parameters no analysis can run with
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.pattern_lengths.is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "pattern_lengths must not be empty".to_string(),
            ));
        }
        if self.pattern_lengths.contains(&0) {
            return Err(AnalysisError::InvalidConfig(
                "pattern_lengths must be positive".to_string(),
            ));
        }
        if !(self.severity_band >= 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "severity_band must be non-negative, got {}",
                self.severity_band
            )));
        }
        if !(self.severity_min <= self.severity_max) {
            return Err(AnalysisError::InvalidConfig(format!(
                "severity range [{}, {}] is inverted",
                self.severity_min, self.severity_max
            )));
        }
        Ok(())
    }

    /// Check a severity filter value against the accepted range
    pub fn check_severity_value(&self, value: f64) -> AnalysisResult<()> {
        if value < self.severity_min || value > self.severity_max || value.is_nan() {
            return Err(AnalysisError::SeverityOutOfRange {
                value,
                min: self.severity_min,
                max: self.severity_max,
            });
        }
        Ok(())
    }

    /// Inclusive severity_mean bounds around `value`
    pub fn severity_bounds(&self, value: f64) -> (f64, f64) {
        (value - self.severity_band, value + self.severity_band)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.pattern_lengths, vec![2, 3, 4]);
        assert_eq!(config.min_frequency, 2);
        assert_eq!(config.max_drop_threshold, 15.0);
        assert!(config.columns_to_drop.iter().any(|c| c == "_raw"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_length() {
        let config = AnalysisConfig {
            pattern_lengths: vec![2, 0],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_lengths() {
        let config = AnalysisConfig {
            pattern_lengths: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_severity_value_range() {
        let config = AnalysisConfig::default();
        assert!(config.check_severity_value(25.0).is_ok());
        assert!(config.check_severity_value(100.0).is_ok());
        assert!(matches!(
            config.check_severity_value(24.9),
            Err(AnalysisError::SeverityOutOfRange { .. })
        ));
        assert!(config.check_severity_value(100.1).is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "min_frequency": 5 }"#).unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.min_frequency, 5);
        assert_eq!(config.pattern_lengths, vec![2, 3, 4]);
    }

    #[test]
    fn test_severity_bounds() {
        let config = AnalysisConfig::default();
        assert_eq!(config.severity_bounds(50.0), (47.5, 52.5));
    }
}
