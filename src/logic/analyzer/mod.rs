//! Attack Pattern Analyzer
//!
//! Looks at attack windows whose mean severity falls in a narrow band and
//! reports what preceded them (`before`) and how they started (`inside`).

pub mod before;
pub mod inside;

use crate::error::AnalysisResult;
use crate::logic::config::AnalysisConfig;
use crate::logic::dataset::record::WindowAggregate;

pub use before::before_attack;
pub use inside::inside_attack;

/// Window columns the analyzer reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowField {
    Signature,
    MitreId,
    PathCategory,
    EventType,
    Tag,
    Severity,
}

impl WindowField {
    pub const ALL: [WindowField; 6] = [
        WindowField::Signature,
        WindowField::MitreId,
        WindowField::PathCategory,
        WindowField::EventType,
        WindowField::Tag,
        WindowField::Severity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WindowField::Signature => "signature",
            WindowField::MitreId => "RuleAnnotation.mitre_attack.id",
            WindowField::PathCategory => "path_category_detailed",
            WindowField::EventType => "EventType",
            WindowField::Tag => "tag",
            WindowField::Severity => "severity_id",
        }
    }

    pub fn values(&self, window: &WindowAggregate) -> Vec<String> {
        match self {
            WindowField::Signature => window.signatures.clone(),
            WindowField::MitreId => window.mitre_ids.clone(),
            WindowField::PathCategory => window.path_categories.clone(),
            WindowField::EventType => window.event_types.clone(),
            WindowField::Tag => window.tags.clone(),
            WindowField::Severity => window.severities.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Validate the severity value, then return the indices of windows whose
/// `severity_mean` lies inside the band (bounds inclusive).
pub(crate) fn windows_in_band(
    windows: &[WindowAggregate],
    severity_value: f64,
    config: &AnalysisConfig,
) -> AnalysisResult<Vec<usize>> {
    config.check_severity_value(severity_value)?;
    let (lower, upper) = config.severity_bounds(severity_value);

    Ok(windows
        .iter()
        .enumerate()
        .filter(|(_, w)| w.severity_mean >= lower && w.severity_mean <= upper)
        .map(|(i, _)| i)
        .collect())
}
