//! What happened in the attacks just before a given kind of attack

use std::collections::HashMap;
use std::fmt;

use crate::constants::NO_ATTACKS_IN_RANGE_MESSAGE;
use crate::error::AnalysisResult;
use crate::logic::config::AnalysisConfig;
use crate::logic::dataset::record::WindowAggregate;

use super::{windows_in_band, WindowField};

/// Share of each value of one field, first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDistribution {
    pub field: WindowField,
    pub title: String,
    /// (value, percentage rounded to 2 decimals)
    pub entries: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BeforeAttackReport {
    pub distributions: Vec<ValueDistribution>,
}

/// For each window in the severity band (beyond the first `num_attacks`),
/// pool the values of the `num_attacks` windows preceding it and report the
/// percentage of every value per field.
pub fn before_attack(
    windows: &[WindowAggregate],
    num_attacks: usize,
    severity_value: f64,
    config: &AnalysisConfig,
) -> AnalysisResult<BeforeAttackReport> {
    let selected = windows_in_band(windows, severity_value, config)?;
    if windows.is_empty() {
        log::info!("{}", NO_ATTACKS_IN_RANGE_MESSAGE);
        return Ok(BeforeAttackReport::default());
    }

    let (lower, upper) = config.severity_bounds(severity_value);
    let mut distributions = Vec::with_capacity(WindowField::ALL.len());

    for field in WindowField::ALL {
        let mut pooled: Vec<String> = Vec::new();
        for &idx in selected.iter().filter(|&&idx| idx > num_attacks) {
            for window in &windows[idx - num_attacks..idx] {
                pooled.extend(field.values(window));
            }
        }

        distributions.push(ValueDistribution {
            field,
            title: format!(
                "Percentage of {} in the last {} attacks before attacks within {} and {} range",
                field.name(),
                num_attacks,
                lower,
                upper
            ),
            entries: percentages(&pooled),
        });
    }

    Ok(BeforeAttackReport { distributions })
}

fn percentages(values: &[String]) -> Vec<(String, f64)> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        let count = counts.entry(v.as_str()).or_insert(0);
        if *count == 0 {
            order.push(v.as_str());
        }
        *count += 1;
    }

    let total = values.len() as f64;
    order
        .into_iter()
        .map(|v| {
            let pct = counts[v] as f64 / total * 100.0;
            (v.to_string(), (pct * 100.0).round() / 100.0)
        })
        .collect()
}

impl fmt::Display for BeforeAttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dist in &self.distributions {
            writeln!(f, "{}:", dist.title)?;
            if dist.entries.is_empty() {
                writeln!(f, "  (no data)")?;
            }
            for (value, pct) in &dist.entries {
                writeln!(f, "  {}: {:.2} %", value.replace('\n', " "), pct)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn window(sigs: &[&str], severity: f64) -> WindowAggregate {
        let mut w = WindowAggregate::new("A");
        w.signatures = sigs.iter().map(|s| s.to_string()).collect();
        w.severities = vec![severity; sigs.len()];
        w.mitre_ids = vec!["T1".to_string(); sigs.len()];
        w.path_categories = vec!["Other".to_string(); sigs.len()];
        w.event_types = vec!["1".to_string(); sigs.len()];
        w.tags = vec!["t".to_string(); sigs.len()];
        w.refresh_severity_stats();
        w
    }

    fn entries_of(report: &BeforeAttackReport, field: WindowField) -> &[(String, f64)] {
        &report
            .distributions
            .iter()
            .find(|d| d.field == field)
            .unwrap()
            .entries
    }

    #[test]
    fn test_pools_preceding_windows() {
        let windows = vec![
            window(&["X"], 25.0),
            window(&["A", "B"], 25.0),
            window(&["A"], 25.0),
            window(&["Z"], 75.0), // in band
        ];
        let report = before_attack(&windows, 2, 75.0, &AnalysisConfig::default()).unwrap();

        let sigs = entries_of(&report, WindowField::Signature);
        assert_eq!(
            sigs,
            &[("A".to_string(), 66.67), ("B".to_string(), 33.33)]
        );
        let sev = entries_of(&report, WindowField::Severity);
        assert_eq!(sev, &[("25".to_string(), 100.0)]);
    }

    #[test]
    fn test_index_must_exceed_num_attacks() {
        // the in-band window sits at index 2 == num_attacks, so it is skipped
        let windows = vec![window(&["A"], 25.0), window(&["B"], 25.0), window(&["Z"], 75.0)];
        let report = before_attack(&windows, 2, 75.0, &AnalysisConfig::default()).unwrap();
        assert!(entries_of(&report, WindowField::Signature).is_empty());
    }

    #[test]
    fn test_severity_out_of_range_rejected() {
        let err = before_attack(&[], 2, 10.0, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::SeverityOutOfRange { .. }));
    }

    #[test]
    fn test_no_windows() {
        let report = before_attack(&[], 2, 50.0, &AnalysisConfig::default()).unwrap();
        assert!(report.distributions.is_empty());
    }

    #[test]
    fn test_title() {
        let windows = vec![window(&["A"], 50.0)];
        let report = before_attack(&windows, 3, 50.0, &AnalysisConfig::default()).unwrap();
        assert_eq!(
            report.distributions[0].title,
            "Percentage of signature in the last 3 attacks before attacks within 47.5 and 52.5 range"
        );
    }
}
