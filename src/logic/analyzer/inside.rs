//! How attacks of a given severity start: leading MITRE ids and signatures

use std::collections::HashMap;
use std::fmt;

use crate::constants::NO_ATTACKS_IN_RANGE_MESSAGE;
use crate::error::AnalysisResult;
use crate::logic::config::AnalysisConfig;
use crate::logic::dataset::record::WindowAggregate;

use super::windows_in_band;

/// Leading sequences grouped by length (1..=3), each group most frequent first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceGroups {
    pub groups: [Vec<(Vec<String>, usize)>; 3],
}

impl SequenceGroups {
    fn from_sequences(sequences: Vec<Vec<String>>) -> Self {
        let mut order: Vec<Vec<String>> = Vec::new();
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        for seq in sequences {
            let count = counts.entry(seq.clone()).or_insert(0);
            if *count == 0 {
                order.push(seq);
            }
            *count += 1;
        }

        let mut groups: [Vec<(Vec<String>, usize)>; 3] = Default::default();
        for seq in order {
            let count = counts[&seq];
            if let Some(group) = seq.len().checked_sub(1).and_then(|i| groups.get_mut(i)) {
                group.push((seq, count));
            }
        }
        for group in &mut groups {
            group.sort_by(|a, b| b.1.cmp(&a.1));
        }
        Self { groups }
    }

    /// Sequences of exactly `length` ids
    pub fn of_length(&self, length: usize) -> &[(Vec<String>, usize)] {
        length
            .checked_sub(1)
            .and_then(|i| self.groups.get(i))
            .map(|g| g.as_slice())
            .unwrap_or(&[])
    }
}

fn group_label(length: usize) -> String {
    if length > 1 {
        format!("{}-digits sequences", length)
    } else {
        format!("{}-digit repetitions", length)
    }
}

impl fmt::Display for SequenceGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for length in 1..=self.groups.len() {
            writeln!(f, "{}:", group_label(length))?;
            for (seq, count) in self.of_length(length) {
                writeln!(f, "  ({}): {}", seq.join(", "), count)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsideAttackReport {
    pub mitre: SequenceGroups,
    pub signatures: SequenceGroups,
}

impl fmt::Display for InsideAttackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MITRE ATT&CK IDs:")?;
        write!(f, "{}", self.mitre)?;
        writeln!(f, "SIGNATURES:")?;
        write!(f, "{}", self.signatures)
    }
}

/// Opening of an attack: the whole list up to 3 items, the first 2 up to 5
/// items, otherwise the first 3. Single-item lists say nothing about order.
pub fn leading_sequence(values: &[String]) -> Option<Vec<String>> {
    let take = match values.len() {
        0 | 1 => return None,
        n @ 2..=3 => n,
        4..=5 => 2,
        _ => 3,
    };
    Some(values[..take].to_vec())
}

pub fn inside_attack(
    windows: &[WindowAggregate],
    severity_value: f64,
    config: &AnalysisConfig,
) -> AnalysisResult<InsideAttackReport> {
    let selected = windows_in_band(windows, severity_value, config)?;
    if windows.is_empty() {
        log::info!("{}", NO_ATTACKS_IN_RANGE_MESSAGE);
        return Ok(InsideAttackReport::default());
    }

    let mut mitre = Vec::new();
    let mut signatures = Vec::new();
    for &idx in &selected {
        let window = &windows[idx];
        mitre.extend(leading_sequence(&window.mitre_ids));
        signatures.extend(leading_sequence(&window.signatures));
    }

    log::debug!(
        "{} windows in band, {} MITRE and {} signature openings",
        selected.len(),
        mitre.len(),
        signatures.len()
    );

    Ok(InsideAttackReport {
        mitre: SequenceGroups::from_sequences(mitre),
        signatures: SequenceGroups::from_sequences(signatures),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn window(sigs: &[&str], mitre: &[&str], severity: f64) -> WindowAggregate {
        let mut w = WindowAggregate::new("A");
        w.signatures = strings(sigs);
        w.mitre_ids = strings(mitre);
        w.severities = vec![severity; sigs.len().max(1)];
        w.refresh_severity_stats();
        w
    }

    #[test]
    fn test_leading_sequence_rules() {
        assert_eq!(leading_sequence(&strings(&["a"])), None);
        assert_eq!(leading_sequence(&strings(&["a", "b"])), Some(strings(&["a", "b"])));
        assert_eq!(
            leading_sequence(&strings(&["a", "b", "c"])),
            Some(strings(&["a", "b", "c"]))
        );
        assert_eq!(leading_sequence(&strings(&["a", "b", "c", "d", "e"])), Some(strings(&["a", "b"])));
        assert_eq!(
            leading_sequence(&strings(&["a", "b", "c", "d", "e", "f"])),
            Some(strings(&["a", "b", "c"]))
        );
    }

    #[test]
    fn test_groups_by_length_sorted() {
        let windows = vec![
            window(&["S1", "S2"], &["T1", "T2", "T3"], 50.0),
            window(&["S3", "S4", "S5", "S6"], &["T1", "T2", "T3"], 50.0),
            window(&["S1", "S2"], &["T9"], 50.0),
            window(&["S7", "S8"], &["T1", "T2"], 100.0), // out of band
        ];
        let report = inside_attack(&windows, 50.0, &AnalysisConfig::default()).unwrap();

        let sig2 = report.signatures.of_length(2);
        assert_eq!(sig2[0], (strings(&["S1", "S2"]), 2));
        assert_eq!(sig2[1], (strings(&["S3", "S4"]), 1));
        assert!(report.signatures.of_length(1).is_empty());

        assert_eq!(report.mitre.of_length(3), &[(strings(&["T1", "T2", "T3"]), 2)]);
        assert!(report.mitre.of_length(2).is_empty());
    }

    #[test]
    fn test_report_text() {
        let windows = vec![window(&["S1", "S2"], &["T1", "T2"], 50.0)];
        let text = inside_attack(&windows, 50.0, &AnalysisConfig::default())
            .unwrap()
            .to_string();
        assert!(text.starts_with("MITRE ATT&CK IDs:\n1-digit repetitions:\n"));
        assert!(text.contains("2-digits sequences:\n  (T1, T2): 1\n"));
        assert!(text.contains("SIGNATURES:"));
    }

    #[test]
    fn test_out_of_range() {
        assert!(inside_attack(&[], 101.0, &AnalysisConfig::default()).is_err());
    }
}
