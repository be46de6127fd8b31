//! Signature removal impact
//!
//! "What if this rule never fired?" For each attack window, drop every alert
//! of one signature, recompute the severity stats and measure how far the
//! window moved.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::NO_ATTACKS_MESSAGE;
use crate::logic::dataset::record::{Event, WindowAggregate};

// ============================================================================
// TYPES
// ============================================================================

/// Per-signature impact row. Field names follow the stats export columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureImpact {
    pub signature: String,
    /// Mean window dissimilarity (0 = unchanged, 1 = disjoint)
    #[serde(rename = "Indice_Diff")]
    pub dissimilarity: f64,
    #[serde(rename = "Media_Differenza_Severity_min")]
    pub mean_delta_min: f64,
    #[serde(rename = "Media_Differenza_Severity_mean")]
    pub mean_delta_mean: f64,
    #[serde(rename = "Media_Differenza_Severity_max")]
    pub mean_delta_max: f64,
    /// Windows whose severity_max dropped by at least the threshold
    #[serde(rename = "N_Max_Sev_Diff_15")]
    pub significant_max_drops: usize,
    /// Windows left with no alerts at all
    #[serde(rename = "N_Attacchi_Non_rilevati")]
    pub undetected_windows: usize,
}

// ============================================================================
// REMOVAL
// ============================================================================

/// Copy of `window` without any alert of `signature`, stats recomputed
pub fn remove_signature(window: &WindowAggregate, signature: &str) -> WindowAggregate {
    let keep: Vec<usize> = window
        .signatures
        .iter()
        .enumerate()
        .filter(|(_, s)| s.as_str() != signature)
        .map(|(i, _)| i)
        .collect();

    let pick_str = |list: &[String]| -> Vec<String> {
        keep.iter().filter_map(|&i| list.get(i).cloned()).collect()
    };

    let mut reduced = WindowAggregate {
        attack_code: window.attack_code.clone(),
        signatures: pick_str(&window.signatures),
        mitre_ids: pick_str(&window.mitre_ids),
        severities: keep.iter().filter_map(|&i| window.severities.get(i).copied()).collect(),
        event_types: pick_str(&window.event_types),
        tags: pick_str(&window.tags),
        path_categories: pick_str(&window.path_categories),
        ..Default::default()
    };
    reduced.refresh_severity_stats();
    reduced
}

// ============================================================================
// DISSIMILARITY
// ============================================================================

/// `|a - b| / max(a, b, 1)`
pub fn relative_difference(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.max(b).max(1.0)
}

/// `|A Δ B| / (|A| + |B|)` over the distinct values of each list
pub fn symmetric_difference_ratio<T: Ord>(a: &[T], b: &[T]) -> f64 {
    let set_a: BTreeSet<&T> = a.iter().collect();
    let set_b: BTreeSet<&T> = b.iter().collect();
    let total = set_a.len() + set_b.len();
    if total == 0 {
        return 0.0;
    }
    set_a.symmetric_difference(&set_b).count() as f64 / total as f64
}

fn severity_keys(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

/// Mean of the three numeric severity differences and the five categorical
/// set differences (MITRE id, severity, event type, tag, signature)
pub fn window_dissimilarity(original: &WindowAggregate, reduced: &WindowAggregate) -> f64 {
    let parts = [
        relative_difference(original.severity_max, reduced.severity_max),
        relative_difference(original.severity_mean, reduced.severity_mean),
        relative_difference(original.severity_min, reduced.severity_min),
        symmetric_difference_ratio(&original.mitre_ids, &reduced.mitre_ids),
        symmetric_difference_ratio(
            &severity_keys(&original.severities),
            &severity_keys(&reduced.severities),
        ),
        symmetric_difference_ratio(&original.event_types, &reduced.event_types),
        symmetric_difference_ratio(&original.tags, &reduced.tags),
        symmetric_difference_ratio(&original.signatures, &reduced.signatures),
    ];
    parts.iter().sum::<f64>() / parts.len() as f64
}

// ============================================================================
// IMPACT
// ============================================================================

/// Impact of removing `signature` from every window.
///
/// Windows that end up empty are only counted in `undetected_windows`; the
/// means run over the remaining windows and are 0 when none remain.
pub fn signature_impact(
    windows: &[WindowAggregate],
    signature: &str,
    max_drop_threshold: f64,
) -> SignatureImpact {
    let mut dissimilarity = Vec::with_capacity(windows.len());
    let mut delta_min = Vec::with_capacity(windows.len());
    let mut delta_mean = Vec::with_capacity(windows.len());
    let mut delta_max = Vec::with_capacity(windows.len());
    let mut undetected = 0;

    for window in windows {
        let reduced = remove_signature(window, signature);
        if reduced.severities.is_empty() {
            undetected += 1;
            continue;
        }
        dissimilarity.push(window_dissimilarity(window, &reduced));
        delta_min.push(window.severity_min - reduced.severity_min);
        delta_mean.push(window.severity_mean - reduced.severity_mean);
        delta_max.push(window.severity_max - reduced.severity_max);
    }

    SignatureImpact {
        signature: signature.to_string(),
        dissimilarity: mean(&dissimilarity),
        mean_delta_min: mean(&delta_min),
        mean_delta_mean: mean(&delta_mean),
        mean_delta_max: mean(&delta_max),
        significant_max_drops: delta_max.iter().filter(|&&d| d >= max_drop_threshold).count(),
        undetected_windows: undetected,
    }
}

/// Distinct signatures of attack-labeled events, first-seen order
pub fn attack_signatures(events: &[Event]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    events
        .iter()
        .filter(|e| e.is_attack)
        .filter(|e| seen.insert(e.signature.as_str()))
        .map(|e| e.signature.clone())
        .collect()
}

/// Impact row for every signature; empty when there are no windows or no
/// attack signatures.
pub fn signature_stats(
    windows: &[WindowAggregate],
    signatures: &[String],
    max_drop_threshold: f64,
) -> Vec<SignatureImpact> {
    if windows.is_empty() || signatures.is_empty() {
        log::info!("{}", NO_ATTACKS_MESSAGE);
        return Vec::new();
    }

    let stats: Vec<SignatureImpact> = signatures
        .iter()
        .map(|sig| signature_impact(windows, sig, max_drop_threshold))
        .collect();
    log::info!("Computed impact for {} signatures over {} windows", stats.len(), windows.len());
    stats
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
