//! Summary statistics over the signature impact table
//!
//! Correlation matrix between the impact metrics and the spread of
//! "no longer detected" counts.

use ndarray::Array2;

use super::calculator::SignatureImpact;

pub const METRIC_NAMES: &[&str] = &[
    "Indice_Diff",
    "Media_Differenza_Severity_min",
    "Media_Differenza_Severity_mean",
    "Media_Differenza_Severity_max",
    "N_Max_Sev_Diff_15",
    "N_Attacchi_Non_rilevati",
];

fn metrics(impact: &SignatureImpact) -> [f64; 6] {
    [
        impact.dissimilarity,
        impact.mean_delta_min,
        impact.mean_delta_mean,
        impact.mean_delta_max,
        impact.significant_max_drops as f64,
        impact.undetected_windows as f64,
    ]
}

/// Pearson correlation between every pair of metrics. Constant metrics give
/// NaN off the diagonal, like a spreadsheet would.
pub fn correlation_matrix(stats: &[SignatureImpact]) -> Array2<f64> {
    let n = METRIC_NAMES.len();
    let columns: Vec<Vec<f64>> = (0..n)
        .map(|m| stats.iter().map(|s| metrics(s)[m]).collect())
        .collect();

    Array2::from_shape_fn((n, n), |(i, j)| {
        if i == j {
            1.0
        } else {
            pearson(&columns[i], &columns[j])
        }
    })
}

pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return f64::NAN;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for k in 0..n {
        let dx = x[k] - mean_x;
        let dy = y[k] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Five-number summary with linear quantile interpolation
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Box-plot numbers for the undetected-window counts
pub fn undetected_distribution(stats: &[SignatureImpact]) -> Option<BoxStats> {
    let values: Vec<f64> = stats.iter().map(|s| s.undetected_windows as f64).collect();
    box_stats(&values)
}
