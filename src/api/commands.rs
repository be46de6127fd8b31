//! CLI Commands - one function per subcommand
//!
//! Reports go to stdout, diagnostics through the logger.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::{NO_ATTACKS_IN_RANGE_MESSAGE, NO_ATTACKS_MESSAGE};
use crate::logic::analyzer::{before_attack, inside_attack};
use crate::logic::config::AnalysisConfig;
use crate::logic::dataset::export::unify_attack_logs;
use crate::logic::dataset::reader::{read_attack_log, read_table};
use crate::logic::dataset::writer::{write_jsonl, write_records, write_table};
use crate::logic::dataset::{AttackInterval, Event, WindowAggregate};
use crate::logic::impact::summary::{correlation_matrix, undetected_distribution, METRIC_NAMES};
use crate::logic::impact::{attack_signatures, signature_impact, signature_stats, SignatureImpact};
use crate::logic::labeler::label_events;
use crate::logic::patterns::mine as mine_patterns;
use crate::logic::preprocess::{
    events_from_table, label_encode, one_hot_encode, preprocess_alerts, EncodedMatrix,
    StandardScaler,
};
use crate::logic::windows::build_window_aggregates;

// ============================================================================
// SHARED LOADING
// ============================================================================

/// Alert export + run log -> labeled, time-ordered events
fn load_labeled(
    alerts: &Path,
    attacks: &Path,
    config: &AnalysisConfig,
) -> Result<(Vec<Event>, Vec<AttackInterval>)> {
    let table = preprocess_alerts(read_table(alerts), config);
    let events = events_from_table(&table)
        .with_context(|| format!("building events from {}", alerts.display()))?;
    let intervals = read_attack_log(attacks)
        .with_context(|| format!("reading attack log {}", attacks.display()))?;
    Ok((label_events(&events, &intervals), intervals))
}

fn load_windows(alerts: &Path, attacks: &Path, config: &AnalysisConfig) -> Result<(Vec<Event>, Vec<WindowAggregate>)> {
    let (events, intervals) = load_labeled(alerts, attacks, config)?;
    let windows = build_window_aggregates(&events, &intervals);
    Ok((events, windows))
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn unify(inputs: &[PathBuf], output: &Path) -> Result<()> {
    let count = unify_attack_logs(inputs, output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("{} attacks written to {}", count, output.display());
    Ok(())
}

pub fn label(alerts: &Path, attacks: &Path, output: &Path, config: &AnalysisConfig) -> Result<()> {
    let (events, _) = load_labeled(alerts, attacks, config)?;
    let count = write_records(output, &events)
        .with_context(|| format!("writing {}", output.display()))?;
    let attack_rows = events.iter().filter(|e| e.is_attack).count();
    println!(
        "{} events written to {} ({} during attacks)",
        count,
        output.display(),
        attack_rows
    );
    Ok(())
}

pub fn mine(alerts: &Path, attacks: &Path, config: &AnalysisConfig) -> Result<()> {
    let (events, _) = load_labeled(alerts, attacks, config)?;
    let patterns = mine_patterns(&events, &config.pattern_lengths, config.min_frequency);
    if patterns.is_empty() {
        log::info!("No attack-only pattern above frequency {}", config.min_frequency);
    }
    for pattern in &patterns {
        println!("{}", pattern);
    }
    Ok(())
}

pub fn windows(alerts: &Path, attacks: &Path, output: &Path, config: &AnalysisConfig) -> Result<()> {
    let (_, windows) = load_windows(alerts, attacks, config)?;
    if windows.is_empty() {
        println!("{}", NO_ATTACKS_MESSAGE);
        return Ok(());
    }
    let count = write_jsonl(output, &windows)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("{} attack windows written to {}", count, output.display());
    Ok(())
}

pub fn impact(
    alerts: &Path,
    attacks: &Path,
    signature: Option<&str>,
    output: Option<&Path>,
    summary: bool,
    config: &AnalysisConfig,
) -> Result<()> {
    let (events, windows) = load_windows(alerts, attacks, config)?;

    let stats: Vec<SignatureImpact> = match signature {
        Some(sig) if !windows.is_empty() => {
            vec![signature_impact(&windows, sig, config.max_drop_threshold)]
        }
        Some(_) => Vec::new(),
        None => signature_stats(&windows, &attack_signatures(&events), config.max_drop_threshold),
    };

    if stats.is_empty() {
        println!("{}", NO_ATTACKS_MESSAGE);
        return Ok(());
    }

    print_impact_table(&stats);
    if let Some(path) = output {
        write_records(path, &stats).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Signature stats written to {}", path.display());
    }
    if summary {
        print_impact_summary(&stats);
    }
    Ok(())
}

pub fn before(
    alerts: &Path,
    attacks: &Path,
    num_attacks: usize,
    severity_value: f64,
    config: &AnalysisConfig,
) -> Result<()> {
    config.check_severity_value(severity_value)?;
    let (_, windows) = load_windows(alerts, attacks, config)?;
    let report = before_attack(&windows, num_attacks, severity_value, config)?;
    if report.distributions.is_empty() {
        println!("{}", NO_ATTACKS_IN_RANGE_MESSAGE);
    }
    print!("{}", report);
    Ok(())
}

pub fn inside(alerts: &Path, attacks: &Path, severity_value: f64, config: &AnalysisConfig) -> Result<()> {
    config.check_severity_value(severity_value)?;
    let (_, windows) = load_windows(alerts, attacks, config)?;
    if windows.is_empty() {
        println!("{}", NO_ATTACKS_IN_RANGE_MESSAGE);
        return Ok(());
    }
    let report = inside_attack(&windows, severity_value, config)?;
    print!("{}", report);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Encoding {
    /// One integer column per categorical field
    Label,
    /// One indicator column per (field, value)
    OneHot,
}

pub fn encode(
    alerts: &Path,
    attacks: Option<&Path>,
    encoding: Encoding,
    scale: bool,
    output: &Path,
    config: &AnalysisConfig,
) -> Result<()> {
    let events = match attacks {
        Some(attacks) => load_labeled(alerts, attacks, config)?.0,
        None => {
            let table = preprocess_alerts(read_table(alerts), config);
            events_from_table(&table)?
        }
    };

    let mut matrix: EncodedMatrix = match encoding {
        Encoding::Label => label_encode(&events)?,
        Encoding::OneHot => one_hot_encode(&events)?,
    };

    if scale {
        let (scaler, scaled) = StandardScaler::fit_transform(&matrix.values)?;
        log::debug!("Scaler means: {:?}", scaler.mean);
        matrix.values = scaled;
    }

    write_table(output, &matrix.to_table()).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "{} rows x {} features written to {}",
        matrix.values.nrows(),
        matrix.values.ncols(),
        output.display()
    );
    Ok(())
}

// ============================================================================
// PRINTING
// ============================================================================

fn print_impact_table(stats: &[SignatureImpact]) {
    println!(
        "{:<60} {:>10} {:>10} {:>10} {:>10} {:>6} {:>6}",
        "signature", "diff", "d_min", "d_mean", "d_max", ">=15", "lost"
    );
    for s in stats {
        println!(
            "{:<60} {:>10.4} {:>10.2} {:>10.2} {:>10.2} {:>6} {:>6}",
            s.signature,
            s.dissimilarity,
            s.mean_delta_min,
            s.mean_delta_mean,
            s.mean_delta_max,
            s.significant_max_drops,
            s.undetected_windows
        );
    }
}

fn print_impact_summary(stats: &[SignatureImpact]) {
    let corr = correlation_matrix(stats);
    println!();
    println!("Correlazioni tra le metriche:");
    for (i, name) in METRIC_NAMES.iter().enumerate() {
        let row: Vec<String> = corr.row(i).iter().map(|v| format!("{:>6.2}", v)).collect();
        println!("{:<32} {}", name, row.join(" "));
    }

    if let Some(dist) = undetected_distribution(stats) {
        println!();
        println!(
            "Distribuzione di N_Attacchi_Non_rilevati: min {} q1 {} median {} q3 {} max {}",
            dist.min, dist.q1, dist.median, dist.q3, dist.max
        );
    }
}
