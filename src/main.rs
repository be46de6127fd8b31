//! Attack Lens - Main Entry Point
//!
//! Exploratory analysis of IDS alert exports against attack run logs:
//! labeling, attack-only signature sequences, per-signature impact and
//! training matrix export.

mod api;
mod error;
mod logic;
pub mod constants;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use api::commands::{self, Encoding};
use logic::config::AnalysisConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "attack-lens", version)]
#[command(about = "Exploratory analysis of IDS alerts correlated with attack windows")]
struct Args {
    /// JSON analysis config (missing keys use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Alert export and attack run log shared by most subcommands
#[derive(clap::Args, Debug)]
struct Inputs {
    /// Alert CSV export
    #[arg(long)]
    alerts: PathBuf,

    /// Attack run log CSV
    #[arg(long)]
    attacks: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge attack run logs into one CSV sorted by attack start
    Unify {
        /// Run logs to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the preprocessed alerts with their attack label
    Label {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print signature sequences that only occur during attacks
    Mine {
        #[command(flatten)]
        inputs: Inputs,

        /// Sequence lengths (comma-separated)
        #[arg(long, value_delimiter = ',')]
        lengths: Option<Vec<usize>>,

        /// Report patterns seen strictly more often than this
        #[arg(long)]
        min_frequency: Option<u64>,
    },

    /// Write per-attack window aggregates as JSONL
    Windows {
        #[command(flatten)]
        inputs: Inputs,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Simulate removing signatures from every attack window
    Impact {
        #[command(flatten)]
        inputs: Inputs,

        /// Only this signature (default: every signature seen during attacks)
        #[arg(long)]
        signature: Option<String>,

        /// Also write the stats table as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print correlation matrix and undetected-count spread
        #[arg(long)]
        summary: bool,
    },

    /// Value distributions in the attacks preceding attacks of a given severity
    Before {
        #[command(flatten)]
        inputs: Inputs,

        /// How many preceding attacks to pool
        #[arg(long, default_value = "3")]
        num_attacks: usize,

        /// Target mean severity (25-100)
        #[arg(long)]
        severity: f64,
    },

    /// Opening MITRE / signature sequences of attacks of a given severity
    Inside {
        #[command(flatten)]
        inputs: Inputs,

        /// Target mean severity (25-100)
        #[arg(long)]
        severity: f64,
    },

    /// Export an encoded (optionally scaled) training matrix
    Encode {
        /// Alert CSV export
        #[arg(long)]
        alerts: PathBuf,

        /// Attack run log; without it every row is labeled benign
        #[arg(long)]
        attacks: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "label")]
        encoding: Encoding,

        /// Standard-scale the feature columns
        #[arg(long)]
        scale: bool,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn load_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Command::Mine { lengths, min_frequency, .. } = &args.command {
        if let Some(lengths) = lengths {
            config.pattern_lengths = lengths.clone();
        }
        if let Some(min) = min_frequency {
            config.min_frequency = *min;
        }
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    log::debug!("{} v{}", constants::APP_NAME, constants::APP_VERSION);
    let config = load_config(&args)?;

    match &args.command {
        Command::Unify { inputs, output } => commands::unify(inputs, output),
        Command::Label { inputs, output } => {
            commands::label(&inputs.alerts, &inputs.attacks, output, &config)
        }
        Command::Mine { inputs, .. } => commands::mine(&inputs.alerts, &inputs.attacks, &config),
        Command::Windows { inputs, output } => {
            commands::windows(&inputs.alerts, &inputs.attacks, output, &config)
        }
        Command::Impact { inputs, signature, output, summary } => commands::impact(
            &inputs.alerts,
            &inputs.attacks,
            signature.as_deref(),
            output.as_deref(),
            *summary,
            &config,
        ),
        Command::Before { inputs, num_attacks, severity } => {
            commands::before(&inputs.alerts, &inputs.attacks, *num_attacks, *severity, &config)
        }
        Command::Inside { inputs, severity } => {
            commands::inside(&inputs.alerts, &inputs.attacks, *severity, &config)
        }
        Command::Encode { alerts, attacks, encoding, scale, output } => commands::encode(
            alerts,
            attacks.as_deref(),
            *encoding,
            *scale,
            output,
            &config,
        ),
    }
}
