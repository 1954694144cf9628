//! `bpnet`: train a network on a training-record file, or generate one.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use rust_bpnet::{NetBuilder, NetConfig, Pattern, RunReport, TrainingData};

#[derive(Parser)]
#[command(name = "bpnet")]
#[command(about = "Online backpropagation with momentum on small dense networks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a fresh network on a training-record file
    Train {
        /// Training records (`topology:` line followed by `in:`/`out:` pairs)
        #[arg(short, long)]
        data: PathBuf,

        /// Write the per-pass run log here
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Write the run log as JSON instead of text
        #[arg(long, requires = "report")]
        json: bool,

        /// Seed for weight initialization
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Learning rate
        #[arg(long, default_value = "0.15")]
        eta: f64,

        /// Momentum coefficient
        #[arg(long, default_value = "0.5")]
        alpha: f64,
    },

    /// Generate a logic-gate training-record file
    Generate {
        /// Gate to generate examples for
        #[arg(short, long, value_enum)]
        pattern: Pattern,

        /// Number of examples
        #[arg(short, long, default_value = "3000")]
        count: usize,

        /// Seed for the example sampler
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match cli.command {
        Commands::Train {
            data,
            report,
            json,
            seed,
            eta,
            alpha,
        } => train(data, report, json, seed, NetConfig::new(eta, alpha)?),
        Commands::Generate {
            pattern,
            count,
            seed,
            out,
        } => generate(pattern, count, seed, out),
    }
}

fn train(
    data: PathBuf,
    report_path: Option<PathBuf>,
    json: bool,
    seed: u64,
    config: NetConfig,
) -> Result<()> {
    let records = TrainingData::open(&data)
        .with_context(|| format!("failed to load training data from {}", data.display()))?;
    info!(
        topology = ?records.topology(),
        samples = records.len(),
        "loaded training data"
    );

    let mut net = NetBuilder::new(records.topology())
        .config(config)
        .build_with_seed(seed)?;

    let mut report = report_path.as_ref().map(|_| RunReport::new());
    let summary = net.fit(records.samples(), report.as_mut())?;

    info!(
        passes = summary.passes,
        final_error = summary.final_error,
        recent_average_error = summary.recent_average_error,
        "done"
    );

    if let (Some(path), Some(report)) = (report_path, report) {
        let saved = if json {
            report.save_json(&path)
        } else {
            report.save(&path)
        };
        saved.with_context(|| format!("failed to write run log to {}", path.display()))?;
        info!(path = %path.display(), "run log saved");
    }

    Ok(())
}

fn generate(pattern: Pattern, count: usize, seed: u64, out: PathBuf) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = pattern.generate(count, &mut rng);

    fs::write(&out, data.to_string())
        .with_context(|| format!("failed to write training data to {}", out.display()))?;
    info!(?pattern, count, path = %out.display(), "training data written");

    Ok(())
}
