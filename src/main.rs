//! Trapsim - Entry Point
//!
//! Runs one batch of the tick detection simulation and prints a summary or
//! the full output tables as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use trapsim::core::config::SimulationConfig;
use trapsim::core::error::Result;
use trapsim::simulation::simulate;

/// Simulate warm- and cold-history tick detections over elapsed days
#[derive(Parser, Debug)]
#[command(name = "trapsim")]
#[command(about = "Simulate trap detections of ticks with warm or cold thermal histories")]
struct Args {
    /// TOML config file; missing keys use built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of replicates (overrides the config file)
    #[arg(long, short = 'n')]
    replicates: Option<usize>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output here instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(n) = args.replicates {
        config.replicates = n;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let output = simulate(&config)?;

    let rendered = match args.format {
        Format::Text => output.summary(),
        Format::Json => output.to_json()?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            tracing::info!("Output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
