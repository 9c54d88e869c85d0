//! perpadvisor CLI
//!
//! Reads a market snapshot (candles, optional open position, benchmark and
//! trend candles, market context) from a JSON file, evaluates it and prints
//! the evaluation as JSON on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use perpadvisor::config::{get_environment, EngineConfig};
use perpadvisor::logging;
use perpadvisor::models::MarketSnapshot;
use perpadvisor::SignalEngine;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "perpadvisor",
    version,
    about = "Score a market snapshot and print a trading recommendation"
)]
struct Cli {
    /// Snapshot JSON file
    snapshot: PathBuf,

    /// Engine config JSON file; takes precedence over PERPADVISOR_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretty-print the evaluation
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    info!(environment = %get_environment(), "Starting perpadvisor");

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::load()?,
    };

    let raw = std::fs::read_to_string(&cli.snapshot)
        .with_context(|| format!("failed to read snapshot {}", cli.snapshot.display()))?;
    let snapshot: MarketSnapshot =
        serde_json::from_str(&raw).context("failed to parse snapshot")?;

    let engine = SignalEngine::new(config)?;
    let evaluation = engine.evaluate(&snapshot)?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&evaluation)?
    } else {
        serde_json::to_string(&evaluation)?
    };
    println!("{}", output);

    info!(
        action = %evaluation.recommendation.action,
        "Evaluation complete"
    );
    Ok(())
}
