//! Headless runner for the lensing simulator.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lensim::{Display, MoveInput, NullDisplay, PngSnapshots, RunRecorder, SimConfig, Simulation};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Headless driver: runs a fixed number of ticks and optionally dumps
/// frames and per-tick statistics.
#[derive(Parser, Debug)]
struct Args {
    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// JSON configuration file, defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for PNG frame snapshots
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Save every n-th frame
    #[arg(long, default_value_t = 36)]
    snapshot_every: u64,

    /// CSV file for per-tick statistics
    #[arg(long)]
    log_csv: Option<PathBuf>,

    /// Constant camera input applied every tick along z (-1, 0 or 1)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    dolly: i8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };
    let seed = config.seed;

    let mut sim = Simulation::new(config)?;
    let mut display: Box<dyn Display> = match &args.snapshot_dir {
        Some(dir) => Box::new(PngSnapshots::new(dir, args.snapshot_every)?),
        None => Box::new(NullDisplay),
    };
    let mut recorder = args
        .log_csv
        .as_ref()
        .map(|path| RunRecorder::create(path, seed))
        .transpose()?;
    let input = MoveInput::new(0, 0, args.dolly);

    let pb = ProgressBar::new(args.ticks);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)?
            .progress_chars("#>-"),
    );

    let mut peak_active = 0;
    let mut last = None;
    for _ in 0..args.ticks {
        let stats = sim.step(input, display.as_mut())?;
        if let Some(rec) = recorder.as_mut() {
            rec.record(&stats)?;
        }
        peak_active = peak_active.max(stats.active);
        pb.set_message(format!("rays {}", stats.active));
        pb.inc(1);
        last = Some(stats);
    }
    pb.finish_with_message("Simulation complete");

    if let Some(rec) = recorder {
        rec.finish()?;
    }
    if let Some(stats) = last {
        info!(peak_active, "{stats}");
    }
    Ok(())
}
