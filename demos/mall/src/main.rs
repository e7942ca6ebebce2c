//! mall — run the dwellers simulation from the command line.
//!
//! Picks a starting layout (file, preset, or seeded random), runs it once
//! with full output, validates the log by replay, and optionally repeats the
//! run to shake out different interleavings.
//!
//! ```text
//! mall --preset checker --strategy ordered --runs 200
//! mall --layout demos/mall/layouts/ring.txt --out ./output --json
//! RUST_LOG=md_sim=trace mall --random 7 --density 0.6
//! ```

mod presets;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use md_core::{EventLog, Layout};
use md_grid::{LockCoordinator, LockStrategy};
use md_output::{CsvWriter, EventOutputObserver};
use md_sim::{Mall, MallBuilder, NoopObserver, run_batch, validate_replay};

use presets::Preset;

#[derive(Parser, Debug)]
#[command(name = "mall", about = "Concurrent mall dwellers on a 4x4 torus")]
struct Cli {
    /// Layout file: four rows of 'X' (occupied) and '-' (empty).
    #[arg(long, conflicts_with_all = ["preset", "random"])]
    layout: Option<PathBuf>,

    /// Built-in layout.
    #[arg(long, value_enum, conflicts_with = "random")]
    preset: Option<Preset>,

    /// Seed for a random layout.
    #[arg(long)]
    random: Option<u64>,

    /// Occupancy probability for --random.
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Lock coordinator: gated or ordered.
    #[arg(long, default_value_t = LockStrategy::Gated)]
    strategy: LockStrategy,

    /// Total number of runs; every run is replay-validated.
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Write events.csv and dwellers.csv for the first run here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the first run's event log as JSON.
    #[arg(long)]
    json: bool,

    /// Debug-level logging (ignored when RUST_LOG is set).
    #[arg(short, long)]
    verbose: bool,
}

fn load_layout(cli: &Cli) -> Result<Layout> {
    if let Some(path) = &cli.layout {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        return Layout::parse(&text).with_context(|| format!("parsing layout {}", path.display()));
    }
    if let Some(seed) = cli.random {
        return Ok(Layout::random(seed, cli.density));
    }
    Ok(cli.preset.unwrap_or(Preset::Checker).layout())
}

fn run_first(mall: &Mall<Box<dyn LockCoordinator>>, out: Option<&PathBuf>) -> Result<EventLog> {
    let Some(dir) = out else {
        return Ok(mall.run(&mut NoopObserver)?);
    };
    let writer = CsvWriter::new(dir).with_context(|| format!("opening output in {}", dir.display()))?;
    let mut obs = EventOutputObserver::new(writer);
    let log = mall.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing CSV output");
    }
    info!(dir = %dir.display(), "wrote events.csv and dwellers.csv");
    Ok(log)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let layout = load_layout(&cli)?;
    println!("=== mall — {} dwellers, {} coordinator ===", layout.occupied_count(), cli.strategy);
    println!("{layout}\n");

    let mall = MallBuilder::new().layout(layout).strategy(cli.strategy).build()?;

    let t0 = Instant::now();
    let log = run_first(&mall, cli.out.as_ref())?;
    let summary = validate_replay(&layout, &log).context("first run failed replay")?;
    println!(
        "Run 1: {} events in {:.2?} — {} moves, {} stuck, {} exhausted",
        log.len(),
        t0.elapsed(),
        summary.moves,
        summary.stuck,
        summary.exhausted,
    );

    println!("\n{:<8} {:<8} {:<8} {:>6}  outcome", "dweller", "start", "final", "moves");
    for s in log.summaries() {
        println!(
            "{:<8} {:<8} {:<8} {:>6}  {}",
            s.dweller.0,
            s.start.to_string(),
            s.position.to_string(),
            s.moves,
            s.outcome
        );
    }

    if cli.json {
        println!("\n{}", serde_json::to_string_pretty(&log)?);
    }

    if cli.runs > 1 {
        let repeats = vec![layout; cli.runs - 1];
        let strategy = cli.strategy;
        let t1 = Instant::now();
        let results = run_batch(&repeats, || strategy.coordinator());

        let mut failures = 0usize;
        for (i, result) in results.into_iter().enumerate() {
            let run = i + 2;
            match result.map_err(anyhow::Error::from).and_then(|log| {
                validate_replay(&layout, &log).map_err(anyhow::Error::from)
            }) {
                Ok(_) => {}
                Err(e) => {
                    warn!(run, error = %e, "run failed");
                    failures += 1;
                }
            }
        }
        println!(
            "\nRepeated {} runs in {:.2?}: {} failed replay",
            cli.runs - 1,
            t1.elapsed(),
            failures
        );
        if failures > 0 {
            bail!("{failures} of {} runs produced an invalid log", cli.runs);
        }
    }

    Ok(())
}
