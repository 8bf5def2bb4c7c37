#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs cleaning simulations and exports their history.

mod config;
mod logging;
mod map_transfer;
mod session;
mod store;

use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cleaning_robot_core::ModelKind;
use tracing::info;

use crate::{
    config::Settings,
    session::{SessionOptions, SimulationRequest},
    store::HistoryStore,
};

#[derive(Debug, Parser)]
#[command(
    name = "cleaning-robot",
    version,
    about = "Simulates a cleaning robot on a grid map"
)]
struct Cli {
    /// Configuration file; defaults to `cleaning-robot.toml` when present.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// History file overriding the configured location.
    #[arg(long, global = true, value_name = "PATH")]
    history: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a command list on a map and print the JSON response.
    Clean {
        /// Map file in `.json` or `.txt` format.
        #[arg(long, value_name = "FILE")]
        map: PathBuf,
        /// JSON request with `start_pos` and `commands`.
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
        /// Robot model; `premium` selects the premium model, anything else base.
        #[arg(long)]
        model: Option<String>,
        /// Seed for the premium dirt sensor.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export every stored session as CSV.
    History {
        /// Destination file; standard output when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Entry point for the cleaning robot command-line interface.
fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    let store = HistoryStore::new(cli.history.unwrap_or(settings.history_path));

    match cli.command {
        Command::Clean {
            map,
            request,
            model,
            seed,
        } => {
            let options = SessionOptions {
                model: model
                    .as_deref()
                    .map_or(settings.default_model, ModelKind::from_tag),
                seed: seed.or(settings.seed),
                max_total_steps: settings.max_total_steps,
            };
            clean(&store, &map, &request, options)
        }
        Command::History { output } => export_history(&store, output),
    }
}

fn clean(
    store: &HistoryStore,
    map: &Path,
    request: &Path,
    options: SessionOptions,
) -> Result<()> {
    let grid = map_transfer::load_map(map)
        .with_context(|| format!("failed to load map {}", map.display()))?;
    info!(
        width = grid.width(),
        height = grid.height(),
        walkable = grid.walkable_tiles(),
        "loaded map"
    );
    let request = SimulationRequest::from_path(request)?;

    let outcome = session::run(&grid, &request, options)?;
    let payload =
        serde_json::to_string_pretty(&outcome.response).context("failed to encode response")?;

    let record = store.append(outcome.summary)?;
    info!(id = record.id, "recorded session");

    println!("{payload}");
    Ok(())
}

fn export_history(store: &HistoryStore, output: Option<PathBuf>) -> Result<()> {
    let history = store.load()?;
    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            history
                .export_csv(BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(records = history.len(), path = %path.display(), "exported history");
        }
        None => history
            .export_csv(io::stdout().lock())
            .context("failed to write history to stdout")?,
    }
    Ok(())
}
