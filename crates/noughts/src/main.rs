//! Noughts - command-line entry point.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use noughts::cli::{Cli, Command};
use noughts::script::{self, Step};
use noughts::{GameConfig, GameEngine, Mode, TracingObserver};
use noughts_core::{best_move, Board, Mark};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Play { mode, log_file } => run_play(with_mode(config, mode), log_file).await,
        Command::Script {
            steps,
            mode,
            manual_timers,
            pretty,
        } => run_script(with_mode(config, mode), &steps, manual_timers, pretty),
        Command::Solve { board, mark } => run_solve(&board, mark),
    }
}

fn with_mode(config: GameConfig, mode: Option<Mode>) -> GameConfig {
    match mode {
        Some(mode) => config.with_mode(mode),
        None => config,
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the terminal UI
async fn run_play(config: GameConfig, log_file: PathBuf) -> Result<()> {
    noughts::tui::run_tui(config, &log_file).await
}

/// Run steps headlessly and print one JSON report per step
#[instrument(skip(config, steps))]
fn run_script(config: GameConfig, steps: &[String], manual_timers: bool, pretty: bool) -> Result<()> {
    init_stderr_logging();

    let steps = steps
        .iter()
        .map(|s| s.parse::<Step>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid script")?;

    let mut engine = GameEngine::new(config);
    engine.add_observer(Box::new(TracingObserver));

    let reports = script::run(&mut engine, &steps, !manual_timers);
    info!(steps = reports.len(), "Script finished");

    let json = if pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{}", json);
    Ok(())
}

/// Print the oracle's reply for a board
#[instrument]
fn run_solve(board: &str, mark: Mark) -> Result<()> {
    init_stderr_logging();

    let board: Board = board.parse().context("Invalid board")?;
    match best_move(&board, mark) {
        Some(scored) => {
            println!("{}", board.display());
            println!(
                "{} plays {} (index {}), score {} in {} plies, {} nodes",
                mark,
                scored.position,
                scored.position.to_index(),
                scored.score,
                scored.plies,
                scored.nodes
            );
        }
        None => println!("Board is already decided"),
    }
    Ok(())
}
