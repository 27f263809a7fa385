//! Command-line interface for noughts.

use crate::engine::Mode;
use clap::{Parser, Subcommand};
use noughts_core::Mark;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a friend or an unbeatable computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe with an unbeatable minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $NOUGHTS_CONFIG, then defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Starting mode (two-player or vs-computer)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Log file for the TUI session
        #[arg(long, default_value = "noughts_tui.log")]
        log_file: PathBuf,
    },

    /// Run a list of steps headlessly and print a JSON snapshot per step
    ///
    /// Steps: 0-8 move, u undo, n new round, r reset, s swap starter,
    /// m:<mode> switch mode, t fire pending timers.
    Script {
        /// Steps to run, in order
        #[arg(required = true)]
        steps: Vec<String>,

        /// Starting mode (two-player or vs-computer)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Only fire timers at explicit `t` steps
        #[arg(long)]
        manual_timers: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the oracle's move for a board
    Solve {
        /// Nine cells in row-major order, e.g. "XX_/OO_/___"
        board: String,

        /// Mark to move
        #[arg(long, default_value = "O")]
        mark: Mark,
    },
}
