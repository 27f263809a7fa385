//! Observable engine state handed to renderers after every mutation.

use super::{Mode, Scoreboard};
use noughts_core::{Mark, Outcome};
use serde::{Deserialize, Serialize};

/// Result of a concluded round, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundResult {
    /// A mark completed a line.
    Win {
        /// The winning mark.
        winner: Mark,
        /// Indices of the completed line.
        line: [usize; 3],
    },
    /// Full board, no line.
    Draw,
}

impl RoundResult {
    /// Converts a terminal outcome; `None` while undecided.
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::Undecided => None,
            Outcome::Draw => Some(Self::Draw),
            Outcome::Win { mark, line } => Some(Self::Win {
                winner: mark,
                line: line.indices(),
            }),
        }
    }

    /// Returns true if `index` lies on the winning line.
    pub fn highlights(&self, index: usize) -> bool {
        matches!(self, Self::Win { line, .. } if line.contains(&index))
    }
}

/// Everything a renderer needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Marks in row-major order.
    pub board: [Option<Mark>; 9],
    /// Mark to move (the mover, once the round has a result).
    pub turn: Mark,
    /// Mark that opened this round.
    pub starter: Mark,
    /// Whether move requests are currently ignored.
    pub locked: bool,
    /// Current play mode.
    pub mode: Mode,
    /// Session scores.
    pub scores: Scoreboard,
    /// Result of the round, once concluded.
    pub result: Option<RoundResult>,
    /// Round generation.
    pub generation: u64,
}
