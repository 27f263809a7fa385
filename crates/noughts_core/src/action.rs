//! Moves and the reasons a move request is turned away.

use crate::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A mark placed at a position, recorded in round history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move or undo request was ignored.
///
/// Rejections leave all state untouched; callers are free to drop them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The index is outside 0-8.
    #[display("Position {} is out of range (must be 0-8)", _0)]
    OutOfRange(#[error(not(source))] usize),

    /// The square is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// Input is locked while the computer thinks or a result is shown.
    #[display("Input is locked")]
    Locked,

    /// The round already has a result.
    #[display("Round is already over")]
    RoundOver,

    /// Undo is only available in two-player mode.
    #[display("Undo is only available in two-player mode")]
    UndoUnavailable,

    /// Nothing to undo.
    #[display("No moves to undo")]
    NothingToUndo,
}
