//! Monotonic board invariant: the board is exactly the replay of its history.

use super::Invariant;
use crate::{Board, Round, Square};

/// Invariant: every occupied square has exactly one history entry.
///
/// Replaying history onto an empty board never overwrites a square and
/// reproduces the current board, so the number of occupied squares always
/// equals the number of moves made.
pub struct MonotonicBoardInvariant;

impl Invariant<Round> for MonotonicBoardInvariant {
    fn holds(round: &Round) -> bool {
        let mut reconstructed = Board::new();

        for mov in round.history() {
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.mark));
        }

        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board matches the replay of its move history"
    }
}
