//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are separated from board storage
//! so the engine, the invariants and the search all share one definition.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, line_owner, winning_line, Line, LINES};

use crate::{Board, Outcome};

/// Evaluates the board.
///
/// The first completed line in [`LINES`] order wins; otherwise a full board
/// is a draw; otherwise the round is undecided.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = winning_line(board) {
        Outcome::Win { mark, line }
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    #[test]
    fn test_evaluate_variants() {
        assert_eq!(evaluate(&Board::new()), Outcome::Undecided);

        let drawn: Board = "XOX/XOO/OXX".parse().expect("board");
        assert_eq!(evaluate(&drawn), Outcome::Draw);

        let won: Board = "O__/XO_/X_O".parse().expect("board");
        match evaluate(&won) {
            Outcome::Win { mark, line } => {
                assert_eq!(mark, Mark::O);
                assert_eq!(line.indices(), [0, 4, 8]);
            }
            other => panic!("expected win, got {:?}", other),
        }
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board: Board = "XOX/OXO/OXX".parse().expect("board");
        assert!(matches!(evaluate(&board), Outcome::Win { mark: Mark::X, .. }));
    }
}
