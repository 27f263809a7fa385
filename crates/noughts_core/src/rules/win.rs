//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the eight fixed winning triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line([Position; 3]);

impl Line {
    /// Positions on this line, in ascending index order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Cell indices on this line, in ascending index order.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Returns true if `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// Winning lines in evaluation order: rows, then columns, then diagonals.
pub const LINES: [Line; 8] = [
    // Rows
    Line([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Returns the mark on `line` if all three squares share it.
pub fn line_owner(board: &Board, line: &Line) -> Option<Mark> {
    let [a, b, c] = line.positions();
    let mark = board.get(a).mark()?;
    (board.get(b).mark() == Some(mark) && board.get(c).mark() == Some(mark)).then_some(mark)
}

/// Returns the first completed line in evaluation order together with its owner.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Mark, Line)> {
    LINES
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| (mark, *line)))
}

/// Checks if there is a winner on the board.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX/OO_/___".parse().expect("board");
        let (mark, line) = winning_line(&board).expect("win");
        assert_eq!(mark, Mark::X);
        assert_eq!(line.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "XXO/XO_/O__".parse().expect("board");
        let (mark, line) = winning_line(&board).expect("win");
        assert_eq!(mark, Mark::O);
        assert_eq!(line.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX_/O__/___".parse().expect("board");
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_double_line_reports_first_in_order() {
        // X completes the top row and the left column with one move at 0.
        let board: Board = "XXX/XOO/XOO".parse().expect("board");
        let (mark, line) = winning_line(&board).expect("win");
        assert_eq!(mark, Mark::X);
        assert_eq!(line.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_lines_cover_every_cell() {
        for pos in Position::ALL {
            assert!(LINES.iter().any(|line| line.contains(pos)));
        }
    }
}
