//! Move oracle: full-depth minimax with alpha-beta pruning.
//!
//! The state space is small enough to search every line to a terminal board on
//! every call. The reported score carries only the result (+10 / 0 / -10).
//! Internally each terminal board is also valued by its distance from the
//! root, so among moves with the same result the oracle picks the fastest win
//! or the slowest loss.

use crate::rules::evaluate;
use crate::{Board, Mark, Outcome, Position, Square};
use tracing::{debug, instrument};

/// Score of a board won by the searching mark.
pub const WIN_SCORE: i32 = 10;
/// Score of a board lost by the searching mark.
pub const LOSS_SCORE: i32 = -10;
/// Score of a drawn board.
pub const DRAW_SCORE: i32 = 0;

/// Internal value of a win at the root; each ply of distance costs one.
const WIN_VALUE: i32 = 100;

/// Chooses moves for a computer-controlled mark.
pub trait Strategy: Send + Sync {
    /// Picks a move for `mark` on `board`.
    ///
    /// Returns `None` when the board is terminal; callers must not ask in that
    /// state.
    fn choose(&self, board: &Board, mark: Mark) -> Option<Position>;

    /// Display name for logs and the UI.
    fn name(&self) -> &str;
}

/// The unbeatable opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl Strategy for Minimax {
    fn choose(&self, board: &Board, mark: Mark) -> Option<Position> {
        best_move(board, mark).map(|scored| scored.position)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

/// A move together with its minimax value and the work spent finding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    /// The chosen position.
    pub position: Position,
    /// Minimax result from the mover's point of view: [`WIN_SCORE`],
    /// [`DRAW_SCORE`] or [`LOSS_SCORE`].
    pub score: i32,
    /// Plies until a decisive result under best play from both sides; zero for a draw.
    pub plies: u32,
    /// Nodes visited during the search.
    pub nodes: u64,
}

/// Computes a game-theoretically optimal move for `mark`.
///
/// Every empty square is tried in index order and scored by searching the
/// opponent's reply subtree. Squares are ranked by result, then by distance:
/// a quicker win beats a slower one and a slower loss beats a quicker one,
/// so a lost position still blocks an immediate threat. Remaining ties go to
/// the lowest index. The caller's board is not
/// touched: the search runs on a private copy and reverts every hypothetical
/// placement before returning.
///
/// Returns `None` if the board is already terminal.
#[instrument(skip(board), fields(board = %board.display().replace('\n', " ")))]
pub fn best_move(board: &Board, mark: Mark) -> Option<ScoredMove> {
    if evaluate(board).is_terminal() {
        debug!("Oracle asked to move on a terminal board");
        return None;
    }

    let mut search = Search {
        board: *board,
        me: mark,
        nodes: 0,
    };
    let mut best: Option<(Position, i32)> = None;

    for pos in Position::ALL {
        if !search.board.is_empty(pos) {
            continue;
        }
        search.board.set(pos, Square::Occupied(mark));
        let value = search.minimax(false, 1, i32::MIN, i32::MAX);
        search.board.set(pos, Square::Empty);

        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((pos, value));
        }
    }

    debug_assert_eq!(search.board, *board, "search must restore the board");

    best.map(|(position, value)| {
        let score = score_of(value);
        let plies = plies_of(value);
        debug!(position = %position, score, plies, nodes = search.nodes, "Oracle chose move");
        ScoredMove {
            position,
            score,
            plies,
            nodes: search.nodes,
        }
    })
}

/// Maps an internal value to the reported result score.
fn score_of(value: i32) -> i32 {
    match value.signum() {
        1 => WIN_SCORE,
        -1 => LOSS_SCORE,
        _ => DRAW_SCORE,
    }
}

/// Recovers the distance to a decisive result; zero for a draw.
fn plies_of(value: i32) -> u32 {
    if value == 0 {
        0
    } else {
        (WIN_VALUE - value.abs()).unsigned_abs()
    }
}

/// Scratch state for one search.
struct Search {
    board: Board,
    me: Mark,
    nodes: u64,
}

impl Search {
    /// Values a terminal board `depth` plies below the root from `me`'s point of view.
    fn terminal_value(&self, outcome: Outcome, depth: i32) -> Option<i32> {
        match outcome {
            Outcome::Undecided => None,
            Outcome::Draw => Some(0),
            Outcome::Win { mark, .. } if mark == self.me => Some(WIN_VALUE - depth),
            Outcome::Win { .. } => Some(depth - WIN_VALUE),
        }
    }

    /// Minimax value of the current board with `me` maximizing.
    fn minimax(&mut self, maximizing: bool, depth: i32, mut alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        if let Some(value) = self.terminal_value(evaluate(&self.board), depth) {
            return value;
        }

        let mover = if maximizing { self.me } else { self.me.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for pos in Position::ALL {
            if !self.board.is_empty(pos) {
                continue;
            }
            self.board.set(pos, Square::Occupied(mover));
            let value = self.minimax(!maximizing, depth + 1, alpha, beta);
            self.board.set(pos, Square::Empty);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Full minimax value of `board` for `mark` to move, without pruning.
///
/// Reference for tests of the pruned search.
#[cfg(test)]
fn plain_minimax(board: &mut Board, me: Mark, to_move: Mark, depth: i32) -> i32 {
    match evaluate(board) {
        Outcome::Draw => return 0,
        Outcome::Win { mark, .. } if mark == me => return WIN_VALUE - depth,
        Outcome::Win { .. } => return depth - WIN_VALUE,
        Outcome::Undecided => {}
    }
    let mut values = Vec::new();
    for pos in Position::valid_moves(board) {
        board.set(pos, Square::Occupied(to_move));
        values.push(plain_minimax(board, me, to_move.opponent(), depth + 1));
        board.set(pos, Square::Empty);
    }
    if to_move == me {
        values.into_iter().max().unwrap_or(0)
    } else {
        values.into_iter().min().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::winning_line;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn test_takes_immediate_win() {
        let scored = best_move(&board("XX_/OO_/X__"), Mark::O).expect("move");
        assert_eq!(scored.position, Position::MiddleRight);
        assert_eq!(scored.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_diagonal_threat_in_lost_position() {
        // Every reply loses to a fork, but only 8 stops the win on the next ply.
        let scored = best_move(&board("X__/_X_/___"), Mark::O).expect("move");
        assert_eq!(scored.position, Position::BottomRight);
        assert_eq!(scored.score, LOSS_SCORE);
        assert_eq!(scored.plies, 4);
    }

    #[test]
    fn test_prefers_immediate_win_over_fork() {
        // Index 2 blocks X and forks 5/6; index 5 wins at once. Both score +10.
        let scored = best_move(&board("XX_/OO_/___"), Mark::O).expect("move");
        assert_eq!(scored.position, Position::MiddleRight);
        assert_eq!(scored.score, WIN_SCORE);
        assert_eq!(scored.plies, 1);
    }

    #[test]
    fn test_never_allows_win_on_next_ply_when_avoidable() {
        for s in ["X__/_X_/___", "XO_/_X_/___", "___/XX_/O__", "X_X/_O_/___"] {
            let start = board(s);
            let reply = best_move(&start, Mark::O).expect("move");
            let mut after = start;
            after.set(reply.position, Square::Occupied(Mark::O));
            let threats = Position::valid_moves(&after).into_iter().filter(|&pos| {
                let mut next = after;
                next.set(pos, Square::Occupied(Mark::X));
                winning_line(&next).is_some()
            });
            assert_eq!(threats.count(), 0, "board {} reply {}", s, reply.position.to_index());
        }
    }

    #[test]
    fn test_searching_for_x_mirrors_o() {
        let scored = best_move(&board("OO_/XX_/___"), Mark::X).expect("move");
        assert_eq!(scored.score, WIN_SCORE);
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        assert_eq!(best_move(&board("XXX/OO_/___"), Mark::O), None);
        assert_eq!(best_move(&board("XOX/OXX/OXO"), Mark::O), None);
    }

    #[test]
    fn test_board_left_untouched() {
        let original = board("X__/_O_/__X");
        let copy = original;
        best_move(&original, Mark::O);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let scored = best_move(&Board::new(), Mark::O).expect("move");
        assert_eq!(scored.score, DRAW_SCORE);
        assert_eq!(scored.plies, 0);
        assert_eq!(scored.position, Position::TopLeft);
    }

    #[test]
    fn test_pruned_scores_match_plain_minimax() {
        for s in ["X________", "____X____", "X___O___X", "XO__X____", "_X__O__X_"] {
            let start = board(s);
            let mut reference = start;
            for pos in Position::valid_moves(&start) {
                reference.set(pos, Square::Occupied(Mark::O));
                let expected = plain_minimax(&mut reference, Mark::O, Mark::X, 1);
                reference.set(pos, Square::Empty);

                let mut search = Search {
                    board: start,
                    me: Mark::O,
                    nodes: 0,
                };
                search.board.set(pos, Square::Occupied(Mark::O));
                let pruned = search.minimax(false, 1, i32::MIN, i32::MAX);
                assert_eq!(pruned, expected, "board {} move {}", s, pos.to_index());
            }
        }
    }

    /// Plays every X line against the oracle and fails if X ever completes a line.
    fn explore(board: &mut Board) {
        if winning_line(board).is_some() || evaluate(board).is_terminal() {
            return;
        }
        for pos in Position::valid_moves(board) {
            board.set(pos, Square::Occupied(Mark::X));
            match evaluate(board) {
                Outcome::Win { mark, .. } => {
                    assert_eq!(mark, Mark::O, "oracle lost:\n{}", board.display());
                }
                Outcome::Draw => {}
                Outcome::Undecided => {
                    let reply = best_move(board, Mark::O).expect("non-terminal");
                    board.set(reply.position, Square::Occupied(Mark::O));
                    explore(board);
                    board.set(reply.position, Square::Empty);
                }
            }
            board.set(pos, Square::Empty);
        }
    }

    #[test]
    fn test_never_loses_when_x_opens() {
        explore(&mut Board::new());
    }

    #[test]
    fn test_never_loses_when_o_opens() {
        let mut board = Board::new();
        let opening = best_move(&board, Mark::O).expect("empty board");
        board.set(opening.position, Square::Occupied(Mark::O));
        explore(&mut board);
    }
}
