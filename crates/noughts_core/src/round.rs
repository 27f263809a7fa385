//! A single round: board, move history and the mark to move.

use crate::action::{Move, MoveError};
use crate::invariants::{InvariantSet, RoundInvariants};
use crate::rules::evaluate;
use crate::{Board, Mark, Outcome, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One round of play from an empty board to a terminal outcome.
///
/// The round enforces legality (empty target square, undecided outcome) and
/// turn alternation. Lock and mode rules live one level up in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Mark,
    pub(crate) outcome: Outcome,
}

impl Round {
    /// Starts an empty round with `starter` to move.
    #[instrument]
    pub fn new(starter: Mark) -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            to_move: starter,
            outcome: Outcome::Undecided,
        }
    }

    /// Places the current mark at `pos`.
    ///
    /// On success the move is appended to history and the outcome re-evaluated.
    /// The turn passes to the opponent only while the outcome is undecided.
    ///
    /// # Errors
    ///
    /// [`MoveError::RoundOver`] once the round has a result, and
    /// [`MoveError::SquareOccupied`] if `pos` is taken. State is unchanged on error.
    #[instrument(skip(self), fields(mark = %self.to_move))]
    pub fn place(&mut self, pos: Position) -> Result<Outcome, MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::RoundOver);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let mark = self.to_move;
        self.board.set(pos, Square::Occupied(mark));
        self.history.push(Move::new(mark, pos));
        self.outcome = evaluate(&self.board);

        if !self.outcome.is_terminal() {
            self.to_move = mark.opponent();
        }

        debug_assert!(
            RoundInvariants::check_all(self).is_ok(),
            "round invariants violated after {:?}",
            pos
        );
        debug!(outcome = ?self.outcome, "Move placed");
        Ok(self.outcome)
    }

    /// Takes back the most recent move and hands the turn back to its mark.
    ///
    /// # Errors
    ///
    /// [`MoveError::NothingToUndo`] on an empty history.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        let last = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        self.board.set(last.position, Square::Empty);
        self.to_move = last.mark;
        self.outcome = evaluate(&self.board);
        debug!(undone = %last, "Move undone");
        Ok(last)
    }

    /// Replays `positions` from an empty board with `starter` to move first.
    ///
    /// # Errors
    ///
    /// Fails on the first illegal move.
    #[instrument]
    pub fn replay(starter: Mark, positions: &[Position]) -> Result<Self, MoveError> {
        let mut round = Self::new(starter);
        for &pos in positions {
            round.place(pos)?;
        }
        Ok(round)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history in play order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the mark to move.
    ///
    /// After a terminal move this is still the mark that made it.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Position::*;

    #[test]
    fn test_place_alternates_turns() {
        let mut round = Round::new(Mark::X);
        assert_eq!(round.place(Center), Ok(Outcome::Undecided));
        assert_eq!(round.to_move(), Mark::O);
        assert_eq!(round.history(), &[Move::new(Mark::X, Center)]);
    }

    #[test]
    fn test_occupied_square_rejected_without_change() {
        let mut round = Round::new(Mark::X);
        round.place(Center).expect("legal");
        let before = round.clone();

        assert_eq!(round.place(Center), Err(MoveError::SquareOccupied(Center)));
        assert_eq!(round, before);
    }

    #[test]
    fn test_winning_move_keeps_turn_and_blocks_further_moves() {
        let mut round = Round::replay(Mark::X, &[TopLeft, Center, TopCenter, BottomLeft])
            .expect("legal replay");
        let outcome = round.place(TopRight).expect("legal");

        assert_eq!(outcome.winner(), Some(Mark::X));
        assert_eq!(round.to_move(), Mark::X);
        assert_eq!(round.place(BottomRight), Err(MoveError::RoundOver));
    }

    #[test]
    fn test_undo_then_replace_roundtrip() {
        let mut round = Round::replay(Mark::O, &[Center, TopLeft]).expect("legal replay");
        let before = round.clone();

        let undone = round.undo().expect("history present");
        assert_eq!(undone, Move::new(Mark::X, TopLeft));
        assert_eq!(round.to_move(), Mark::X);
        assert!(round.board().is_empty(TopLeft));

        round.place(TopLeft).expect("legal");
        assert_eq!(round, before);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut round = Round::new(Mark::X);
        assert_eq!(round.undo(), Err(MoveError::NothingToUndo));
        assert_eq!(round.to_move(), Mark::X);
    }
}
