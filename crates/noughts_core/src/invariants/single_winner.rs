//! Single winner invariant: at most one mark owns a completed line.

use super::Invariant;
use crate::rules::{line_owner, LINES};
use crate::{Mark, Round};

/// Invariant: completed lines never belong to both marks.
///
/// A single move can complete two lines at once (a fork filled in), so the
/// number of completed lines is not bounded by one; their owner is.
pub struct SingleWinnerInvariant;

impl Invariant<Round> for SingleWinnerInvariant {
    fn holds(round: &Round) -> bool {
        let owners = LINES
            .iter()
            .filter_map(|line| line_owner(round.board(), line));
        let (mut x, mut o) = (false, false);
        for owner in owners {
            match owner {
                Mark::X => x = true,
                Mark::O => o = true,
            }
        }
        !(x && o)
    }

    fn description() -> &'static str {
        "At most one mark owns a completed line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Square};

    #[test]
    fn test_two_owners_violates() {
        let mut round = Round::new(Mark::X);
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            round.board.set(pos, Square::Occupied(Mark::X));
        }
        for pos in [Position::BottomLeft, Position::BottomCenter, Position::BottomRight] {
            round.board.set(pos, Square::Occupied(Mark::O));
        }
        assert!(!SingleWinnerInvariant::holds(&round));
    }
}
