//! Alternating turn invariant: marks alternate through the history.

use super::Invariant;
use crate::Round;

/// Invariant: consecutive moves belong to different marks.
///
/// Either mark may open a round. While the round is undecided the mark to
/// move is the opponent of the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let history = round.history();

        if history.windows(2).any(|pair| pair[0].mark == pair[1].mark) {
            return false;
        }

        match history.last() {
            Some(last) if !round.outcome().is_terminal() => round.to_move() == last.mark.opponent(),
            Some(last) => round.to_move() == last.mark,
            None => true,
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Move, Position};

    #[test]
    fn test_o_may_open() {
        let round = Round::replay(Mark::O, &[Position::Center, Position::TopLeft])
            .expect("legal replay");
        assert!(AlternatingTurnInvariant::holds(&round));
        assert_eq!(round.to_move(), Mark::O);
    }

    #[test]
    fn test_same_mark_twice_violates() {
        let mut round = Round::replay(Mark::X, &[Position::TopLeft]).expect("legal replay");
        round.history.push(Move::new(Mark::X, Position::Center));
        assert!(!AlternatingTurnInvariant::holds(&round));
    }
}
