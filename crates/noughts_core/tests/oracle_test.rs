//! Oracle decisions on hand-picked positions.

use noughts_core::{best_move, Board, Mark, Minimax, Position, Strategy, LOSS_SCORE, WIN_SCORE};

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_completes_own_line_instead_of_forking() {
    // X at 0 and 1, O at 3 and 4: both 2 (block + fork) and 5 (win) are forced wins.
    let scored = best_move(&board("XX_/OO_/___"), Mark::O).expect("live board");
    assert_eq!(scored.position.to_index(), 5);
    assert_eq!(scored.score, WIN_SCORE);
}

#[test]
fn test_lost_position_still_blocks_next_ply_win() {
    let scored = best_move(&board("X__/_X_/___"), Mark::O).expect("live board");
    assert_eq!(scored.position.to_index(), 8);
    assert_eq!(scored.score, LOSS_SCORE);
}

#[test]
fn test_strategy_answers_corner_opening_with_center() {
    assert_eq!(Minimax.choose(&board("X__/___/___"), Mark::O), Some(Position::Center));
}

#[test]
fn test_strategy_blocks_open_row() {
    assert_eq!(Minimax.choose(&board("___/XX_/O__"), Mark::O), Some(Position::MiddleRight));
}

#[test]
fn test_strategy_has_no_move_after_game_over() {
    assert_eq!(Minimax.choose(&board("OOO/XX_/X__"), Mark::X), None);
}
