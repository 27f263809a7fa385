//! Pure tic-tac-toe rules and an unbeatable move oracle.
//!
//! This crate holds no session state: no scores, no timers, no input lock.
//! It provides the board, the fixed winning lines, a [`Round`] that enforces
//! legal play and alternating turns, and the minimax [`Strategy`] the
//! session engine consults for the computer-controlled mark.
//!
//! # Example
//!
//! ```
//! use noughts_core::{best_move, Board, Mark, Position};
//!
//! let board: Board = "X__/_X_/___".parse().unwrap();
//! let reply = best_move(&board, Mark::O).unwrap();
//! assert_eq!(reply.position, Position::BottomRight);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
mod oracle;
mod outcome;
mod position;
mod round;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use oracle::{best_move, Minimax, ScoredMove, Strategy, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};
pub use outcome::Outcome;
pub use position::Position;
pub use round::Round;
pub use rules::{evaluate, Line, LINES};
pub use types::{Board, Mark, ParseBoardError, Square};
