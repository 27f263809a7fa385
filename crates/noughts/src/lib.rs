//! Noughts - tic-tac-toe session engine.
//!
//! Wraps the rules in [`noughts_core`] with everything a playable session
//! needs: two play modes, running scores, an input lock while the computer
//! thinks or a result is on screen, and deferred tasks a driver fires later.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod driver;
pub mod engine;
pub mod script;
pub mod tui;

pub use config::{ConfigError, GameConfig, CONFIG_ENV};
pub use driver::TimerDriver;
pub use engine::{
    ChannelObserver, GameEngine, GameEvent, GameObserver, Mode, Notification, RoundResult,
    ScheduledTask, Scoreboard, Snapshot, TaskKind, TracingObserver,
};
