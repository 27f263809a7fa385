//! Observer hooks: how the engine tells renderers what happened.

use super::{Mode, Snapshot};
use noughts_core::{Mark, Move};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Transient feedback events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh board is ready.
    RoundStarted {
        /// Mark that moves first.
        starter: Mark,
        /// New round generation.
        generation: u64,
    },
    /// Scores were zeroed.
    ScoresReset,
    /// Play mode switched.
    ModeChanged(Mode),
    /// The starting mark preference flipped.
    StarterSwapped(Mark),
    /// A mark was placed.
    MovePlayed(Move),
    /// A move was taken back.
    MoveUndone(Move),
    /// Undo was requested where it is not offered.
    UndoUnavailable,
    /// The computer is choosing a move.
    ComputerThinking(Mark),
    /// A mark completed a line.
    Win {
        /// Winning mark.
        winner: Mark,
        /// Indices of the completed line.
        line: [usize; 3],
    },
    /// The board filled with no line.
    Draw,
}

impl GameEvent {
    /// Short message suitable for a toast.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::ScoresReset => Some("Scores reset".to_string()),
            Self::ModeChanged(mode) => Some(format!("{} mode", mode.label())),
            Self::StarterSwapped(mark) => Some(format!("{} starts now", mark)),
            Self::UndoUnavailable => Some("Undo only in 2 Players".to_string()),
            Self::ComputerThinking(_) => Some("CPU is thinking...".to_string()),
            Self::Win { winner, .. } => Some(format!("{} wins!", winner)),
            Self::Draw => Some("Draw".to_string()),
            Self::RoundStarted { .. } | Self::MovePlayed(_) | Self::MoveUndone(_) => None,
        }
    }
}

/// Receives engine notifications. Return values never flow back to the engine.
pub trait GameObserver: Send {
    /// Called for each feedback event, in the order they occur.
    fn on_event(&mut self, event: &GameEvent);

    /// Called with the full state after every mutation.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}
}

/// What a [`ChannelObserver`] forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A feedback event.
    Event(GameEvent),
    /// A post-mutation snapshot.
    Snapshot(Box<Snapshot>),
}

/// Forwards notifications over an unbounded channel.
///
/// A closed receiver is not an error; notifications are simply dropped.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl GameObserver for ChannelObserver {
    fn on_event(&mut self, event: &GameEvent) {
        if self.tx.send(Notification::Event(event.clone())).is_err() {
            debug!("Observer channel closed, dropping event");
        }
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        if self
            .tx
            .send(Notification::Snapshot(Box::new(snapshot.clone())))
            .is_err()
        {
            debug!("Observer channel closed, dropping snapshot");
        }
    }
}

/// Writes every event to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, event: &GameEvent) {
        info!(?event, "Game event");
    }
}
