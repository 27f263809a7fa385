//! Deferred engine work: the computer's thinking delay and the result display.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Ask the oracle for a move and apply it.
    ComputerMove,
    /// Clear a concluded round and start the next one.
    ConcludeRound,
}

/// A continuation handed to the driver, tagged with the round generation
/// that was current when it was scheduled.
///
/// Firing a task whose generation is no longer current does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Round generation at schedule time.
    pub generation: u64,
    /// What to do.
    pub kind: TaskKind,
    /// How long the driver waits before firing.
    pub delay: Duration,
}
