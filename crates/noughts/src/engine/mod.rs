//! Session engine: turn state machine, input lock, scores and round lifecycle.
//!
//! The engine is synchronous. Anything that must happen later (the computer's
//! thinking delay, the pause after a result) is queued as a [`ScheduledTask`]
//! for a driver to fire. Each task carries the round generation it was
//! scheduled in; every reset bumps the generation, so a task left over from an
//! abandoned round fires into nothing.

mod mode;
mod observer;
mod scoreboard;
mod snapshot;
mod task;

pub use mode::Mode;
pub use observer::{ChannelObserver, GameEvent, GameObserver, Notification, TracingObserver};
pub use scoreboard::Scoreboard;
pub use snapshot::{RoundResult, Snapshot};
pub use task::{ScheduledTask, TaskKind};

use crate::config::GameConfig;
use noughts_core::{Mark, Minimax, Move, MoveError, Outcome, Position, Round, Strategy};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A tic-tac-toe session: one board, two marks, running scores.
pub struct GameEngine {
    config: GameConfig,
    strategy: Box<dyn Strategy>,
    round: Round,
    mode: Mode,
    starter: Mark,
    scores: Scoreboard,
    locked: bool,
    thinking: bool,
    generation: u64,
    scheduled: Vec<ScheduledTask>,
    observers: Vec<Box<dyn GameObserver>>,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("strategy", &self.strategy.name())
            .field("round", &self.round)
            .field("mode", &self.mode)
            .field("starter", &self.starter)
            .field("scores", &self.scores)
            .field("locked", &self.locked)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Creates a session that uses the minimax oracle for the computer.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self::with_strategy(config, Box::new(Minimax))
    }

    /// Creates a session with a custom computer strategy.
    ///
    /// If the configured mode is vs-computer and the computer opens, its first
    /// move is scheduled immediately.
    #[instrument(skip(strategy), fields(strategy = strategy.name()))]
    pub fn with_strategy(config: GameConfig, strategy: Box<dyn Strategy>) -> Self {
        let mode = *config.mode();
        let mut engine = Self {
            config,
            strategy,
            round: Round::new(Mark::X),
            mode,
            starter: Mark::X,
            scores: Scoreboard::new(),
            locked: false,
            thinking: false,
            generation: 0,
            scheduled: Vec::new(),
            observers: Vec::new(),
        };
        engine.maybe_schedule_computer();
        info!(mode = %engine.mode, "Session created");
        engine
    }

    /// Registers an observer for events and snapshots.
    ///
    /// The newcomer is caught up at once: it receives `RoundStarted` for the
    /// round in play, `ComputerThinking` if a computer move is pending, and a
    /// snapshot.
    pub fn add_observer(&mut self, mut observer: Box<dyn GameObserver>) {
        observer.on_event(&GameEvent::RoundStarted {
            starter: self.starter,
            generation: self.generation,
        });
        if self.thinking {
            observer.on_event(&GameEvent::ComputerThinking(self.computer_mark()));
        }
        observer.on_snapshot(&self.snapshot());
        self.observers.push(observer);
    }

    // ─────────────────────────────────────────────────────────────
    //  Entry points
    // ─────────────────────────────────────────────────────────────

    /// Places the current mark at cell `index` (0-8).
    ///
    /// Requests while locked, out of range, or on an occupied square are
    /// ignored: the error says why, and nothing changes.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn apply_move(&mut self, index: usize) -> Result<Outcome, MoveError> {
        if self.locked {
            debug!("Move ignored: input locked");
            return Err(MoveError::Locked);
        }
        let pos = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        let mark = self.round.to_move();

        let outcome = self.round.place(pos).inspect_err(|e| {
            debug!(error = %e, "Move ignored");
        })?;
        info!(%mark, position = index, "Move applied");
        self.emit(GameEvent::MovePlayed(Move::new(mark, pos)));

        if outcome.is_terminal() {
            self.conclude(outcome);
        } else {
            self.maybe_schedule_computer();
        }
        self.publish();
        Ok(outcome)
    }

    /// Takes back the last move (two-player mode only).
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        if !self.mode.allows_undo() || self.locked {
            debug!(mode = %self.mode, locked = self.locked, "Undo refused");
            self.emit(GameEvent::UndoUnavailable);
            return Err(if self.locked {
                MoveError::Locked
            } else {
                MoveError::UndoUnavailable
            });
        }

        let undone = self.round.undo()?;
        info!(%undone, "Move undone");
        self.emit(GameEvent::MoveUndone(undone));
        self.publish();
        Ok(undone)
    }

    /// Clears the board and starts the next round with the other mark first.
    #[instrument(skip(self))]
    pub fn start_new_round(&mut self) {
        self.starter = self.starter.opponent();
        self.begin_round();
    }

    /// Zeroes scores and starts over with X first.
    #[instrument(skip(self))]
    pub fn reset_all(&mut self) {
        self.scores.reset();
        self.starter = Mark::X;
        self.emit(GameEvent::ScoresReset);
        self.begin_round();
    }

    /// Flips which mark opens and restarts the current round.
    #[instrument(skip(self))]
    pub fn swap_first_player(&mut self) {
        self.starter = self.starter.opponent();
        self.emit(GameEvent::StarterSwapped(self.starter));
        self.begin_round();
    }

    /// Switches play mode and restarts the current round with the same starter.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.emit(GameEvent::ModeChanged(mode));
        self.begin_round();
    }

    // ─────────────────────────────────────────────────────────────
    //  Scheduling
    // ─────────────────────────────────────────────────────────────

    /// Removes and returns the tasks queued since the last call.
    pub fn take_scheduled(&mut self) -> Vec<ScheduledTask> {
        std::mem::take(&mut self.scheduled)
    }

    /// Tasks queued and not yet taken by a driver.
    pub fn scheduled(&self) -> &[ScheduledTask] {
        &self.scheduled
    }

    /// Runs a task whose delay has elapsed.
    ///
    /// Returns `false` if the task belongs to an earlier round generation and
    /// was dropped.
    #[instrument(skip(self), fields(current = self.generation))]
    pub fn fire(&mut self, task: ScheduledTask) -> bool {
        if task.generation != self.generation {
            debug!(stale = task.generation, "Dropping stale task");
            return false;
        }
        match task.kind {
            TaskKind::ComputerMove => self.computer_move(),
            TaskKind::ConcludeRound => self.next_round_after_result(),
        }
        true
    }

    /// Fires queued tasks, oldest first, until the engine waits on a human.
    ///
    /// Delays are ignored. Used by headless drivers and tests.
    #[instrument(skip(self))]
    pub fn run_pending(&mut self) -> usize {
        let mut fired = 0;
        while !self.scheduled.is_empty() {
            let task = self.scheduled.remove(0);
            if self.fire(task) {
                fired += 1;
            }
        }
        fired
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Current state for renderers.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.round.board().marks(),
            turn: self.round.to_move(),
            starter: self.starter,
            locked: self.locked,
            mode: self.mode,
            scores: self.scores,
            result: RoundResult::from_outcome(self.round.outcome()),
            generation: self.generation,
        }
    }

    /// The round in play.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Session scores.
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mark to move.
    pub fn turn(&self) -> Mark {
        self.round.to_move()
    }

    /// Mark that opened the current round.
    pub fn starter(&self) -> Mark {
        self.starter
    }

    /// Whether move requests are being ignored.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Current round generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark controlled by the computer in vs-computer mode.
    pub fn computer_mark(&self) -> Mark {
        *self.config.computer_mark()
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Fresh board with the current starter; drops all pending work.
    fn begin_round(&mut self) {
        self.generation += 1;
        self.round = Round::new(self.starter);
        self.locked = false;
        self.thinking = false;
        self.scheduled.clear();
        info!(generation = self.generation, starter = %self.starter, mode = %self.mode, "Round started");
        self.emit(GameEvent::RoundStarted {
            starter: self.starter,
            generation: self.generation,
        });
        self.maybe_schedule_computer();
        self.publish();
    }

    /// Locks input and queues the computer's move if it is the computer's turn.
    fn maybe_schedule_computer(&mut self) {
        let computer = self.computer_mark();
        if self.mode != Mode::VsComputer
            || self.round.to_move() != computer
            || self.round.outcome().is_terminal()
            || self.thinking
        {
            return;
        }
        self.thinking = true;
        self.locked = true;
        self.emit(GameEvent::ComputerThinking(computer));
        self.schedule(TaskKind::ComputerMove, self.config.thinking_delay());
    }

    fn schedule(&mut self, kind: TaskKind, delay: Duration) {
        debug!(?kind, ?delay, generation = self.generation, "Task scheduled");
        self.scheduled.push(ScheduledTask {
            generation: self.generation,
            kind,
            delay,
        });
    }

    /// Consults the strategy, then applies its move through [`Self::apply_move`].
    fn computer_move(&mut self) {
        if !self.thinking {
            debug!("No computer move pending");
            return;
        }
        self.thinking = false;

        // Input stays locked unless the strategy's move is accepted; a round
        // control (new round, reset, swap, mode) is the way out.
        let mark = self.round.to_move();
        let Some(pos) = self.strategy.choose(self.round.board(), mark) else {
            warn!(%mark, "Strategy returned no move on a live board");
            self.publish();
            return;
        };
        info!(%mark, position = pos.to_index(), strategy = self.strategy.name(), "Computer chose move");
        self.locked = false;
        if let Err(e) = self.apply_move(pos.to_index()) {
            warn!(error = %e, "Strategy chose an illegal move");
            self.locked = true;
            self.publish();
        }
    }

    /// Scores the round, locks input and queues the next round.
    fn conclude(&mut self, outcome: Outcome) {
        if !outcome.is_terminal() {
            return;
        }
        self.scores.record(&outcome);
        self.locked = true;
        match outcome {
            Outcome::Win { mark, line } => {
                info!(winner = %mark, line = ?line.indices(), "Round won");
                self.emit(GameEvent::Win {
                    winner: mark,
                    line: line.indices(),
                });
            }
            Outcome::Draw => {
                info!("Round drawn");
                self.emit(GameEvent::Draw);
            }
            Outcome::Undecided => {}
        }
        self.schedule(TaskKind::ConcludeRound, self.config.result_delay());
    }

    fn next_round_after_result(&mut self) {
        if !self.round.outcome().is_terminal() {
            debug!("No concluded round to clear");
            return;
        }
        if *self.config.rotate_starter_after_round() {
            self.starter = self.starter.opponent();
        }
        self.begin_round();
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }
}
