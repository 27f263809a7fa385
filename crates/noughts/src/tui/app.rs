//! Application state for the terminal UI.

use super::input::{move_cursor, UiCommand};
use crate::engine::{ChannelObserver, GameEngine, Notification, Snapshot};
use noughts_core::Position;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// How long a toast stays visible.
const TOAST_TTL: Duration = Duration::from_millis(1600);

/// Main application state.
pub struct App {
    engine: GameEngine,
    notifications: mpsc::UnboundedReceiver<Notification>,
    snapshot: Snapshot,
    cursor: Position,
    toast: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    /// Wraps an engine and subscribes to its notifications.
    pub fn new(mut engine: GameEngine) -> Self {
        let (observer, notifications) = ChannelObserver::channel();
        engine.add_observer(Box::new(observer));
        let snapshot = engine.snapshot();
        Self {
            engine,
            notifications,
            snapshot,
            cursor: Position::Center,
            toast: None,
            should_quit: false,
        }
    }

    /// The engine, for the driver loop.
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    /// Latest published state.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current toast text, if one is still showing.
    pub fn toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, shown)| shown.elapsed() < TOAST_TTL)
            .map(|(text, _)| text.as_str())
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Applies every notification the engine has sent since the last call.
    pub fn drain_notifications(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            match notification {
                Notification::Snapshot(snapshot) => self.snapshot = *snapshot,
                Notification::Event(event) => {
                    if let Some(message) = event.message() {
                        debug!(%message, "Toast");
                        self.toast = Some((message, Instant::now()));
                    }
                }
            }
        }
    }

    /// Handles a key command.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: UiCommand) {
        match command {
            UiCommand::Play(pos) => {
                self.cursor = pos;
                let _ = self.engine.apply_move(pos.to_index());
            }
            UiCommand::PlayCursor => {
                let _ = self.engine.apply_move(self.cursor.to_index());
            }
            UiCommand::Cursor(key) => self.cursor = move_cursor(self.cursor, key),
            UiCommand::NewRound => self.engine.start_new_round(),
            UiCommand::Reset => self.engine.reset_all(),
            UiCommand::Undo => {
                let _ = self.engine.undo();
            }
            UiCommand::Swap => self.engine.swap_first_player(),
            UiCommand::ToggleMode => {
                let mode = self.engine.mode().toggle();
                self.engine.set_mode(mode);
            }
            UiCommand::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::Mode;
    use noughts_core::Mark;

    #[test]
    fn test_snapshot_follows_engine() {
        let mut app = App::new(GameEngine::new(GameConfig::default()));
        app.handle(UiCommand::Play(Position::Center));
        app.drain_notifications();
        assert_eq!(app.snapshot().board[4], Some(Mark::X));
        assert_eq!(app.cursor(), Position::Center);
    }

    #[test]
    fn test_refused_undo_shows_toast() {
        let mut app = App::new(GameEngine::new(GameConfig::default()));
        app.handle(UiCommand::ToggleMode);
        app.handle(UiCommand::Undo);
        app.drain_notifications();
        assert_eq!(app.snapshot().mode, Mode::VsComputer);
        assert_eq!(app.toast(), Some("Undo only in 2 Players"));
    }
}
