//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use noughts_core::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Play the given cell.
    Play(Position),
    /// Play the cell under the cursor.
    PlayCursor,
    /// Move the cursor.
    Cursor(KeyCode),
    /// Start a new round.
    NewRound,
    /// Reset scores.
    Reset,
    /// Undo the last move.
    Undo,
    /// Swap the starting mark.
    Swap,
    /// Toggle two-player / vs-computer.
    ToggleMode,
    /// Leave the app.
    Quit,
}

/// Maps a key to a command. Digits 1-9 address cells in reading order.
pub fn command_for(key: KeyCode) -> Option<UiCommand> {
    match key {
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map(|d| d as usize - 1)?;
            Position::from_index(index).map(UiCommand::Play)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiCommand::PlayCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(UiCommand::Cursor(key))
        }
        KeyCode::Char('n') | KeyCode::Char('r') => Some(UiCommand::NewRound),
        KeyCode::Char('R') => Some(UiCommand::Reset),
        KeyCode::Char('u') => Some(UiCommand::Undo),
        KeyCode::Char('s') => Some(UiCommand::Swap),
        KeyCode::Char('m') => Some(UiCommand::ToggleMode),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiCommand::Quit),
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}
