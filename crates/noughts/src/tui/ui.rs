//! Stateless rendering of the game screen.

use super::app::App;
use crate::engine::{RoundResult, Snapshot};
use noughts_core::{Mark, Position};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HELP: &str = "1-9/arrows+Enter play  r/n new  R reset  u undo  s swap  m mode  q quit";

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Scores
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Noughts - {}", snapshot.mode.label()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_scores(frame, chunks[1], snapshot);
    draw_board(frame, chunks[2], snapshot, app.cursor());

    let status = app.toast().map(str::to_string).unwrap_or_else(|| status_line(snapshot));
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

/// Text shown when no toast is active.
fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.result {
        Some(RoundResult::Win { winner, .. }) => format!("{} wins the round", winner),
        Some(RoundResult::Draw) => "Round drawn".to_string(),
        None if snapshot.locked => format!("{} is thinking...", snapshot.turn),
        None => format!("{} to move ({} started)", snapshot.turn, snapshot.starter),
    }
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_scores(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let scores = &snapshot.scores;
    let line = Line::from(vec![
        Span::styled(format!("X {}", scores.x_wins()), mark_style(Mark::X)),
        Span::raw("   "),
        Span::styled(format!("Draws {}", scores.draws()), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(format!("O {}", scores.o_wins()), mark_style(Mark::O)),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Position) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..3 {
        draw_row(frame, rows[row * 2], snapshot, cursor, row);
        if row < 2 {
            let sep = Paragraph::new("─".repeat(board_area.width as usize))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Position, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_row_col(row, col) {
            draw_cell(frame, cols[col * 2], snapshot, cursor, pos);
        }
        if col < 2 {
            let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[col * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: Position, pos: Position) {
    let index = pos.to_index();
    let (symbol, mut style) = match snapshot.board[index] {
        None => (format!(" {} ", index + 1), Style::default().fg(Color::DarkGray)),
        Some(mark) => (format!(" {} ", mark), mark_style(mark)),
    };

    if snapshot.result.is_some_and(|result| result.highlights(index)) {
        style = style.bg(Color::Green).fg(Color::Black);
    } else if pos == cursor {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let paragraph = Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::GameEngine;

    #[test]
    fn test_status_line_reports_turn() {
        let engine = GameEngine::new(GameConfig::default());
        assert_eq!(status_line(&engine.snapshot()), "X to move (X started)");
    }

    #[test]
    fn test_status_line_reports_win() {
        let mut engine = GameEngine::new(GameConfig::default());
        for index in [0, 3, 1, 4, 2] {
            engine.apply_move(index).expect("legal");
        }
        assert_eq!(status_line(&engine.snapshot()), "X wins the round");
    }
}
