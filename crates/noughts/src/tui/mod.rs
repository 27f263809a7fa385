//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use crate::config::GameConfig;
use crate::driver::TimerDriver;
use crate::engine::{GameEngine, ScheduledTask};
use anyhow::Result;
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// How long to wait for a key before servicing timers again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the interactive game until the user quits.
pub async fn run_tui(config: GameConfig, log_file: &Path) -> Result<()> {
    // Log to a file so output does not tear the screen
    let file = std::fs::File::create(log_file)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .try_init();

    info!(mode = %config.mode(), "Starting noughts TUI");

    let app = App::new(GameEngine::new(config));
    let (driver, fired) = TimerDriver::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, app, driver, fired).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("TUI exited");
    result
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    driver: TimerDriver,
    mut fired: mpsc::UnboundedReceiver<ScheduledTask>,
) -> Result<()> {
    loop {
        driver.dispatch(app.engine_mut());
        while let Ok(task) = fired.try_recv() {
            app.engine_mut().fire(task);
        }
        app.drain_notifications();

        terminal.draw(|f| ui::draw(f, &app))?;

        if app.should_quit() {
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            if let Some(command) = input::command_for(key.code) {
                debug!(?command, "Key command");
                app.handle(command);
            }
        }

        tokio::task::yield_now().await;
    }
}
