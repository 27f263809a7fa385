//! Timer driver: turns scheduled tasks into tokio sleeps.

use crate::engine::{GameEngine, ScheduledTask};
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Spawns one sleep per scheduled task and sends the task back when it elapses.
///
/// The owner of the engine receives fired tasks and passes them to
/// [`GameEngine::fire`], which drops any whose round has since been reset.
#[derive(Debug, Clone)]
pub struct TimerDriver {
    tx: mpsc::UnboundedSender<ScheduledTask>,
}

impl TimerDriver {
    /// Creates a driver and the receiver for fired tasks.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScheduledTask>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Starts timers for every task the engine has queued.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip_all)]
    pub fn dispatch(&self, engine: &mut GameEngine) {
        for task in engine.take_scheduled() {
            let tx = self.tx.clone();
            debug!(?task, "Starting timer");
            tokio::spawn(async move {
                tokio::time::sleep(task.delay).await;
                if tx.send(task).is_err() {
                    debug!(?task, "Driver receiver gone, timer discarded");
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::engine::Mode;

    #[tokio::test(start_paused = true)]
    async fn test_computer_reply_arrives_after_delay() {
        let mut engine = GameEngine::new(
            GameConfig::default()
                .with_mode(Mode::VsComputer)
                .with_thinking_delay_ms(380),
        );
        let (driver, mut fired) = TimerDriver::new();

        engine.apply_move(4).expect("legal");
        driver.dispatch(&mut engine);
        assert!(engine.scheduled().is_empty());

        let task = fired.recv().await.expect("timer fires");
        assert!(engine.fire(task));
        assert_eq!(engine.round().history().len(), 2);
        assert!(!engine.is_locked());
    }
}
