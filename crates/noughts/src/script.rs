//! Headless runner: drives the engine from a list of steps and reports JSON.

use crate::engine::{GameEngine, Mode, Snapshot};
use derive_more::{Display, Error};
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, instrument};

/// One scripted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    /// Move at a cell index (`0`-`8`; other numbers are passed through and ignored by the engine).
    #[display("move {}", _0)]
    Move(usize),
    /// `u`: undo.
    #[display("undo")]
    Undo,
    /// `n`: new round.
    #[display("new-round")]
    NewRound,
    /// `r`: reset scores.
    #[display("reset")]
    Reset,
    /// `s`: swap starting mark.
    #[display("swap")]
    Swap,
    /// `m:<mode>`: switch mode.
    #[display("mode {}", _0)]
    Mode(Mode),
    /// `t`: fire every pending timer.
    #[display("tick")]
    Tick,
}

/// A script step that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized step {:?}", step)]
pub struct StepParseError {
    /// The offending text.
    pub step: String,
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || StepParseError {
            step: s.to_string(),
        };
        match s.trim() {
            "u" | "undo" => Ok(Self::Undo),
            "n" | "new" => Ok(Self::NewRound),
            "r" | "reset" => Ok(Self::Reset),
            "s" | "swap" => Ok(Self::Swap),
            "t" | "tick" => Ok(Self::Tick),
            other => {
                if let Some(mode) = other.strip_prefix("m:") {
                    mode.parse().map(Self::Mode).map_err(|_| err())
                } else {
                    other.parse().map(Self::Move).map_err(|_| err())
                }
            }
        }
    }
}

/// What happened at one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// The step as written.
    pub step: String,
    /// Why the engine ignored it, if it did.
    pub ignored: Option<String>,
    /// Timers fired after the step.
    pub fired: usize,
    /// State after the step.
    pub snapshot: Snapshot,
}

/// Runs `steps` in order.
///
/// With `auto_tick` every pending timer fires right after each step, as if
/// all delays were zero; otherwise timers fire only at `t` steps.
#[instrument(skip(engine, steps), fields(steps = steps.len()))]
pub fn run(engine: &mut GameEngine, steps: &[Step], auto_tick: bool) -> Vec<StepReport> {
    let mut reports = Vec::with_capacity(steps.len());
    for &step in steps {
        let ignored = match step {
            Step::Move(index) => engine.apply_move(index).err().map(|e| e.to_string()),
            Step::Undo => engine.undo().err().map(|e| e.to_string()),
            Step::NewRound => {
                engine.start_new_round();
                None
            }
            Step::Reset => {
                engine.reset_all();
                None
            }
            Step::Swap => {
                engine.swap_first_player();
                None
            }
            Step::Mode(mode) => {
                engine.set_mode(mode);
                None
            }
            Step::Tick => None,
        };
        let fired = if auto_tick || step == Step::Tick {
            engine.run_pending()
        } else {
            0
        };
        debug!(%step, ?ignored, fired, "Step done");
        reports.push(StepReport {
            step: step.to_string(),
            ignored,
            fired,
            snapshot: engine.snapshot(),
        });
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use noughts_core::Mark;

    fn steps(s: &str) -> Vec<Step> {
        s.split_whitespace()
            .map(|step| step.parse().expect("valid step"))
            .collect()
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(
            steps("4 u m:vs-computer t"),
            vec![Step::Move(4), Step::Undo, Step::Mode(Mode::VsComputer), Step::Tick]
        );
        assert!("m:solo".parse::<Step>().is_err());
        assert!("x".parse::<Step>().is_err());
    }

    #[test]
    fn test_reports_ignored_moves() {
        let mut engine = GameEngine::new(GameConfig::default());
        let reports = run(&mut engine, &steps("4 4 9"), true);
        assert_eq!(reports[0].ignored, None);
        assert!(reports[1].ignored.is_some());
        assert!(reports[2].ignored.is_some());
        assert_eq!(reports[2].snapshot.board[4], Some(Mark::X));
    }

    #[test]
    fn test_auto_tick_plays_computer_replies() {
        let mut engine = GameEngine::new(GameConfig::default());
        let reports = run(&mut engine, &steps("m:vs-computer 4"), true);
        let last = &reports[1].snapshot;
        assert_eq!(last.board.iter().flatten().count(), 2);
        assert_eq!(last.turn, Mark::X);
        assert_eq!(reports[1].fired, 1);
    }

    #[test]
    fn test_report_serializes() {
        let mut engine = GameEngine::new(GameConfig::default());
        let reports = run(&mut engine, &steps("0"), false);
        let json = serde_json::to_value(&reports[0]).expect("serialize");
        assert_eq!(json["snapshot"]["board"][0], "X");
        assert_eq!(json["snapshot"]["mode"], "two-player");
    }
}
