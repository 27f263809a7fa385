//! Session configuration.
//!
//! Every field has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! mode = "vs-computer"
//! thinking_delay_ms = 380
//! result_delay_ms = 2000
//! computer_mark = "O"
//! rotate_starter_after_round = true
//! ```

use crate::engine::Mode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_core::Mark;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "NOUGHTS_CONFIG";

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Delay before the computer's move is applied, in milliseconds.
    thinking_delay_ms: u64,

    /// How long a concluded round stays on screen, in milliseconds.
    result_delay_ms: u64,

    /// Mode the session opens in.
    mode: Mode,

    /// Mark played by the computer in vs-computer mode.
    computer_mark: Mark,

    /// Whether the next round after a result opens with the other mark.
    rotate_starter_after_round: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: 380,
            result_delay_ms: 2000,
            mode: Mode::default(),
            computer_mark: Mark::O,
            rotate_starter_after_round: true,
        }
    }
}

impl GameConfig {
    /// Computer thinking delay.
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// Result display delay.
    pub fn result_delay(&self) -> Duration {
        Duration::from_millis(self.result_delay_ms)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads from `path`, else from [`CONFIG_ENV`], else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(env_path) => Self::from_file(env_path),
            Err(_) => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "mode = \"vs-computer\"\nthinking_delay_ms = 0").expect("write");

        let config = GameConfig::from_file(file.path()).expect("valid config");
        assert_eq!(*config.mode(), Mode::VsComputer);
        assert_eq!(config.thinking_delay(), Duration::ZERO);
        assert_eq!(*config.result_delay_ms(), 2000);
        assert_eq!(*config.computer_mark(), Mark::O);
    }

    #[test]
    fn test_bad_file_reports_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "mode = \"hot-seat\"").expect("write");

        let err = GameConfig::from_file(file.path()).expect_err("invalid mode");
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_missing_file_reports_error() {
        let err = GameConfig::from_file("/nonexistent/noughts.toml").expect_err("missing");
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_setters_chain() {
        let config = GameConfig::default()
            .with_mode(Mode::VsComputer)
            .with_computer_mark(Mark::X);
        assert_eq!(*config.mode(), Mode::VsComputer);
        assert_eq!(*config.computer_mark(), Mark::X);
    }
}
