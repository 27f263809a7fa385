//! Play mode.

use serde::{Deserialize, Serialize};

/// Who controls the non-human mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Mode {
    /// Two humans share the board; undo is available.
    #[default]
    TwoPlayer,
    /// A human plays against the minimax oracle.
    VsComputer,
}

impl Mode {
    /// Returns the display label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwoPlayer => "2 Players",
            Self::VsComputer => "Vs CPU",
        }
    }

    /// Toggles between the two modes.
    pub fn toggle(self) -> Self {
        match self {
            Self::TwoPlayer => Self::VsComputer,
            Self::VsComputer => Self::TwoPlayer,
        }
    }

    /// Undo is only offered when two humans play.
    pub fn allows_undo(self) -> bool {
        self == Self::TwoPlayer
    }
}
