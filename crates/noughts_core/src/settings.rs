//! Match settings: user-configurable preferences for a session.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::ai::Difficulty;
use crate::timer::TimerSettings;
use crate::types::Player;

/// Who controls O (or X, when the human picks O).
///
/// Defaults to [`Mode::PlayerVsComputer`].
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
pub enum Mode {
    /// Two humans share the board.
    #[serde(rename = "pvp")]
    #[strum(serialize = "pvp")]
    PlayerVsPlayer,
    /// One human against the computer.
    #[default]
    #[serde(rename = "pvc")]
    #[strum(serialize = "pvc")]
    PlayerVsComputer,
}

/// User-configurable settings for a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Opponent kind.
    pub mode: Mode,
    /// Computer strength in [`Mode::PlayerVsComputer`].
    pub difficulty: Difficulty,
    /// Mark played by the human in [`Mode::PlayerVsComputer`].
    pub human_side: Player,
    /// Move timer.
    pub timer: TimerSettings,
    /// Whether sound effects play.
    pub sound_on: bool,
    /// Dark colour theme.
    pub dark_theme: bool,
}

impl Settings {
    /// Creates a new `Settings` with defaults.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark played by the computer, if there is one.
    pub fn computer_side(&self) -> Option<Player> {
        match self.mode {
            Mode::PlayerVsComputer => Some(self.human_side.opponent()),
            Mode::PlayerVsPlayer => None,
        }
    }

    /// Whether `player` is controlled by the computer.
    pub fn is_computer(&self, player: Player) -> bool {
        self.computer_side() == Some(player)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            human_side: Player::X,
            timer: TimerSettings::default(),
            sound_on: true,
            dark_theme: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_mode_string_forms() {
        assert_eq!(Mode::PlayerVsComputer.to_string(), "pvc");
        assert_eq!(Mode::from_str("pvp").unwrap(), Mode::PlayerVsPlayer);
        assert!(Mode::from_str("Player vs Player").is_err());
    }

    #[test]
    fn test_computer_side() {
        let mut settings = Settings::new();
        settings.human_side = Player::O;
        assert_eq!(settings.computer_side(), Some(Player::X));
        assert!(settings.is_computer(Player::X));
        settings.mode = Mode::PlayerVsPlayer;
        assert_eq!(settings.computer_side(), None);
        assert!(!settings.is_computer(Player::X));
    }
}
