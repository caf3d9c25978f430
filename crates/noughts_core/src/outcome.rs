//! Finished-game results.

use serde::{Deserialize, Serialize};

use crate::rules::Win;
use crate::types::Player;

/// Outcome of a finished game, as scoreboards and series see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player won the game.
    Winner(Player),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Winner(player) => Some(*player),
            Outcome::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(player) => write!(f, "Player {} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// How a game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEnd {
    /// A player completed a line.
    Line(Win),
    /// A player forfeited (timer expiry); the board is irrelevant.
    Forfeit {
        /// Opponent of the forfeiting player.
        winner: Player,
        /// Player whose timer ran out.
        forfeited_by: Player,
    },
    /// Full board, no line.
    Draw,
}

impl GameEnd {
    /// Collapses to the scoring outcome.
    pub fn outcome(&self) -> Outcome {
        match self {
            GameEnd::Line(win) => Outcome::Winner(win.player),
            GameEnd::Forfeit { winner, .. } => Outcome::Winner(*winner),
            GameEnd::Draw => Outcome::Draw,
        }
    }

    /// The completed line, for line wins only.
    pub fn win_line(&self) -> Option<Win> {
        match self {
            GameEnd::Line(win) => Some(*win),
            _ => None,
        }
    }
}
