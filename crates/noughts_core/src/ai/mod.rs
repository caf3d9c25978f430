//! Computer player.
//!
//! A [`Strategy`] picks a move for a given board and mark. Each
//! [`Difficulty`] maps to one strategy:
//!
//! - **Easy**: [`RandomStrategy`], uniform over empty cells
//! - **Normal**: [`HeuristicStrategy`], win / block / centre / corner / edge
//! - **Hard**: [`MinimaxStrategy`], exhaustive game-tree search
//!
//! [`ComputerPlayer`] owns the random source so that matches can be replayed
//! from a seed.

mod heuristic;
mod minimax;
mod random;

pub use heuristic::{HeuristicStrategy, tactical_move};
pub use minimax::{MinimaxStrategy, minimax_scores};
pub use random::RandomStrategy;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::position::Position;
use crate::types::{Board, Player};

/// Computer strength.
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
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Random legal moves.
    Easy,
    /// Rule-based play.
    #[default]
    Normal,
    /// Perfect play.
    Hard,
}

impl Difficulty {
    /// Strategy backing this difficulty.
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Difficulty::Easy => &RandomStrategy,
            Difficulty::Normal => &HeuristicStrategy,
            Difficulty::Hard => &MinimaxStrategy,
        }
    }
}

/// A move selection policy.
pub trait Strategy: Send + Sync {
    /// Picks a move for `ai` on `board`.
    ///
    /// Returns `None` only when the board has no empty square.
    fn choose(&self, board: &Board, ai: Player, rng: &mut dyn RngCore) -> Option<Position>;
}

/// Computer opponent with its own random source.
#[derive(Debug, Clone)]
pub struct ComputerPlayer {
    rng: StdRng,
}

impl ComputerPlayer {
    /// Seeds from OS entropy.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic player for replays and tests.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Chooses a move for `ai` at the given difficulty.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn choose_move(&mut self, board: &Board, ai: Player, difficulty: Difficulty) -> Option<Position> {
        let choice = difficulty.strategy().choose(board, ai, &mut self.rng);
        debug!(?choice, "Computer chose move");
        choice
    }
}

impl Default for ComputerPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!(Difficulty::from_str("easy").unwrap(), Difficulty::Easy);
        assert!(Difficulty::from_str("brutal").is_err());
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        let mut computer = ComputerPlayer::seeded(7);
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            assert_eq!(computer.choose_move(&board, Player::O, difficulty), None);
        }
    }

    #[test]
    fn test_seeded_players_agree() {
        let board = Board::new();
        let mut a = ComputerPlayer::seeded(42);
        let mut b = ComputerPlayer::seeded(42);
        for _ in 0..10 {
            assert_eq!(
                a.choose_move(&board, Player::X, Difficulty::Easy),
                b.choose_move(&board, Player::X, Difficulty::Easy)
            );
        }
    }
}
