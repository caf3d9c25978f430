//! Cumulative scoreboard across all games.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::outcome::Outcome;
use crate::types::Player;

/// Running tally of wins and draws, independent of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct MatchScore {
    /// Games won by X.
    #[serde(rename = "X", default)]
    x: u32,
    /// Games won by O.
    #[serde(rename = "O", default)]
    o: u32,
    /// Drawn games.
    #[serde(rename = "D", default)]
    draws: u32,
}

impl MatchScore {
    /// Wins for `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Adds one finished game.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Player::X) => self.x += 1,
            Outcome::Winner(Player::O) => self.o += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Zeroes every counter.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_each_outcome() {
        let mut score = MatchScore::default();
        score.record(Outcome::Winner(Player::X));
        score.record(Outcome::Winner(Player::X));
        score.record(Outcome::Winner(Player::O));
        score.record(Outcome::Draw);
        assert_eq!((*score.x(), *score.o(), *score.draws()), (2, 1, 1));
        assert_eq!(score.wins(Player::X), 2);
    }

    #[test]
    fn test_reset() {
        let mut score = MatchScore::default();
        score.record(Outcome::Draw);
        score.reset();
        assert_eq!(score, MatchScore::default());
    }
}
