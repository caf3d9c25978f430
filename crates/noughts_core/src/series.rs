//! Best-of-N series tracking.
//!
//! Only wins count toward the series; draws are ignored. The win target is
//! always derived from `best_of` and is never stored on its own.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::outcome::Outcome;
use crate::types::Player;

/// Default series length.
pub const DEFAULT_BEST_OF: u32 = 3;

/// Per-side win counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wins {
    /// Wins for X.
    #[serde(rename = "X")]
    pub x: u32,
    /// Wins for O.
    #[serde(rename = "O")]
    pub o: u32,
}

impl Wins {
    /// Wins recorded for `player`.
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn increment(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// Series configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SeriesError {
    /// A series needs at least one game.
    #[display("Series length must be at least 1")]
    ZeroLength,
}

impl std::error::Error for SeriesError {}

/// Tracks game wins toward a best-of-N series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRecord", into = "SeriesRecord")]
pub struct SeriesTracker {
    best_of: u32,
    wins: Wins,
}

impl SeriesTracker {
    /// New series of `best_of` games with no wins.
    ///
    /// # Errors
    ///
    /// [`SeriesError::ZeroLength`] when `best_of` is 0.
    #[instrument]
    pub fn new(best_of: u32) -> Result<Self, SeriesError> {
        if best_of == 0 {
            return Err(SeriesError::ZeroLength);
        }
        Ok(Self {
            best_of,
            wins: Wins::default(),
        })
    }

    /// Series length.
    pub fn best_of(&self) -> u32 {
        self.best_of
    }

    /// Wins needed to take the series: `ceil(best_of / 2)`.
    pub fn target(&self) -> u32 {
        self.best_of.div_ceil(2)
    }

    /// Current win counts.
    pub fn wins(&self) -> Wins {
        self.wins
    }

    /// Counts a finished game. Draws do not count toward the series.
    #[instrument(skip(self))]
    pub fn record_game_result(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(player) => {
                self.wins.increment(player);
                debug!(?player, wins = ?self.wins, "Series win recorded");
                if let Some(champion) = self.is_series_complete() {
                    info!(?champion, best_of = self.best_of, "Series complete");
                }
            }
            Outcome::Draw => debug!("Draw ignored for series"),
        }
    }

    /// Side that reached the target, if any.
    ///
    /// Should both sides somehow be at or over the target (possible after
    /// shortening the series), X is reported.
    pub fn is_series_complete(&self) -> Option<Player> {
        let target = self.target();
        [Player::X, Player::O]
            .into_iter()
            .find(|p| self.wins.get(*p) >= target)
    }

    /// Whether `player` alone has enough wins to take the series.
    pub fn has_reached_target(&self, player: Player) -> bool {
        self.wins.get(player) >= self.target()
    }

    /// Zeroes both win counts; the series length is unchanged.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.wins = Wins::default();
    }

    /// Changes the series length, keeping current wins.
    ///
    /// Even lengths are accepted; the target is still `ceil(n / 2)`.
    ///
    /// # Errors
    ///
    /// [`SeriesError::ZeroLength`] when `best_of` is 0.
    #[instrument(skip(self))]
    pub fn set_best_of(&mut self, best_of: u32) -> Result<(), SeriesError> {
        if best_of == 0 {
            return Err(SeriesError::ZeroLength);
        }
        self.best_of = best_of;
        debug!(best_of, target = self.target(), "Series length changed");
        Ok(())
    }
}

impl Default for SeriesTracker {
    fn default() -> Self {
        Self {
            best_of: DEFAULT_BEST_OF,
            wins: Wins::default(),
        }
    }
}

/// Stored shape; `target` is written for readers but ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesRecord {
    best_of: u32,
    #[serde(default, skip_deserializing)]
    target: u32,
    #[serde(default)]
    wins: Wins,
}

impl TryFrom<SeriesRecord> for SeriesTracker {
    type Error = SeriesError;

    fn try_from(record: SeriesRecord) -> Result<Self, Self::Error> {
        let mut tracker = SeriesTracker::new(record.best_of)?;
        tracker.wins = record.wins;
        Ok(tracker)
    }
}

impl From<SeriesTracker> for SeriesRecord {
    fn from(tracker: SeriesTracker) -> Self {
        Self {
            best_of: tracker.best_of,
            target: tracker.target(),
            wins: tracker.wins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_rounds_up() {
        for (best_of, target) in [(1, 1), (3, 2), (4, 2), (5, 3), (7, 4)] {
            assert_eq!(SeriesTracker::new(best_of).unwrap().target(), target);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert_eq!(SeriesTracker::new(0), Err(SeriesError::ZeroLength));
        let mut series = SeriesTracker::default();
        assert_eq!(series.set_best_of(0), Err(SeriesError::ZeroLength));
        assert_eq!(series.best_of(), 3);
    }

    #[test]
    fn test_draws_do_not_count() {
        let mut series = SeriesTracker::default();
        series.record_game_result(Outcome::Draw);
        series.record_game_result(Outcome::Draw);
        assert_eq!(series.wins(), Wins::default());
        assert_eq!(series.is_series_complete(), None);
    }

    #[test]
    fn test_set_best_of_keeps_wins() {
        let mut series = SeriesTracker::default();
        series.record_game_result(Outcome::Winner(Player::O));
        series.set_best_of(7).unwrap();
        assert_eq!(series.wins().o, 1);
        assert_eq!(series.target(), 4);
    }

    #[test]
    fn test_shortening_series_can_complete_it() {
        let mut series = SeriesTracker::new(5).unwrap();
        series.record_game_result(Outcome::Winner(Player::X));
        series.record_game_result(Outcome::Winner(Player::X));
        assert_eq!(series.is_series_complete(), None);
        series.set_best_of(3).unwrap();
        assert_eq!(series.is_series_complete(), Some(Player::X));
    }

    #[test]
    fn test_has_reached_target_checks_one_side() {
        let mut series = SeriesTracker::new(5).unwrap();
        series.record_game_result(Outcome::Winner(Player::X));
        series.record_game_result(Outcome::Winner(Player::X));
        assert!(!series.has_reached_target(Player::X));
        series.set_best_of(3).unwrap();
        assert!(series.has_reached_target(Player::X));
        assert!(!series.has_reached_target(Player::O));
    }
}
