//! Mutable state of one match session.

use derive_getters::Getters;
use noughts_core::{ComputerPlayer, MatchScore, SeriesTracker, Settings, TimerController, TurnController};
use tracing::debug;

use crate::persist::Persisted;

/// Counter bumped whenever pending delayed work must be invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }

    fn advance(&mut self) {
        self.0 += 1;
    }
}

/// Everything the coordinator mutates, in one place.
#[derive(Debug, Getters)]
pub struct Session {
    /// User preferences.
    settings: Settings,
    /// Current game.
    turns: TurnController,
    /// Move countdown.
    timer: TimerController,
    /// Best-of-N progress.
    series: SeriesTracker,
    /// Cumulative scoreboard.
    score: MatchScore,
    /// Current generation; wake-ups from older ones are stale.
    generation: Generation,
    /// A finished series is waiting for its delayed reset.
    series_reset_pending: bool,
    #[getter(skip)]
    computer: ComputerPlayer,
}

impl Session {
    /// Session resuming persisted state with a fresh board.
    pub fn new(persisted: Persisted, computer: ComputerPlayer) -> Self {
        Self {
            settings: persisted.settings,
            turns: TurnController::new(),
            timer: TimerController::new(),
            series: persisted.series,
            score: persisted.score,
            generation: Generation::default(),
            series_reset_pending: false,
            computer,
        }
    }

    /// Invalidates every wake-up issued so far.
    pub(crate) fn bump_generation(&mut self) -> Generation {
        self.generation.advance();
        debug!(generation = self.generation.value(), "Generation advanced");
        self.generation
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub(crate) fn turns_mut(&mut self) -> &mut TurnController {
        &mut self.turns
    }

    pub(crate) fn timer_mut(&mut self) -> &mut TimerController {
        &mut self.timer
    }

    pub(crate) fn series_mut(&mut self) -> &mut SeriesTracker {
        &mut self.series
    }

    pub(crate) fn score_mut(&mut self) -> &mut MatchScore {
        &mut self.score
    }

    pub(crate) fn computer_mut(&mut self) -> &mut ComputerPlayer {
        &mut self.computer
    }

    pub(crate) fn set_series_reset_pending(&mut self, pending: bool) {
        self.series_reset_pending = pending;
    }
}
