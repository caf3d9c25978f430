//! Events fed into the coordinator.

use noughts_core::{Difficulty, Mode, Player, TimerToken};

use crate::session::Generation;

/// External events plus the runtime's own wake-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A board cell was clicked or typed, 0..=8.
    CellChosen(usize),
    /// Start a fresh game.
    NewGame,
    /// Take back the last move (both moves in PvC).
    Undo,
    /// Opponent kind changed.
    ModeChanged(Mode),
    /// Computer strength changed.
    DifficultyChanged(Difficulty),
    /// Human mark changed.
    HumanSideChanged(Player),
    /// Move timer switched on or off.
    TimerEnabledChanged(bool),
    /// Seconds per move changed; clamped to 3..=120.
    TimerLengthChanged(u32),
    /// Series length changed.
    BestOfChanged(u32),
    /// Zero the series.
    ResetSeries,
    /// Zero the scoreboard.
    ResetScore,
    /// Flip sound effects.
    SoundToggled,
    /// Flip light/dark theme.
    ThemeToggled,
    /// Close the celebration banner and play again.
    CelebrationDismissed,
    /// A scheduled task came due.
    Wake(Wakeup),
}

/// Payload of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    /// Computer's thinking delay elapsed.
    ComputerMove {
        /// Session generation when scheduled.
        generation: Generation,
    },
    /// One timer interval elapsed.
    TimerTick(TimerToken),
    /// Time to announce the series winner.
    SeriesBanner {
        /// Session generation when scheduled.
        generation: Generation,
        /// Side whose win decided the series.
        champion: Player,
    },
    /// Time to clear the finished series.
    SeriesReset {
        /// Session generation when scheduled.
        generation: Generation,
    },
}
