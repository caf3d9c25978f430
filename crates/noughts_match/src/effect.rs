//! Side effects requested by the coordinator.
//!
//! The coordinator never touches the outside world. It returns effects,
//! and the caller (usually [`crate::runtime`]) renders, plays sounds and
//! runs the timers.

use std::time::Duration;

use derive_new::new;
use noughts_core::{MatchScore, Move, Square, WinPattern, Wins};

use crate::input::Wakeup;

/// Tone of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    /// Whose turn it is and similar.
    Neutral,
    /// Someone the viewer roots for won.
    Win,
    /// The viewer lost or ran out of time.
    Lose,
    /// Nobody won.
    Draw,
}

/// Sound cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Sound {
    /// A mark was placed.
    Click,
    /// Game won.
    Win,
    /// Game lost.
    Lose,
    /// Game drawn.
    Draw,
}

/// Kinds of delayed work. At most one of each is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TaskKind {
    /// Computer thinking delay.
    ComputerMove,
    /// Next second of the move timer.
    TimerTick,
    /// Series winner announcement.
    SeriesBanner,
    /// Series wipe after the announcement.
    SeriesReset,
}

/// A wake-up to deliver after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Scheduled {
    /// Slot this task occupies; replaces any pending task of the same kind.
    pub kind: TaskKind,
    /// How long to wait.
    pub delay: Duration,
    /// Input delivered when due.
    pub wake: Wakeup,
}

/// One requested side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the grid.
    RenderBoard {
        /// Cell contents in index order.
        cells: [Square; 9],
        /// Cells that must not accept input.
        disabled: [bool; 9],
    },
    /// Replace the status line.
    RenderStatus {
        /// Message text.
        text: String,
        /// Tone.
        kind: StatusKind,
    },
    /// Highlight a completed line, or clear the highlight.
    RenderWinLine(Option<WinPattern>),
    /// Redraw the move list.
    RenderHistory(Vec<Move>),
    /// Redraw the scoreboard.
    RenderScoreboard(MatchScore),
    /// Redraw the series panel.
    RenderSeries {
        /// Wins so far.
        wins: Wins,
        /// Series length.
        best_of: u32,
        /// Wins needed.
        target: u32,
    },
    /// Show seconds left, or blank the timer.
    RenderTimer(Option<u32>),
    /// Play a sound cue.
    PlaySound(Sound),
    /// Show the banner.
    ShowCelebration {
        /// Headline.
        title: String,
        /// Secondary line.
        subtitle: String,
    },
    /// Burst of confetti.
    SpawnConfetti,
    /// Switch colour theme.
    ApplyTheme {
        /// Dark when true.
        dark: bool,
    },
    /// Deliver a wake-up later.
    Schedule(Scheduled),
    /// Drop the pending task of this kind, if any.
    Cancel(TaskKind),
}

impl Effect {
    /// Status line effect.
    pub fn status(text: impl Into<String>, kind: StatusKind) -> Self {
        Effect::RenderStatus {
            text: text.into(),
            kind,
        }
    }

    /// Celebration banner effect.
    pub fn celebration(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Effect::ShowCelebration {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}
