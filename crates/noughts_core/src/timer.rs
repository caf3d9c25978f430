//! Per-move countdown.
//!
//! [`TimerController`] is a pure countdown model: it never sleeps. Whoever
//! drives it delivers one [`TimerController::tick`] per elapsed second,
//! passing back the [`TimerToken`] handed out by `start`. Restarting or
//! stopping the countdown invalidates every earlier token, so a tick that
//! was already in flight is ignored instead of counting against the next
//! player.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::Player;

/// Shortest allowed move time, in seconds.
pub const MIN_SECONDS_PER_MOVE: u32 = 3;
/// Longest allowed move time, in seconds.
pub const MAX_SECONDS_PER_MOVE: u32 = 120;
/// Default move time, in seconds.
pub const DEFAULT_SECONDS_PER_MOVE: u32 = 15;

/// User-facing timer configuration.
///
/// Deserialization goes through [`TimerSettings::new`], so a stored move
/// time outside 3..=120 seconds is clamped on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TimerRecord")]
pub struct TimerSettings {
    enabled: bool,
    seconds_per_move: u32,
}

impl TimerSettings {
    /// Builds settings, clamping the move time to 3..=120 seconds.
    pub fn new(enabled: bool, seconds_per_move: u32) -> Self {
        Self {
            enabled,
            seconds_per_move: clamp_seconds(seconds_per_move),
        }
    }

    /// Whether moves are timed at all.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds each player gets per move.
    pub fn seconds_per_move(&self) -> u32 {
        self.seconds_per_move
    }

    /// Turns the timer on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sets the move time, clamped to 3..=120 seconds.
    pub fn set_seconds_per_move(&mut self, seconds: u32) {
        self.seconds_per_move = clamp_seconds(seconds);
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            seconds_per_move: DEFAULT_SECONDS_PER_MOVE,
        }
    }
}

/// Raw serialized form of [`TimerSettings`].
#[derive(Deserialize)]
struct TimerRecord {
    enabled: bool,
    seconds_per_move: u32,
}

impl From<TimerRecord> for TimerSettings {
    fn from(record: TimerRecord) -> Self {
        Self::new(record.enabled, record.seconds_per_move)
    }
}

/// Clamps a move time to the supported range.
pub fn clamp_seconds(seconds: u32) -> u32 {
    seconds.clamp(MIN_SECONDS_PER_MOVE, MAX_SECONDS_PER_MOVE)
}

/// Identifies one run of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// What a tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    /// One second elapsed; `remaining` seconds are left.
    Tick {
        /// Player being timed.
        owner: Player,
        /// Seconds left, always > 0.
        remaining: u32,
    },
    /// Time ran out; the countdown has stopped.
    Expired {
        /// Player who ran out of time.
        owner: Player,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Countdown {
    owner: Player,
    remaining: u32,
}

/// At most one active countdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerController {
    generation: u64,
    running: Option<Countdown>,
}

impl TimerController {
    /// Stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting down `seconds` for `owner`, replacing any prior run.
    #[instrument(skip(self))]
    pub fn start(&mut self, owner: Player, seconds: u32) -> TimerToken {
        self.generation += 1;
        self.running = Some(Countdown {
            owner,
            remaining: seconds,
        });
        debug!(generation = self.generation, "Timer started");
        TimerToken(self.generation)
    }

    /// Cancels the countdown. Safe to call when nothing is running.
    #[instrument(skip(self))]
    pub fn stop(&mut self) {
        if self.running.take().is_some() {
            debug!(generation = self.generation, "Timer stopped");
        }
        self.generation += 1;
    }

    /// Advances the countdown by one second.
    ///
    /// Returns `None` for stale tokens or when stopped.
    #[instrument(skip(self))]
    pub fn tick(&mut self, token: TimerToken) -> Option<TimerSignal> {
        if token.0 != self.generation {
            debug!(current = self.generation, "Stale timer tick ignored");
            return None;
        }
        let countdown = self.running.as_mut()?;
        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining == 0 {
            let owner = countdown.owner;
            self.running = None;
            debug!(?owner, "Timer expired");
            Some(TimerSignal::Expired { owner })
        } else {
            Some(TimerSignal::Tick {
                owner: countdown.owner,
                remaining: countdown.remaining,
            })
        }
    }

    /// Whether a countdown is active.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Player being timed, if running.
    pub fn owner(&self) -> Option<Player> {
        self.running.map(|c| c.owner)
    }

    /// Seconds left, if running.
    pub fn remaining(&self) -> Option<u32> {
        self.running.map(|c| c.remaining)
    }
}
