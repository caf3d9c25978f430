//! Pure tic-tac-toe match logic.
//!
//! Everything here is synchronous and free of I/O:
//!
//! - **Rules**: win / draw detection over the eight fixed lines
//! - **Computer player**: random, heuristic and minimax strategies
//! - **Turns**: move application, undo and forfeit as a state machine
//! - **Timer**: token-guarded per-move countdown
//! - **Series / score**: best-of-N tracking and the running scoreboard
//!
//! Orchestration, scheduling and persistence live in `noughts_match`.
//!
//! # Example
//!
//! ```
//! use noughts_core::{GameEnd, Player, TurnController, TurnState};
//!
//! let mut turns = TurnController::new();
//! for (i, cell) in [4, 0, 2, 8, 6].into_iter().enumerate() {
//!     let player = if i % 2 == 0 { Player::X } else { Player::O };
//!     turns.apply_index(cell, player).unwrap();
//! }
//! match turns.state() {
//!     TurnState::GameOver(GameEnd::Line(win)) => {
//!         assert_eq!(win.player, Player::X);
//!         assert_eq!(win.pattern.indices(), [2, 4, 6]);
//!     }
//!     other => panic!("unexpected state {:?}", other),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod outcome;
mod position;
mod score;
mod series;
mod settings;
mod turn;
mod types;

pub mod ai;
pub mod rules;
pub mod timer;

pub use action::{Move, MoveError};
pub use ai::{ComputerPlayer, Difficulty, Strategy};
pub use outcome::{GameEnd, Outcome};
pub use position::Position;
pub use rules::{GameOutcome, WIN_PATTERNS, Win, WinPattern};
pub use score::MatchScore;
pub use series::{DEFAULT_BEST_OF, SeriesError, SeriesTracker, Wins};
pub use settings::{Mode, Settings};
pub use timer::{TimerController, TimerSettings, TimerSignal, TimerToken};
pub use turn::{TurnController, TurnState};
pub use types::{Board, BoardParseError, Player, Square};
