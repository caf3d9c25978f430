//! Match coordination for noughts.
//!
//! [`MatchCoordinator`] ties the pure game pieces from `noughts_core`
//! together: turns, the computer opponent, the move timer, the series and
//! the scoreboard. It consumes [`Input`]s and produces [`Effect`]s.
//! [`runtime`] drives it on tokio, turning scheduled effects into real
//! delays.
//!
//! # Example
//!
//! ```
//! use noughts_match::{Effect, Input, MatchConfig, MatchCoordinator, MemoryStore};
//!
//! let mut coordinator = MatchCoordinator::new(MatchConfig::default(), Box::new(MemoryStore::new()));
//! coordinator.start();
//! let effects = coordinator.handle(Input::CellChosen(4));
//! assert!(effects.iter().any(|e| matches!(e, Effect::Schedule(_))));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod coordinator;
mod effect;
mod input;
mod session;
mod store;

pub mod persist;
pub mod runtime;

pub use config::{ConfigError, MatchConfig};
pub use coordinator::MatchCoordinator;
pub use effect::{Effect, Scheduled, Sound, StatusKind, TaskKind};
pub use input::{Input, Wakeup};
pub use persist::Persisted;
pub use runtime::{MatchHandle, MatchRuntime};
pub use session::{Generation, Session};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
