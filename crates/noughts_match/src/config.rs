//! Match configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Timing and wiring knobs for a match.
///
/// Every field has a default, so an empty TOML file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Delay before the computer opens a game, in milliseconds.
    #[serde(default = "default_opening_delay_ms")]
    computer_opening_delay_ms: u64,

    /// Delay before the computer answers a human move, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    computer_reply_delay_ms: u64,

    /// Pause between a series-deciding game and the series banner.
    #[serde(default = "default_series_banner_delay_ms")]
    series_banner_delay_ms: u64,

    /// How long the series banner stays up before the series resets.
    #[serde(default = "default_series_reset_delay_ms")]
    series_reset_delay_ms: u64,

    /// Length of one timer tick, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// Seed for the computer player; entropy when absent.
    #[serde(default)]
    rng_seed: Option<u64>,

    /// File backing the persistent store; in-memory when absent.
    #[serde(default)]
    store_path: Option<PathBuf>,
}

fn default_opening_delay_ms() -> u64 {
    250
}

fn default_reply_delay_ms() -> u64 {
    220
}

fn default_series_banner_delay_ms() -> u64 {
    900
}

fn default_series_reset_delay_ms() -> u64 {
    2200
}

fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            computer_opening_delay_ms: default_opening_delay_ms(),
            computer_reply_delay_ms: default_reply_delay_ms(),
            series_banner_delay_ms: default_series_banner_delay_ms(),
            series_reset_delay_ms: default_series_reset_delay_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            rng_seed: None,
            store_path: None,
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Computer opening delay.
    pub fn opening_delay(&self) -> Duration {
        Duration::from_millis(self.computer_opening_delay_ms)
    }

    /// Computer reply delay.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.computer_reply_delay_ms)
    }

    /// Series banner delay.
    pub fn series_banner_delay(&self) -> Duration {
        Duration::from_millis(self.series_banner_delay_ms)
    }

    /// Series reset delay.
    pub fn series_reset_delay(&self) -> Duration {
        Duration::from_millis(self.series_reset_delay_ms)
    }

    /// Timer tick length.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = MatchConfig::from_toml("").unwrap();
        assert_eq!(config, MatchConfig::default());
        assert_eq!(config.reply_delay(), Duration::from_millis(220));
    }

    #[test]
    fn test_partial_toml() {
        let config = MatchConfig::from_toml("tick_interval_ms = 250\nrng_seed = 9\n").unwrap();
        assert_eq!(*config.tick_interval_ms(), 250);
        assert_eq!(*config.rng_seed(), Some(9));
        assert_eq!(*config.computer_opening_delay_ms(), 250);
    }

    #[test]
    fn test_bad_toml_reports_error() {
        let err = MatchConfig::from_toml("tick_interval_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_setters_chain() {
        let config = MatchConfig::default()
            .with_rng_seed(Some(3))
            .with_computer_reply_delay_ms(0);
        assert_eq!(*config.rng_seed(), Some(3));
        assert_eq!(config.reply_delay(), Duration::ZERO);
    }
}
