//! Saving and restoring session state through a [`KeyValueStore`].
//!
//! Reads never fail: a missing key, a store error or an unparsable value
//! leaves the default in place. Write failures are logged and dropped.

use std::str::FromStr;

use noughts_core::{Difficulty, MatchScore, Mode, Player, SeriesTracker, Settings};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::store::KeyValueStore;

/// Opponent mode, `pvp` or `pvc`.
pub const MODE_KEY: &str = "noughts.mode";
/// Computer strength, `easy`, `normal` or `hard`.
pub const DIFFICULTY_KEY: &str = "noughts.difficulty";
/// Human mark in PvC, `X` or `O`.
pub const HUMAN_SIDE_KEY: &str = "noughts.human";
/// Scoreboard JSON, `{"X":..,"O":..,"D":..}`.
pub const SCORES_KEY: &str = "noughts.scores";
/// Series JSON, `{"bestOf":..,"target":..,"wins":{..}}`.
pub const SERIES_KEY: &str = "noughts.series";
/// Timer switch, `1` or `0`.
pub const TIMER_ENABLED_KEY: &str = "noughts.timerEnabled";
/// Seconds per move.
pub const TIME_PER_MOVE_KEY: &str = "noughts.timePerMove";
/// Sound switch, `1` or `0`.
pub const SOUND_KEY: &str = "noughts.soundOn";
/// Dark theme switch, `1` or `0`.
pub const THEME_KEY: &str = "noughts.themeDark";

/// Everything restored at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Persisted {
    /// User preferences.
    pub settings: Settings,
    /// Cumulative scoreboard.
    pub score: MatchScore,
    /// Series progress.
    pub series: SeriesTracker,
}

impl Persisted {
    /// Reads every key, falling back per value.
    #[instrument(skip(store))]
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings = Settings::default();
        if let Some(mode) = read(store, MODE_KEY, Mode::from_str) {
            settings.mode = mode;
        }
        if let Some(difficulty) = read(store, DIFFICULTY_KEY, Difficulty::from_str) {
            settings.difficulty = difficulty;
        }
        if let Some(side) = read(store, HUMAN_SIDE_KEY, Player::from_str) {
            settings.human_side = side;
        }
        if let Some(enabled) = read(store, TIMER_ENABLED_KEY, parse_flag) {
            settings.timer.set_enabled(enabled);
        }
        if let Some(seconds) = read(store, TIME_PER_MOVE_KEY, u32::from_str) {
            settings.timer.set_seconds_per_move(seconds);
        }
        if let Some(sound) = read(store, SOUND_KEY, parse_flag) {
            settings.sound_on = sound;
        }
        if let Some(dark) = read(store, THEME_KEY, parse_flag) {
            settings.dark_theme = dark;
        }

        let score = read(store, SCORES_KEY, parse_json::<MatchScore>).unwrap_or_default();
        let series = read(store, SERIES_KEY, parse_json::<SeriesTracker>).unwrap_or_default();

        debug!(?settings, ?score, ?series, "Restored persisted state");
        Self {
            settings,
            score,
            series,
        }
    }
}

/// Writes every settings key.
#[instrument(skip(store))]
pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) {
    write(store, MODE_KEY, &settings.mode.to_string());
    write(store, DIFFICULTY_KEY, &settings.difficulty.to_string());
    write(store, HUMAN_SIDE_KEY, &settings.human_side.to_string());
    write(store, TIMER_ENABLED_KEY, flag(settings.timer.enabled()));
    write(store, TIME_PER_MOVE_KEY, &settings.timer.seconds_per_move().to_string());
    write(store, SOUND_KEY, flag(settings.sound_on));
    write(store, THEME_KEY, flag(settings.dark_theme));
}

/// Writes the scoreboard.
#[instrument(skip(store))]
pub fn save_score(store: &mut dyn KeyValueStore, score: &MatchScore) {
    match serde_json::to_string(score) {
        Ok(json) => write(store, SCORES_KEY, &json),
        Err(e) => warn!(error = %e, "Failed to encode scores"),
    }
}

/// Writes the series.
#[instrument(skip(store))]
pub fn save_series(store: &mut dyn KeyValueStore, series: &SeriesTracker) {
    match serde_json::to_string(series) {
        Ok(json) => write(store, SERIES_KEY, &json),
        Err(e) => warn!(error = %e, "Failed to encode series"),
    }
}

fn read<T, E: std::fmt::Display>(
    store: &dyn KeyValueStore,
    key: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            debug!(key, error = %e, "Store read failed, using default");
            return None;
        }
    };
    match parse(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(key, raw = %raw, error = %e, "Malformed stored value, using default");
            None
        }
    }
}

fn write(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "Failed to persist value");
    }
}

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(format!("expected 1 or 0, got {:?}", other)),
    }
}

fn flag(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use noughts_core::Outcome;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Persisted::load(&store), Persisted::default());
    }

    #[test]
    fn test_settings_survive_a_save() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.mode = Mode::PlayerVsPlayer;
        settings.difficulty = Difficulty::Hard;
        settings.human_side = Player::O;
        settings.timer.set_enabled(true);
        settings.timer.set_seconds_per_move(42);
        settings.sound_on = false;
        settings.dark_theme = true;
        save_settings(&mut store, &settings);

        assert_eq!(Persisted::load(&store).settings, settings);
        assert_eq!(store.get(TIMER_ENABLED_KEY).unwrap().as_deref(), Some("1"));
        assert_eq!(store.get(MODE_KEY).unwrap().as_deref(), Some("pvp"));
    }

    #[test]
    fn test_each_bad_value_falls_back_alone() {
        let mut store = MemoryStore::new();
        store.set(MODE_KEY, "chess").unwrap();
        store.set(DIFFICULTY_KEY, "hard").unwrap();
        store.set(TIME_PER_MOVE_KEY, "soon").unwrap();
        store.set(SOUND_KEY, "yes").unwrap();
        store.set(SCORES_KEY, "{").unwrap();
        store.set(SERIES_KEY, r#"{"bestOf":0,"wins":{"X":1,"O":0}}"#).unwrap();

        let loaded = Persisted::load(&store);
        assert_eq!(loaded.settings.mode, Mode::PlayerVsComputer);
        assert_eq!(loaded.settings.difficulty, Difficulty::Hard);
        assert_eq!(loaded.settings.timer.seconds_per_move(), 15);
        assert!(loaded.settings.sound_on);
        assert_eq!(loaded.score, MatchScore::default());
        assert_eq!(loaded.series, SeriesTracker::default());
    }

    #[test]
    fn test_stored_time_is_clamped() {
        let mut store = MemoryStore::new();
        store.set(TIME_PER_MOVE_KEY, "1000").unwrap();
        assert_eq!(Persisted::load(&store).settings.timer.seconds_per_move(), 120);
    }

    #[test]
    fn test_score_and_series_round_trip() {
        let mut store = MemoryStore::new();
        let mut score = MatchScore::default();
        score.record(Outcome::Draw);
        let mut series = SeriesTracker::new(5).unwrap();
        series.record_game_result(Outcome::Winner(Player::O));
        save_score(&mut store, &score);
        save_series(&mut store, &series);

        let loaded = Persisted::load(&store);
        assert_eq!(loaded.score, score);
        assert_eq!(loaded.series, series);
    }
}
