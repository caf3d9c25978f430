//! Match orchestration.
//!
//! [`MatchCoordinator`] turns one [`Input`] into a list of [`Effect`]s.
//! It owns the [`Session`] and the store and is never shared, so each
//! `handle` call is a complete transition. Delays are not awaited here:
//! the coordinator asks for a [`Scheduled`] wake-up and checks, when the
//! wake-up arrives, that the session generation or timer token it carried
//! is still current.

use noughts_core::{
    ComputerPlayer, GameEnd, Player, Position, Settings, Square, TimerSignal, TimerToken,
    TurnController,
};
use tracing::{debug, error, info, instrument};

use crate::config::MatchConfig;
use crate::effect::{Effect, Scheduled, Sound, StatusKind, TaskKind};
use crate::input::{Input, Wakeup};
use crate::persist::{self, Persisted};
use crate::session::{Generation, Session};
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};

/// Drives one match session.
pub struct MatchCoordinator {
    config: MatchConfig,
    session: Session,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for MatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCoordinator")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl MatchCoordinator {
    /// Restores persisted state from `store`.
    ///
    /// No game is running until [`MatchCoordinator::start`] is called.
    #[instrument(skip(store))]
    pub fn new(config: MatchConfig, store: Box<dyn KeyValueStore>) -> Self {
        let persisted = Persisted::load(store.as_ref());
        let computer = match config.rng_seed() {
            Some(seed) => ComputerPlayer::seeded(*seed),
            None => ComputerPlayer::new(),
        };
        info!(settings = ?persisted.settings, "Match coordinator ready");
        Self {
            config,
            session: Session::new(persisted, computer),
            store,
        }
    }

    /// Opens the file store named by the config, or an in-memory one.
    ///
    /// # Errors
    ///
    /// Fails when the store file exists but cannot be read.
    #[instrument]
    pub fn open(config: MatchConfig) -> Result<Self, StoreError> {
        let store: Box<dyn KeyValueStore> = match config.store_path() {
            Some(path) => Box::new(JsonFileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };
        Ok(Self::new(config, store))
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Renders every panel and starts the first game.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Vec<Effect> {
        let mut fx = vec![
            Effect::ApplyTheme {
                dark: self.session.settings().dark_theme,
            },
            Effect::RenderScoreboard(*self.session.score()),
        ];
        self.render_series(&mut fx);
        self.new_game(&mut fx);
        fx
    }

    /// Applies one input.
    #[instrument(skip(self))]
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        let mut fx = Vec::new();
        match input {
            Input::CellChosen(index) => self.cell_chosen(index, &mut fx),
            Input::NewGame | Input::CelebrationDismissed => self.new_game(&mut fx),
            Input::Undo => self.undo(&mut fx),
            Input::ModeChanged(mode) => self.change_settings(&mut fx, |s| s.mode = mode),
            Input::DifficultyChanged(difficulty) => {
                self.change_settings(&mut fx, |s| s.difficulty = difficulty)
            }
            Input::HumanSideChanged(side) => self.change_settings(&mut fx, |s| s.human_side = side),
            Input::TimerEnabledChanged(enabled) => {
                self.change_settings(&mut fx, |s| s.timer.set_enabled(enabled))
            }
            Input::TimerLengthChanged(seconds) => {
                self.change_settings(&mut fx, |s| s.timer.set_seconds_per_move(seconds))
            }
            Input::BestOfChanged(best_of) => self.change_best_of(best_of, &mut fx),
            Input::ResetSeries => self.clear_series(&mut fx),
            Input::ResetScore => {
                self.session.score_mut().reset();
                persist::save_score(self.store.as_mut(), self.session.score());
                fx.push(Effect::RenderScoreboard(*self.session.score()));
            }
            Input::SoundToggled => {
                let settings = self.session.settings_mut();
                settings.sound_on = !settings.sound_on;
                self.save_settings();
            }
            Input::ThemeToggled => {
                let settings = self.session.settings_mut();
                settings.dark_theme = !settings.dark_theme;
                fx.push(Effect::ApplyTheme {
                    dark: settings.dark_theme,
                });
                self.save_settings();
            }
            Input::Wake(Wakeup::ComputerMove { generation }) => self.computer_move(generation, &mut fx),
            Input::Wake(Wakeup::TimerTick(token)) => self.timer_tick(token, &mut fx),
            Input::Wake(Wakeup::SeriesBanner { generation, champion }) => {
                self.series_banner(generation, champion, &mut fx)
            }
            Input::Wake(Wakeup::SeriesReset { generation }) => {
                if generation == *self.session.generation() {
                    self.clear_series(&mut fx);
                } else {
                    debug!("Stale series reset ignored");
                }
            }
        }
        fx
    }

    fn new_game(&mut self, fx: &mut Vec<Effect>) {
        let generation = self.session.bump_generation();
        fx.push(Effect::Cancel(TaskKind::ComputerMove));
        self.stop_timer(fx);
        if *self.session.series_reset_pending() {
            self.clear_series(fx);
        }

        *self.session.turns_mut() = TurnController::new();
        fx.push(Effect::RenderWinLine(None));
        self.render_board(fx);
        self.render_history(fx);
        if !self.session.settings().timer.enabled() {
            fx.push(Effect::RenderTimer(None));
        }

        let first = Player::X;
        if self.session.settings().is_computer(first) {
            fx.push(Effect::status(format!("Computer starts as {}", first), StatusKind::Neutral));
            self.schedule_computer(generation, self.config.opening_delay(), fx);
        } else {
            fx.push(Effect::status(self.turn_status(first), StatusKind::Neutral));
        }
        self.start_timer(fx);
        debug!(generation = generation.value(), "New game");
    }

    fn cell_chosen(&mut self, index: usize, fx: &mut Vec<Effect>) {
        let turns = self.session.turns();
        let Some(player) = turns.active_player() else {
            debug!(index, "Game over, cell ignored");
            return;
        };
        if self.session.settings().is_computer(player) {
            debug!(index, "Computer to move, cell ignored");
            return;
        }
        let Some(position) = Position::from_index(index) else {
            debug!(index, "Cell out of range");
            return;
        };
        if !turns.board().is_empty(position) {
            debug!(index, "Cell occupied");
            return;
        }
        self.play(position, player, fx);
    }

    fn computer_move(&mut self, generation: Generation, fx: &mut Vec<Effect>) {
        if generation != *self.session.generation() {
            debug!(stale = generation.value(), "Stale computer move ignored");
            return;
        }
        let Some(player) = self.session.turns().active_player() else {
            debug!("Game over, computer move ignored");
            return;
        };
        if !self.session.settings().is_computer(player) {
            debug!(%player, "Human to move, computer move ignored");
            return;
        }

        let difficulty = self.session.settings().difficulty;
        let board = self.session.turns().board().clone();
        match self.session.computer_mut().choose_move(&board, player, difficulty) {
            Some(position) => self.play(position, player, fx),
            None => error!(%board, "Computer asked to move on a full board"),
        }
    }

    /// Places a mark and hands the turn over or ends the game.
    fn play(&mut self, position: Position, player: Player, fx: &mut Vec<Effect>) {
        if let Err(e) = self.session.turns_mut().apply_move(position, player) {
            debug!(error = %e, "Move rejected");
            return;
        }
        self.stop_timer(fx);
        self.sound(Sound::Click, fx);
        self.render_board(fx);
        self.render_history(fx);

        if let Some(end) = self.session.turns().game_end() {
            self.finish(end, fx);
            return;
        }
        let Some(next) = self.session.turns().active_player() else {
            return;
        };
        fx.push(Effect::status(self.turn_status(next), StatusKind::Neutral));
        if self.session.settings().is_computer(next) {
            let generation = *self.session.generation();
            self.schedule_computer(generation, self.config.reply_delay(), fx);
        }
        self.start_timer(fx);
    }

    fn undo(&mut self, fx: &mut Vec<Effect>) {
        let turns = self.session.turns();
        if turns.is_over() || turns.history().is_empty() {
            debug!("Nothing to undo");
            return;
        }
        let generation = self.session.bump_generation();
        fx.push(Effect::Cancel(TaskKind::ComputerMove));
        self.stop_timer(fx);

        // Pop until the human is to move, or the history runs out.
        loop {
            match self.session.turns_mut().undo() {
                Ok(undone) => debug!(%undone, "Move undone"),
                Err(e) => {
                    debug!(error = %e, "Undo stopped");
                    break;
                }
            }
            let turns = self.session.turns();
            match turns.active_player() {
                Some(p) if self.session.settings().is_computer(p) && !turns.history().is_empty() => {}
                _ => break,
            }
        }

        self.render_board(fx);
        self.render_history(fx);
        if let Some(next) = self.session.turns().active_player() {
            fx.push(Effect::status(self.turn_status(next), StatusKind::Neutral));
            if self.session.settings().is_computer(next) {
                self.schedule_computer(generation, self.config.opening_delay(), fx);
            }
        }
        self.start_timer(fx);
    }

    fn timer_tick(&mut self, token: TimerToken, fx: &mut Vec<Effect>) {
        match self.session.timer_mut().tick(token) {
            None => {}
            Some(TimerSignal::Tick { remaining, .. }) => {
                fx.push(Effect::RenderTimer(Some(remaining)));
                fx.push(Effect::Schedule(Scheduled::new(
                    TaskKind::TimerTick,
                    self.config.tick_interval(),
                    Wakeup::TimerTick(token),
                )));
            }
            Some(TimerSignal::Expired { owner }) => {
                fx.push(Effect::RenderTimer(Some(0)));
                self.time_up(owner, fx);
            }
        }
    }

    fn time_up(&mut self, owner: Player, fx: &mut Vec<Effect>) {
        match self.session.turns_mut().force_forfeit(owner) {
            Ok(end) => {
                info!(%owner, "Move timer expired");
                fx.push(Effect::status(format!("Time up! {} timed out.", owner), StatusKind::Lose));
                self.sound(Sound::Lose, fx);
                self.finish(end, fx);
            }
            Err(e) => debug!(error = %e, "Forfeit rejected"),
        }
    }

    fn finish(&mut self, end: GameEnd, fx: &mut Vec<Effect>) {
        self.stop_timer(fx);
        fx.push(Effect::Cancel(TaskKind::ComputerMove));

        let outcome = end.outcome();
        self.session.score_mut().record(outcome);
        self.session.series_mut().record_game_result(outcome);
        persist::save_score(self.store.as_mut(), self.session.score());
        persist::save_series(self.store.as_mut(), self.session.series());

        self.render_board(fx);
        if let Some(win) = end.win_line() {
            fx.push(Effect::RenderWinLine(Some(win.pattern)));
        }

        let (status, title, subtitle, kind, sound) = match outcome.winner() {
            None => (
                "It's a draw".to_string(),
                "Draw!".to_string(),
                "So close! Rematch?",
                StatusKind::Draw,
                Sound::Draw,
            ),
            Some(winner) => {
                let (title, subtitle, kind, sound) = match self.session.settings().computer_side() {
                    Some(computer) if computer == winner => {
                        ("You Lose".to_string(), "Try again!", StatusKind::Lose, Sound::Lose)
                    }
                    Some(_) => (
                        "You Win!".to_string(),
                        "Nice one, keep going!",
                        StatusKind::Win,
                        Sound::Win,
                    ),
                    None => (
                        format!("Player {} Wins!", winner),
                        "Great match!",
                        StatusKind::Win,
                        Sound::Win,
                    ),
                };
                (title.clone(), title, subtitle, kind, sound)
            }
        };
        fx.push(Effect::status(status, kind));
        self.sound(sound, fx);
        fx.push(Effect::celebration(title, subtitle));
        fx.push(Effect::SpawnConfetti);
        fx.push(Effect::RenderScoreboard(*self.session.score()));
        self.render_series(fx);
        info!(?end, "Game over");

        // Only the side that just won can have decided the series.
        if let Some(champion) = outcome.winner()
            && self.session.series().has_reached_target(champion)
        {
            info!(%champion, "Series decided");
            self.session.set_series_reset_pending(true);
            let generation = *self.session.generation();
            fx.push(Effect::Schedule(Scheduled::new(
                TaskKind::SeriesBanner,
                self.config.series_banner_delay(),
                Wakeup::SeriesBanner { generation, champion },
            )));
        }
    }

    fn series_banner(&mut self, generation: Generation, champion: Player, fx: &mut Vec<Effect>) {
        if generation != *self.session.generation() {
            debug!("Stale series banner ignored");
            return;
        }
        if !self.session.series().has_reached_target(champion) {
            debug!(%champion, "Series no longer won, banner dropped");
            self.session.set_series_reset_pending(false);
            return;
        }
        let series = self.session.series();
        fx.push(Effect::celebration(
            format!("Series Winner: {}", champion),
            format!(
                "{} reached {} of {}",
                champion,
                series.wins().get(champion),
                series.best_of()
            ),
        ));
        fx.push(Effect::SpawnConfetti);
        fx.push(Effect::Schedule(Scheduled::new(
            TaskKind::SeriesReset,
            self.config.series_reset_delay(),
            Wakeup::SeriesReset { generation },
        )));
    }

    fn change_settings(&mut self, fx: &mut Vec<Effect>, update: impl FnOnce(&mut Settings)) {
        update(self.session.settings_mut());
        debug!(settings = ?self.session.settings(), "Settings changed");
        self.save_settings();
        self.new_game(fx);
    }

    fn change_best_of(&mut self, best_of: u32, fx: &mut Vec<Effect>) {
        if let Err(e) = self.session.series_mut().set_best_of(best_of) {
            debug!(best_of, error = %e, "Series length rejected");
            return;
        }
        persist::save_series(self.store.as_mut(), self.session.series());
        self.render_series(fx);
    }

    fn clear_series(&mut self, fx: &mut Vec<Effect>) {
        self.session.series_mut().reset();
        self.session.set_series_reset_pending(false);
        fx.push(Effect::Cancel(TaskKind::SeriesBanner));
        fx.push(Effect::Cancel(TaskKind::SeriesReset));
        persist::save_series(self.store.as_mut(), self.session.series());
        self.render_series(fx);
        info!("Series reset");
    }

    fn save_settings(&mut self) {
        persist::save_settings(self.store.as_mut(), self.session.settings());
    }

    fn start_timer(&mut self, fx: &mut Vec<Effect>) {
        let timer = self.session.settings().timer;
        if !timer.enabled() {
            return;
        }
        let Some(owner) = self.session.turns().active_player() else {
            return;
        };
        let token = self.session.timer_mut().start(owner, timer.seconds_per_move());
        fx.push(Effect::RenderTimer(Some(timer.seconds_per_move())));
        fx.push(Effect::Schedule(Scheduled::new(
            TaskKind::TimerTick,
            self.config.tick_interval(),
            Wakeup::TimerTick(token),
        )));
    }

    fn stop_timer(&mut self, fx: &mut Vec<Effect>) {
        self.session.timer_mut().stop();
        fx.push(Effect::Cancel(TaskKind::TimerTick));
    }

    fn schedule_computer(&self, generation: Generation, delay: std::time::Duration, fx: &mut Vec<Effect>) {
        fx.push(Effect::Schedule(Scheduled::new(
            TaskKind::ComputerMove,
            delay,
            Wakeup::ComputerMove { generation },
        )));
    }

    fn sound(&self, sound: Sound, fx: &mut Vec<Effect>) {
        if self.session.settings().sound_on {
            fx.push(Effect::PlaySound(sound));
        }
    }

    fn turn_status(&self, player: Player) -> String {
        match self.session.settings().computer_side() {
            None => format!("Player {}'s turn", player),
            Some(computer) if computer == player => "Computer's move...".to_string(),
            Some(_) => format!("Your move: {}", player),
        }
    }

    fn render_board(&self, fx: &mut Vec<Effect>) {
        let turns = self.session.turns();
        let cells = *turns.board().squares();
        let over = turns.is_over();
        fx.push(Effect::RenderBoard {
            cells,
            disabled: cells.map(|cell| over || cell != Square::Empty),
        });
    }

    fn render_history(&self, fx: &mut Vec<Effect>) {
        fx.push(Effect::RenderHistory(self.session.turns().history().to_vec()));
    }

    fn render_series(&self, fx: &mut Vec<Effect>) {
        let series = self.session.series();
        fx.push(Effect::RenderSeries {
            wins: series.wins(),
            best_of: series.best_of(),
            target: series.target(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::Mode;

    fn pvp() -> MatchCoordinator {
        let mut store = MemoryStore::new();
        store.set(persist::MODE_KEY, "pvp").unwrap();
        let mut coordinator = MatchCoordinator::new(MatchConfig::default(), Box::new(store));
        coordinator.start();
        coordinator
    }

    fn statuses(fx: &[Effect]) -> Vec<&str> {
        fx.iter()
            .filter_map(|e| match e {
                Effect::RenderStatus { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_pvp_turns_alternate() {
        let mut coordinator = pvp();
        assert_eq!(coordinator.session().settings().mode, Mode::PlayerVsPlayer);
        let fx = coordinator.handle(Input::CellChosen(4));
        assert_eq!(statuses(&fx), vec!["Player O's turn"]);
        assert!(fx.contains(&Effect::PlaySound(Sound::Click)));
    }

    #[test]
    fn test_occupied_and_out_of_range_cells_are_no_ops() {
        let mut coordinator = pvp();
        coordinator.handle(Input::CellChosen(4));
        assert!(coordinator.handle(Input::CellChosen(4)).is_empty());
        assert!(coordinator.handle(Input::CellChosen(9)).is_empty());
        assert_eq!(coordinator.session().turns().history().len(), 1);
    }

    #[test]
    fn test_board_disables_occupied_cells() {
        let mut coordinator = pvp();
        let fx = coordinator.handle(Input::CellChosen(2));
        let disabled = fx.iter().find_map(|e| match e {
            Effect::RenderBoard { disabled, .. } => Some(*disabled),
            _ => None,
        });
        let mut expected = [false; 9];
        expected[2] = true;
        assert_eq!(disabled, Some(expected));
    }

    #[test]
    fn test_sound_toggle_silences_clicks() {
        let mut coordinator = pvp();
        assert!(coordinator.handle(Input::SoundToggled).is_empty());
        let fx = coordinator.handle(Input::CellChosen(0));
        assert!(!fx.iter().any(|e| matches!(e, Effect::PlaySound(_))));
    }

    #[test]
    fn test_theme_toggle_applies_theme() {
        let mut coordinator = pvp();
        assert_eq!(
            coordinator.handle(Input::ThemeToggled),
            vec![Effect::ApplyTheme { dark: true }]
        );
    }
}
