//! Turn controller and series tracker behaviour.

use noughts_core::{
    MatchScore, Move, MoveError, Outcome, Player, Position, SeriesTracker, TurnController, TurnState,
};

#[test]
fn test_undo_then_replay_restores_position() {
    // Every prefix of a long game: undo the last move, replay it, compare.
    let cells = [4, 0, 8, 2, 1, 7, 6, 3, 5];
    let mut turns = TurnController::new();
    for &cell in &cells {
        let Some(player) = turns.active_player() else {
            break;
        };
        turns.apply_index(cell, player).unwrap();
        if turns.is_over() {
            break;
        }

        let before = turns.clone();
        let undone = turns.undo().unwrap();
        assert_eq!(turns.active_player(), Some(undone.player));
        turns.apply_move(undone.position, undone.player).unwrap();
        assert_eq!(turns, before);
    }
}

#[test]
fn test_history_is_lifo() {
    let mut turns = TurnController::new();
    turns.apply_move(Position::Center, Player::X).unwrap();
    turns.apply_move(Position::TopLeft, Player::O).unwrap();
    turns.apply_move(Position::BottomRight, Player::X).unwrap();

    assert_eq!(turns.undo(), Ok(Move::new(Player::X, Position::BottomRight)));
    assert_eq!(turns.undo(), Ok(Move::new(Player::O, Position::TopLeft)));
    assert_eq!(turns.undo(), Ok(Move::new(Player::X, Position::Center)));
    assert_eq!(turns.undo(), Err(MoveError::EmptyHistory));
    assert_eq!(turns.state(), &TurnState::AwaitingMove(Player::X));
}

#[test]
fn test_best_of_three_needs_two_wins() {
    let mut series = SeriesTracker::new(3).unwrap();
    assert_eq!(series.target(), 2);

    series.record_game_result(Outcome::Winner(Player::X));
    assert_eq!(series.is_series_complete(), None);

    series.record_game_result(Outcome::Winner(Player::X));
    assert_eq!(series.is_series_complete(), Some(Player::X));
}

#[test]
fn test_target_reached_with_opponent_behind() {
    let mut series = SeriesTracker::new(5).unwrap();
    for outcome in [
        Outcome::Winner(Player::O),
        Outcome::Winner(Player::X),
        Outcome::Draw,
        Outcome::Winner(Player::O),
        Outcome::Winner(Player::X),
    ] {
        series.record_game_result(outcome);
        assert_eq!(series.is_series_complete(), None);
    }
    series.record_game_result(Outcome::Winner(Player::O));
    assert_eq!(series.is_series_complete(), Some(Player::O));
}

#[test]
fn test_reset_keeps_length() {
    let mut series = SeriesTracker::new(5).unwrap();
    series.record_game_result(Outcome::Winner(Player::O));
    series.reset();
    assert_eq!(series.wins().get(Player::O), 0);
    assert_eq!(series.best_of(), 5);
    assert_eq!(series.target(), 3);
}

#[test]
fn test_series_json_shape() {
    let mut series = SeriesTracker::new(5).unwrap();
    series.record_game_result(Outcome::Winner(Player::X));
    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "bestOf": 5, "target": 3, "wins": { "X": 1, "O": 0 } })
    );
}

#[test]
fn test_series_json_ignores_stored_target() {
    let series: SeriesTracker =
        serde_json::from_str(r#"{ "bestOf": 3, "target": 9, "wins": { "X": 1, "O": 1 } }"#).unwrap();
    assert_eq!(series.target(), 2);
    assert_eq!(series.wins().x, 1);
}

#[test]
fn test_series_json_rejects_zero_length() {
    let parsed = serde_json::from_str::<SeriesTracker>(r#"{ "bestOf": 0, "wins": { "X": 0, "O": 0 } }"#);
    assert!(parsed.is_err());
}

#[test]
fn test_score_json_shape() {
    let mut score = MatchScore::default();
    score.record(Outcome::Winner(Player::O));
    score.record(Outcome::Draw);
    let json = serde_json::to_value(score).unwrap();
    assert_eq!(json, serde_json::json!({ "X": 0, "O": 1, "D": 1 }));
}
