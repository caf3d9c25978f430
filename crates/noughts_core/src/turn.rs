//! Turn state machine.
//!
//! [`TurnController`] owns the board, the move history and whose turn it is.
//! Transitions:
//!
//! - `AwaitingMove(p)` --apply_move--> `Evaluating` --> `AwaitingMove(p')` | `GameOver`
//! - `AwaitingMove(p)` --undo--> `AwaitingMove(last mover)`
//! - `AwaitingMove(p)` --force_forfeit--> `GameOver(Forfeit)`
//!
//! `GameOver` is terminal; start a fresh controller for the next game.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::action::{Move, MoveError};
use crate::outcome::GameEnd;
use crate::position::Position;
use crate::rules::{self, GameOutcome};
use crate::types::{Board, Player, Square};

/// Phase of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for `Player` to move.
    AwaitingMove(Player),
    /// Transient while a placed move is evaluated; never observed between calls.
    Evaluating,
    /// Game finished.
    GameOver(GameEnd),
}

/// Owns board, history and turn order for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    board: Board,
    history: Vec<Move>,
    state: TurnState,
}

impl TurnController {
    /// Empty board, X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            state: TurnState::AwaitingMove(Player::X),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the current phase.
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    /// Player to move, or `None` once the game is over.
    pub fn active_player(&self) -> Option<Player> {
        match self.state {
            TurnState::AwaitingMove(player) => Some(player),
            _ => None,
        }
    }

    /// How the game ended, if it has.
    pub fn game_end(&self) -> Option<GameEnd> {
        match self.state {
            TurnState::GameOver(end) => Some(end),
            _ => None,
        }
    }

    /// True once the game reached `GameOver`.
    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::GameOver(_))
    }

    /// Places `player`'s mark at a raw cell index.
    ///
    /// # Errors
    ///
    /// [`MoveError::OutOfRange`] for indices above 8, otherwise as
    /// [`TurnController::apply_move`].
    #[instrument(skip(self))]
    pub fn apply_index(&mut self, index: usize, player: Player) -> Result<&TurnState, MoveError> {
        let position = Position::from_index(index).ok_or(MoveError::OutOfRange(index))?;
        self.apply_move(position, player)
    }

    /// Places `player`'s mark at `position` and evaluates the board.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game has finished
    /// - [`MoveError::SquareOccupied`] if the square is taken
    /// - [`MoveError::WrongPlayer`] if `player` is not the one to move
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, position: Position, player: Player) -> Result<&TurnState, MoveError> {
        let to_move = match self.state {
            TurnState::AwaitingMove(p) => p,
            _ => return Err(MoveError::GameOver),
        };
        if !self.board.is_empty(position) {
            return Err(MoveError::SquareOccupied(position));
        }
        if player != to_move {
            return Err(MoveError::WrongPlayer(player));
        }

        self.board.set(position, Square::Occupied(player));
        self.history.push(Move::new(player, position));
        self.state = TurnState::Evaluating;

        self.state = match rules::outcome(&self.board) {
            GameOutcome::Win(win) => TurnState::GameOver(GameEnd::Line(win)),
            GameOutcome::Draw => TurnState::GameOver(GameEnd::Draw),
            GameOutcome::InProgress => TurnState::AwaitingMove(player.opponent()),
        };
        debug!(state = ?self.state, "Move applied");

        assert_invariants(self);
        Ok(&self.state)
    }

    /// Takes back the most recent move.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after the game ended, [`MoveError::EmptyHistory`]
    /// when nothing has been played.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let last = self.history.pop().ok_or(MoveError::EmptyHistory)?;
        self.board.clear(last.position);
        self.state = TurnState::AwaitingMove(last.player);
        debug!(undone = %last, "Move undone");

        assert_invariants(self);
        Ok(last)
    }

    /// Ends the game immediately as a loss for `by`, whatever the board shows.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] if the game already ended.
    #[instrument(skip(self))]
    pub fn force_forfeit(&mut self, by: Player) -> Result<GameEnd, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let end = GameEnd::Forfeit {
            winner: by.opponent(),
            forfeited_by: by,
        };
        self.state = TurnState::GameOver(end);
        debug!(?end, "Game forfeited");
        Ok(end)
    }
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

/// Mark counts differ by at most one.
fn board_consistent(board: &Board) -> bool {
    let x_count = board.count(Player::X);
    let o_count = board.count(Player::O);
    let valid = x_count.abs_diff(o_count) <= 1;
    if !valid {
        warn!(x_count, o_count, "Board consistency violated");
    }
    valid
}

/// History length matches filled squares.
fn history_complete(turns: &TurnController) -> bool {
    let filled = turns
        .board
        .squares()
        .iter()
        .filter(|s| **s != Square::Empty)
        .count();
    let history_len = turns.history.len();
    let valid = filled == history_len;
    if !valid {
        warn!(filled, history_len, "History completeness violated");
    }
    valid
}

fn assert_invariants(turns: &TurnController) {
    debug_assert!(board_consistent(&turns.board), "Board consistency violated");
    debug_assert!(history_complete(turns), "History completeness violated");
}
