//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are separated from board
//! storage and turn sequencing so the computer player can search with them
//! directly. Every function is total over any 9-cell board.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WIN_PATTERNS, Win, WinPattern, winner};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::Board;

/// Evaluation of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// A player completed a win pattern.
    Win(Win),
    /// Board is full with no win pattern completed.
    Draw,
    /// Play continues.
    InProgress,
}

/// Evaluates the board: win, then draw, then in progress.
#[instrument(skip(board))]
pub fn outcome(board: &Board) -> GameOutcome {
    if let Some(win) = winner(board) {
        GameOutcome::Win(win)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(outcome(&Board::new()), GameOutcome::InProgress);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(outcome(&board), GameOutcome::Draw);
    }

    #[test]
    fn test_win_on_full_board_beats_draw() {
        let board: Board = "XXXOOXXOO".parse().unwrap();
        match outcome(&board) {
            GameOutcome::Win(win) => assert_eq!(win.player, Player::X),
            other => panic!("expected win, got {:?}", other),
        }
    }
}
