//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::types::{Board, Player, Square};

/// One of the eight fixed lines: three rows, three columns, two diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinPattern(pub [Position; 3]);

impl WinPattern {
    /// Positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// Board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Whether `pos` lies on this line.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// All win patterns, scanned in this order: rows, columns, diagonals.
pub const WIN_PATTERNS: [WinPattern; 8] = [
    // Rows
    WinPattern([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinPattern([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinPattern([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    WinPattern([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinPattern([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinPattern([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    WinPattern([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinPattern([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// A completed line and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    /// Player holding all three squares.
    pub player: Player,
    /// The completed line.
    pub pattern: WinPattern,
}

/// Returns the first completed line, in pattern order.
///
/// Not instrumented: the minimax search calls this at every node.
pub fn winner(board: &Board) -> Option<Win> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        let [a, b, c] = pattern.0;
        match board.get(a) {
            Square::Occupied(player) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
                Some(Win {
                    player,
                    pattern: *pattern,
                })
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board: Board = "XXX.O.O..".parse().unwrap();
        let win = winner(&board).unwrap();
        assert_eq!(win.player, Player::X);
        assert_eq!(win.pattern.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_column() {
        let board: Board = ".OX.OX.O.".parse().unwrap();
        let win = winner(&board).unwrap();
        assert_eq!(win.player, Player::O);
        assert_eq!(win.pattern.indices(), [1, 4, 7]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board: Board = "O.X.X.XO.".parse().unwrap();
        let win = winner(&board).unwrap();
        assert_eq!(win.player, Player::X);
        assert_eq!(win.pattern.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board: Board = "XX.......".parse().unwrap();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XOX......".parse().unwrap();
        assert_eq!(winner(&board), None);
    }
}
