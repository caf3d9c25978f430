//! Normal: fixed rule priority.

use rand::RngCore;
use rand::seq::SliceRandom;

use super::Strategy;
use crate::position::Position;
use crate::rules::WIN_PATTERNS;
use crate::types::{Board, Player, Square};

/// Win, block, centre, random corner, random edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl Strategy for HeuristicStrategy {
    fn choose(&self, board: &Board, ai: Player, rng: &mut dyn RngCore) -> Option<Position> {
        if let Some(win) = tactical_move(board, ai) {
            return Some(win);
        }
        if let Some(block) = tactical_move(board, ai.opponent()) {
            return Some(block);
        }
        if board.is_empty(Position::Center) {
            return Some(Position::Center);
        }
        let corners: Vec<Position> = Position::CORNERS
            .into_iter()
            .filter(|p| board.is_empty(*p))
            .collect();
        if let Some(corner) = corners.choose(rng) {
            return Some(*corner);
        }
        let edges: Vec<Position> = Position::EDGES
            .into_iter()
            .filter(|p| board.is_empty(*p))
            .collect();
        edges.choose(rng).copied()
    }
}

/// Empty square completing a line that already holds two of `player`'s marks.
///
/// Patterns are scanned in their fixed order; the first match wins.
pub fn tactical_move(board: &Board, player: Player) -> Option<Position> {
    WIN_PATTERNS.iter().find_map(|pattern| {
        let squares = pattern.positions().map(|p| board.get(p));
        let own = squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count();
        let empty = squares.iter().position(|s| *s == Square::Empty);
        let empties = squares.iter().filter(|s| **s == Square::Empty).count();
        match empty {
            Some(i) if own == 2 && empties == 1 => Some(pattern.positions()[i]),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn choose(board: &str, ai: Player) -> Position {
        let board: Board = board.parse().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        HeuristicStrategy.choose(&board, ai, &mut rng).unwrap()
    }

    #[test]
    fn test_tactical_move_first_pattern_wins() {
        // X can complete both the top row (2) and the left column (6).
        let board: Board = "XX.X.....".parse().unwrap();
        assert_eq!(tactical_move(&board, Player::X), Some(Position::TopRight));
    }

    #[test]
    fn test_tactical_move_ignores_blocked_lines() {
        let board: Board = "XXO......".parse().unwrap();
        assert_eq!(tactical_move(&board, Player::X), None);
    }

    #[test]
    fn test_prefers_win_over_block() {
        // O to move: O wins at 5, X threatens 2.
        assert_eq!(choose("XX.OO...X", Player::O), Position::MiddleRight);
    }

    #[test]
    fn test_blocks_opponent() {
        assert_eq!(choose("XX..O....", Player::O), Position::TopRight);
    }

    #[test]
    fn test_takes_center() {
        assert_eq!(choose("X........", Player::O), Position::Center);
    }

    #[test]
    fn test_takes_corner_when_center_taken() {
        let pos = choose("....X....", Player::O);
        assert!(Position::CORNERS.contains(&pos));
    }

    #[test]
    fn test_takes_edge_when_corners_gone() {
        // Centre and corners filled, no open two-in-a-row for either side.
        let pos = choose("XOX.O.OXO", Player::X);
        assert!(pos == Position::MiddleLeft || pos == Position::MiddleRight);
    }
}
