//! Hard: exhaustive minimax.
//!
//! The 3x3 tree is small enough to search completely, so there is no
//! pruning and no depth limit. Terminal scores are taken from the computer's
//! point of view: a win scores `10 - depth`, a loss `depth - 10`, a draw 0,
//! with `depth` counting plies after the candidate move.

use rand::RngCore;

use super::Strategy;
use crate::position::Position;
use crate::rules::{is_full, winner};
use crate::types::{Board, Player, Square};

const WIN_SCORE: i32 = 10;

/// Perfect play; ties go to the lowest cell index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

impl Strategy for MinimaxStrategy {
    fn choose(&self, board: &Board, ai: Player, _rng: &mut dyn RngCore) -> Option<Position> {
        let scores = minimax_scores(board, ai);
        let mut best: Option<(Position, i32)> = None;
        for pos in Position::ALL {
            if let Some(score) = scores[pos.to_index()] {
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((pos, score));
                }
            }
        }
        best.map(|(pos, _)| pos)
    }
}

/// Minimax value of placing `ai` on each empty square; `None` for occupied ones.
pub fn minimax_scores(board: &Board, ai: Player) -> [Option<i32>; 9] {
    let mut scratch = board.clone();
    let mut scores = [None; 9];
    for pos in Position::ALL {
        if scratch.is_empty(pos) {
            scratch.set(pos, Square::Occupied(ai));
            scores[pos.to_index()] = Some(search(&mut scratch, ai, false, 0));
            scratch.clear(pos);
        }
    }
    scores
}

/// Place/unplace recursion over one scratch board.
fn search(board: &mut Board, ai: Player, maximizing: bool, depth: i32) -> i32 {
    if let Some(win) = winner(board) {
        return if win.player == ai {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }
    if is_full(board) {
        return 0;
    }

    let mover = if maximizing { ai } else { ai.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in Position::ALL {
        if board.is_empty(pos) {
            board.set(pos, Square::Occupied(mover));
            let score = search(board, ai, !maximizing, depth + 1);
            board.clear(pos);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn choose(board: &str, ai: Player) -> Position {
        let board: Board = board.parse().unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        MinimaxStrategy.choose(&board, ai, &mut rng).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        assert_eq!(choose("XX.OO....", Player::X), Position::TopRight);
    }

    #[test]
    fn test_immediate_win_scores_ten() {
        let board: Board = "XX.OO....".parse().unwrap();
        let scores = minimax_scores(&board, Player::X);
        assert_eq!(scores[2], Some(10));
        assert_eq!(scores[0], None);
    }

    #[test]
    fn test_blocks_loss() {
        assert_eq!(choose("OO.X.....", Player::X), Position::TopRight);
    }

    #[test]
    fn test_prefers_faster_win() {
        // O can win now at 5; other moves only win later or not at all.
        assert_eq!(choose("XX.OO.X..", Player::O), Position::MiddleRight);
    }

    #[test]
    fn test_empty_board_ties_to_first_cell() {
        // Every opening draws under perfect play.
        let scores = minimax_scores(&Board::new(), Player::X);
        assert!(scores.iter().all(|s| *s == Some(0)));
        assert_eq!(choose(".........", Player::X), Position::TopLeft);
    }

    #[test]
    fn test_answers_corner_opening_with_center() {
        assert_eq!(choose("X........", Player::O), Position::Center);
    }
}
