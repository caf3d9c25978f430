//! Easy: uniform random choice.

use rand::RngCore;
use rand::seq::SliceRandom;

use super::Strategy;
use crate::position::Position;
use crate::types::{Board, Player};

/// Picks a uniformly random empty square.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose(&self, board: &Board, _ai: Player, rng: &mut dyn RngCore) -> Option<Position> {
        board.empty_positions().choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_only_empty_squares() {
        let board: Board = "XOXOX.O..".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let pos = RandomStrategy.choose(&board, Player::X, &mut rng).unwrap();
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_covers_every_empty_square() {
        let board: Board = "X...O....".parse().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<Position> = (0..500)
            .filter_map(|_| RandomStrategy.choose(&board, Player::X, &mut rng))
            .collect();
        assert_eq!(seen.len(), 7);
    }
}
