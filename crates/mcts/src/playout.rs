//! Random playouts used to score a leaf.

use mancala_core::{Board, Rules, Side};
use mancala_search::utility;
use rand::Rng;

/// Play uniformly random legal moves, alternating sides, until the side to
/// move has none.
///
/// Returns the final utility from the perspective of `side`, the side to
/// move at the start of the playout.
pub fn simulate<R, G>(rules: &R, board: &Board, side: Side, rng: &mut G) -> f64
where
    R: Rules + ?Sized,
    G: Rng + ?Sized,
{
    let mut board = board.clone();
    let mut to_move = side;

    loop {
        let moves = rules.legal_moves(&board, to_move);
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        board = rules.apply_move(&board, to_move, mv);
        to_move = to_move.opponent();
    }

    f64::from(utility(&board, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mancala_kalah::Kalah;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_terminal_board_scores_immediately() {
        let b = Board::new([vec![0, 0], vec![0, 0]], [3, 7]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(simulate(&Kalah, &b, Side::Dark, &mut rng), -4.0);
        assert_eq!(simulate(&Kalah, &b, Side::Light, &mut rng), 4.0);
    }

    #[test]
    fn test_playout_reaches_the_end() {
        let b = Kalah::initial_board(4, 3).unwrap();
        let total = f64::from(b.total_stones());

        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let reward = simulate(&Kalah, &b, Side::Dark, &mut rng);
            // Every stone ends up banked, and the difference keeps parity
            assert!(reward.abs() <= total);
            assert_eq!(reward.rem_euclid(2.0), 0.0);
        }
    }

    #[test]
    fn test_deterministic_for_seed() {
        let b = Kalah::initial_board(6, 4).unwrap();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            simulate(&Kalah, &b, Side::Light, &mut rng)
        };
        assert_eq!(run(7), run(7));
    }
}
