//! Depth-bounded minimax without pruning.

use mancala_core::{Board, Rules, SearchLimit, Side, Utility};
use tracing::debug;

use crate::{
    cache::{CacheEntry, CacheKey, TranspositionCache},
    evaluator::Evaluator,
    result::{search_root, SearchResult, SearchStats},
    role::Role,
};

/// Full-width minimax search.
///
/// Generic over:
/// - `R`: the board rules
/// - `E`: the evaluator used at depth cutoffs
pub struct Minimax<R: Rules, E: Evaluator> {
    rules: R,
    evaluator: E,
}

impl<R: Rules, E: Evaluator> Minimax<R, E> {
    pub fn new(rules: R, evaluator: E) -> Self {
        Self { rules, evaluator }
    }

    /// Pick the move maximizing `side`'s utility.
    ///
    /// Passing a cache enables caching for this call. Ties go to the first
    /// move in generation order.
    pub fn select_move(
        &self,
        board: &Board,
        side: Side,
        limit: SearchLimit,
        cache: Option<&mut TranspositionCache>,
    ) -> SearchResult {
        let mut run = Run {
            rules: &self.rules,
            evaluator: &self.evaluator,
            max_side: side,
            cache,
            stats: SearchStats::default(),
        };

        let (best_move, value) =
            search_root(&self.rules, board, side, limit, |child, to_move, remaining| {
                run.value(child, to_move, remaining, Role::Minimizing)
            });

        debug!(
            best_move = ?best_move,
            value,
            nodes = run.stats.nodes,
            cache_hits = run.stats.cache_hits,
            %limit,
            "minimax search complete"
        );

        SearchResult {
            best_move,
            value,
            stats: run.stats,
        }
    }
}

/// State for one search call.
struct Run<'a, R, E> {
    rules: &'a R,
    evaluator: &'a E,
    max_side: Side,
    cache: Option<&'a mut TranspositionCache>,
    stats: SearchStats,
}

impl<R: Rules, E: Evaluator> Run<'_, R, E> {
    /// Value of `board` with `side` to move, from the maximizing side's view.
    fn value(&mut self, board: &Board, side: Side, remaining: SearchLimit, role: Role) -> Utility {
        self.stats.nodes += 1;

        let key = self
            .cache
            .is_some()
            .then(|| CacheKey::new(board, side, remaining));
        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key.as_ref()) {
            if let Some(entry) = cache.probe(key) {
                self.stats.cache_hits += 1;
                return role.mover_view(entry.value);
            }
        }

        let moves = self.rules.legal_moves(board, side);
        if moves.is_empty() {
            return self.evaluator.terminal(board, self.max_side);
        }
        if remaining.is_exhausted() {
            return self.evaluator.evaluate(board, self.max_side);
        }

        let mut best = role.worst();
        for mv in moves {
            let child = self.rules.apply_move(board, side, mv);
            let value = self.value(&child, side.opponent(), remaining.descend(), role.flip());
            if role.prefers(value, best) {
                best = value;
            }
        }

        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key) {
            cache.store(key, CacheEntry::exact(role.mover_view(best)));
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Heuristic;
    use mancala_core::Move;
    use mancala_kalah::Kalah;

    fn board(dark: &[u32], light: &[u32], stores: [u32; 2]) -> Board {
        Board::new([dark.to_vec(), light.to_vec()], stores).unwrap()
    }

    fn searcher() -> Minimax<Kalah, Heuristic> {
        Minimax::new(Kalah, Heuristic::StoreDifference)
    }

    #[test]
    fn test_single_legal_move() {
        let b = board(&[1, 0, 0], &[0, 0, 1], [0, 0]);
        for limit in [SearchLimit::Unbounded, SearchLimit::Plies(1), SearchLimit::Plies(4)] {
            let result = searcher().select_move(&b, Side::Dark, limit, None);
            assert_eq!(result.best_move, Some(Move(0)));
            // Dark banks 1, the sweep banks Light's last stone
            assert_eq!(result.value, 0);
        }
    }

    #[test]
    fn test_no_legal_moves_returns_utility() {
        let b = board(&[0, 0], &[2, 0], [5, 1]);
        let result = searcher().select_move(&b, Side::Dark, SearchLimit::Unbounded, None);

        assert_eq!(result.best_move, None);
        assert_eq!(result.value, 4);
        assert_eq!(result.stats.nodes, 0);
    }

    #[test]
    fn test_prefers_capture() {
        // Dark pocket 2 (1 stone) lands in empty pocket 1 facing 6 stones.
        // Dark pocket 0 (1 stone) only banks 1.
        let b = board(&[1, 0, 1], &[1, 6, 1], [0, 0]);
        let result = searcher().select_move(&b, Side::Dark, SearchLimit::Plies(1), None);

        assert_eq!(result.best_move, Some(Move(2)));
        assert_eq!(result.value, 7);
    }

    #[test]
    fn test_ties_go_to_first_move() {
        // Every Light move drops exactly one stone in the store
        let b = board(&[0, 2, 2], &[3, 3, 3], [0, 0]);
        let result = searcher().select_move(&b, Side::Light, SearchLimit::Plies(1), None);

        assert_eq!(result.best_move, Some(Move(0)));
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_weighted_takes_the_finishing_win() {
        // One move ends the game in Dark's favour; the other leaves a lead
        // the weighted cutoff used to overrate.
        let cases = [
            (board(&[1, 0, 1], &[0, 1, 0], [0, 0]), Move(2), 12),
            (board(&[0, 1, 3], &[1, 0, 0], [0, 0]), Move(1), 20),
            (board(&[0, 2, 2], &[1, 0, 0], [0, 0]), Move(2), 20),
        ];
        let weighted = Minimax::new(Kalah, Heuristic::WEIGHTED);

        for (b, expected, value) in cases {
            let result = weighted.select_move(&b, Side::Dark, SearchLimit::Plies(1), None);
            assert_eq!(result.best_move, Some(expected), "{}", b);
            assert_eq!(result.value, value, "{}", b);

            let exact = searcher().select_move(&b, Side::Dark, SearchLimit::Unbounded, None);
            assert_eq!(result.best_move, exact.best_move, "{}", b);
        }
    }

    #[test]
    fn test_zero_depth_at_root_still_moves() {
        let b = Kalah::initial_board(3, 3).unwrap();
        let result = searcher().select_move(&b, Side::Dark, SearchLimit::Plies(0), None);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_cache_fills_and_hits() {
        let b = Kalah::initial_board(3, 2).unwrap();
        let mut cache = TranspositionCache::new();

        let limit = SearchLimit::Unbounded;

        let first = searcher().select_move(&b, Side::Dark, limit, Some(&mut cache));
        assert!(!cache.is_empty());

        let second = searcher().select_move(&b, Side::Dark, limit, Some(&mut cache));
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.value, second.value);
        assert!(second.stats.cache_hits > 0);
        assert!(second.stats.nodes < first.stats.nodes);
    }
}
