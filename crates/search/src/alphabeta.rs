//! Depth-bounded minimax with alpha-beta pruning.
//!
//! Fail-soft: a node returns its running best even when it falls outside
//! the window. Cached values carry the bound type they were computed under,
//! so a value produced by a cut-off is only reused where it is still
//! decisive.

use mancala_core::{Board, Rules, SearchLimit, Side, Utility};
use tracing::debug;

use crate::{
    cache::{Bound, CacheEntry, CacheKey, TranspositionCache},
    evaluator::Evaluator,
    result::{search_root, SearchResult, SearchStats},
    role::{Role, NEG_INF, POS_INF},
};

/// Alpha-beta search.
///
/// Returns the same move and value as [`crate::Minimax`] for the same
/// inputs; pruning only changes the work done.
pub struct AlphaBeta<R: Rules, E: Evaluator> {
    rules: R,
    evaluator: E,
}

impl<R: Rules, E: Evaluator> AlphaBeta<R, E> {
    pub fn new(rules: R, evaluator: E) -> Self {
        Self { rules, evaluator }
    }

    /// Pick the move maximizing `side`'s utility.
    ///
    /// Each root successor is searched with a full window, so the root
    /// value is exact. Passing a cache enables caching for this call.
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
                run.value(child, to_move, remaining, Role::Minimizing, NEG_INF, POS_INF)
            });

        debug!(
            best_move = ?best_move,
            value,
            nodes = run.stats.nodes,
            cache_hits = run.stats.cache_hits,
            cutoffs = run.stats.cutoffs,
            %limit,
            "alpha-beta search complete"
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
    fn value(
        &mut self,
        board: &Board,
        side: Side,
        remaining: SearchLimit,
        role: Role,
        mut alpha: Utility,
        mut beta: Utility,
    ) -> Utility {
        self.stats.nodes += 1;

        let key = self
            .cache
            .is_some()
            .then(|| CacheKey::new(board, side, remaining));
        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key.as_ref()) {
            if let Some(entry) = cache.probe(key) {
                let value = role.mover_view(entry.value);
                let usable = match role.mover_bound(entry.bound) {
                    Bound::Exact => true,
                    Bound::Lower => value >= beta,
                    Bound::Upper => value <= alpha,
                };
                if usable {
                    self.stats.cache_hits += 1;
                    return value;
                }
            }
        }

        let moves = self.rules.legal_moves(board, side);
        if moves.is_empty() {
            return self.evaluator.terminal(board, self.max_side);
        }
        if remaining.is_exhausted() {
            return self.evaluator.evaluate(board, self.max_side);
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let mut best = role.worst();
        for mv in moves {
            let child = self.rules.apply_move(board, side, mv);
            let value = self.value(
                &child,
                side.opponent(),
                remaining.descend(),
                role.flip(),
                alpha,
                beta,
            );
            if role.prefers(value, best) {
                best = value;
            }

            match role {
                Role::Maximizing if best > alpha => alpha = best,
                Role::Minimizing if best < beta => beta = best,
                _ => continue,
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if let (Some(cache), Some(key)) = (self.cache.as_deref_mut(), key) {
            let bound = if best <= alpha_in {
                Bound::Upper
            } else if best >= beta_in {
                Bound::Lower
            } else {
                Bound::Exact
            };
            cache.store(
                key,
                CacheEntry {
                    value: role.mover_view(best),
                    bound: role.mover_bound(bound),
                },
            );
        }
        best
    }
}
