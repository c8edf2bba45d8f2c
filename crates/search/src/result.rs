//! Search results and the root loop shared by both tree searchers.

use mancala_core::{Board, Move, Rules, SearchLimit, Side, Utility};
use tracing::debug;

use crate::evaluator::utility;

/// Work counters for one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered below the root.
    pub nodes: u64,
    /// Nodes answered from the transposition cache.
    pub cache_hits: u64,
    /// Move loops abandoned by an alpha-beta cut-off.
    pub cutoffs: u64,
}

/// Result of a minimax or alpha-beta search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move, or `None` if the side to move has no legal move.
    pub best_move: Option<Move>,

    /// Value of the root from the searching side's perspective. When there
    /// is no move this is the root's utility.
    pub value: Utility,

    pub stats: SearchStats,
}

/// Evaluate every root successor and keep the first strictly-best one.
///
/// `child_value` receives the successor, the opponent to move there, and
/// the remaining budget, and must answer from `side`'s perspective.
pub(crate) fn search_root<R, F>(
    rules: &R,
    board: &Board,
    side: Side,
    limit: SearchLimit,
    mut child_value: F,
) -> (Option<Move>, Utility)
where
    R: Rules,
    F: FnMut(&Board, Side, SearchLimit) -> Utility,
{
    let moves = rules.legal_moves(board, side);
    if moves.is_empty() {
        return (None, utility(board, side));
    }

    // A move has to come out of the root, so spend at least one ply.
    let limit = if limit.is_exhausted() {
        debug!("root depth limit of 0 raised to 1 ply");
        SearchLimit::Plies(1)
    } else {
        limit
    };

    let mut best: Option<(Move, Utility)> = None;
    for mv in moves {
        let child = rules.apply_move(board, side, mv);
        let value = child_value(&child, side.opponent(), limit.descend());
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((mv, value));
        }
    }

    match best {
        Some((mv, value)) => (Some(mv), value),
        None => (None, utility(board, side)),
    }
}
