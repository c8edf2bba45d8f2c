//! Utility and heuristic evaluation.
//!
//! Finished positions are scored with [`utility`] and depth cutoffs with an
//! [`Evaluator`], which lets callers swap in a stronger estimate without
//! touching the searchers. Both must be on one scale, so the searchers ask
//! the evaluator for [`Evaluator::terminal`] rather than calling `utility`
//! directly.

use mancala_core::{Board, Side, Utility};

/// Store difference from `side`'s perspective.
///
/// Zero-sum: `utility(b, s) == -utility(b, s.opponent())`.
#[inline]
pub fn utility(board: &Board, side: Side) -> Utility {
    board.store_difference(side)
}

/// Trait for scoring non-terminal positions at a depth cutoff.
///
/// Evaluations are the difference of two per-side scores, so every
/// implementation is antisymmetric. The searchers rely on this when they
/// store values from the side-to-move's perspective.
pub trait Evaluator {
    /// Score for `side` alone. Must be deterministic.
    fn side_score(&self, board: &Board, side: Side) -> Utility;

    /// Evaluation of `board` from `side`'s perspective.
    fn evaluate(&self, board: &Board, side: Side) -> Utility {
        self.side_score(board, side) - self.side_score(board, side.opponent())
    }

    /// [`utility`] of a finished position, scaled to match [`Evaluator::evaluate`].
    ///
    /// On a swept board the two must agree, otherwise a cutoff can outscore
    /// a game that is already won.
    fn terminal(&self, board: &Board, side: Side) -> Utility {
        utility(board, side)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn side_score(&self, board: &Board, side: Side) -> Utility {
        (**self).side_score(board, side)
    }

    fn terminal(&self, board: &Board, side: Side) -> Utility {
        (**self).terminal(board, side)
    }
}

/// Built-in cutoff heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Same formula as [`utility`].
    #[default]
    StoreDifference,

    /// Banked stones weighted above stones still on the row.
    Weighted {
        store_weight: Utility,
        pocket_weight: Utility,
    },
}

impl Heuristic {
    /// Default weighting: a banked stone is worth four stones on the row.
    pub const WEIGHTED: Heuristic = Heuristic::Weighted {
        store_weight: 4,
        pocket_weight: 1,
    };
}

impl Evaluator for Heuristic {
    fn side_score(&self, board: &Board, side: Side) -> Utility {
        let banked = board.store(side) as Utility;
        match *self {
            Heuristic::StoreDifference => banked,
            Heuristic::Weighted {
                store_weight,
                pocket_weight,
            } => store_weight
                .saturating_mul(banked)
                .saturating_add(pocket_weight.saturating_mul(board.row_total(side) as Utility)),
        }
    }

    fn terminal(&self, board: &Board, side: Side) -> Utility {
        match *self {
            Heuristic::StoreDifference => utility(board, side),
            // Clamped so the value can always be negated
            Heuristic::Weighted { store_weight, .. } => store_weight
                .saturating_mul(utility(board, side))
                .clamp(-Utility::MAX, Utility::MAX),
        }
    }
}
