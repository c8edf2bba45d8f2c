//! The two alternating roles of the tree searchers.

use mancala_core::Utility;

use crate::cache::Bound;

/// Stand-in for negative infinity; safe to negate.
pub(crate) const NEG_INF: Utility = -Utility::MAX;

/// Stand-in for positive infinity.
pub(crate) const POS_INF: Utility = Utility::MAX;

/// Whether the side to move is maximizing the root side's utility or
/// minimizing it.
///
/// Searchers express every value from the maximizing side's perspective and
/// convert at the cache boundary, where values are stored from the
/// side-to-move's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Maximizing,
    Minimizing,
}

impl Role {
    /// The role of the opponent.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Role::Maximizing => Role::Minimizing,
            Role::Minimizing => Role::Maximizing,
        }
    }

    /// Identity value for this role's fold.
    #[inline]
    pub(crate) fn worst(self) -> Utility {
        match self {
            Role::Maximizing => NEG_INF,
            Role::Minimizing => POS_INF,
        }
    }

    /// True if `candidate` strictly improves on `best` for this role.
    #[inline]
    pub(crate) fn prefers(self, candidate: Utility, best: Utility) -> bool {
        match self {
            Role::Maximizing => candidate > best,
            Role::Minimizing => candidate < best,
        }
    }

    /// Convert between the maximizing side's view and the mover's view.
    ///
    /// The conversion is its own inverse.
    #[inline]
    pub(crate) fn mover_view(self, value: Utility) -> Utility {
        match self {
            Role::Maximizing => value,
            Role::Minimizing => -value,
        }
    }

    /// Re-orient a bound under the same change of view as [`Role::mover_view`].
    #[inline]
    pub(crate) fn mover_bound(self, bound: Bound) -> Bound {
        match (self, bound) {
            (Role::Maximizing, bound) => bound,
            (Role::Minimizing, Bound::Exact) => Bound::Exact,
            (Role::Minimizing, Bound::Lower) => Bound::Upper,
            (Role::Minimizing, Bound::Upper) => Bound::Lower,
        }
    }
}
