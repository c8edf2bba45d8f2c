//! Mancala domain types.
//!
//! - Side: the two symmetric players
//! - Move: a pocket index on the mover's row
//! - SearchLimit: ply budget for the depth-bounded searchers

use std::fmt;

use crate::{MancalaError, Result};

/// Signed store difference, always from one side's perspective.
pub type Utility = i32;

/// One of the two players.
///
/// The protocol identifies them as `0` (dark, top row) and `1` (light,
/// bottom row).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub enum Side {
    Dark = 0,
    Light = 1,
}

impl Side {
    /// Both sides in index order.
    pub const BOTH: [Side; 2] = [Side::Dark, Side::Light];

    /// Get the opposing side (`1 - side`).
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Array index for per-side storage.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i64> for Side {
    type Error = MancalaError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Side::Dark),
            1 => Ok(Side::Light),
            other => Err(MancalaError::InvalidSide(other)),
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = MancalaError;

    fn try_from(value: u8) -> Result<Self> {
        Side::try_from(i64::from(value))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => write!(f, "dark"),
            Side::Light => write!(f, "light"),
        }
    }
}

/// A move: the index of the pocket to sow from, on the mover's own row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Move(pub usize);

impl Move {
    /// Pocket index.
    #[inline]
    pub fn pocket(self) -> usize {
        self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ply budget for minimax and alpha-beta.
///
/// `Plies(0)` forces evaluation regardless of whether the game is over.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SearchLimit {
    /// Search to terminal states only.
    Unbounded,
    /// Search at most this many plies.
    Plies(u32),
}

impl SearchLimit {
    /// Interpret the protocol's depth field: any negative value is unbounded.
    pub fn from_protocol(value: i64) -> Self {
        if value < 0 {
            SearchLimit::Unbounded
        } else {
            SearchLimit::Plies(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }

    /// True when no plies remain.
    #[inline]
    pub fn is_exhausted(self) -> bool {
        matches!(self, SearchLimit::Plies(0))
    }

    /// Budget for the next ply down.
    #[inline]
    pub fn descend(self) -> Self {
        match self {
            SearchLimit::Unbounded => SearchLimit::Unbounded,
            SearchLimit::Plies(n) => SearchLimit::Plies(n.saturating_sub(1)),
        }
    }
}

impl fmt::Display for SearchLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchLimit::Unbounded => write!(f, "unbounded"),
            SearchLimit::Plies(n) => write!(f, "{} plies", n),
        }
    }
}
