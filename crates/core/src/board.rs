//! Immutable Mancala board snapshot.

use std::fmt;

use crate::{MancalaError, Result, Side, Utility};

/// Pockets and stores for both sides.
///
/// Boards are values: equality and hashing look only at the stone counts,
/// so two boards reached by different move orders are the same state for
/// caching purposes. Successors are always fresh copies.
///
/// Layout, as drawn by [`fmt::Display`]:
/// ```text
///      [d0] [d1] [d2]          <- Side::Dark row
/// (D)                 (L)      <- stores
///      [l0] [l1] [l2]          <- Side::Light row
/// ```
/// Pocket `i` of one row faces pocket `i` of the other.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    pockets: [Vec<u32>; 2],
    stores: [u32; 2],
}

impl Board {
    /// Create a board from per-side pocket rows and stores.
    ///
    /// # Errors
    /// Returns `MancalaError::InvalidBoard` if a row is empty, the rows
    /// differ in length, or the stone count does not fit in a [`Utility`].
    pub fn new(pockets: [Vec<u32>; 2], stores: [u32; 2]) -> Result<Self> {
        let [dark, light] = &pockets;
        if dark.is_empty() || light.is_empty() {
            return Err(MancalaError::InvalidBoard(
                "each side needs at least one pocket".to_string(),
            ));
        }
        if dark.len() != light.len() {
            return Err(MancalaError::InvalidBoard(format!(
                "row lengths differ: {} vs {}",
                dark.len(),
                light.len()
            )));
        }

        // Sowing conserves stones, so every count derived from this board
        // stays in range once the total does.
        let total: u64 = pockets
            .iter()
            .flatten()
            .chain(stores.iter())
            .map(|&n| u64::from(n))
            .sum();
        if total > Utility::MAX as u64 {
            return Err(MancalaError::InvalidBoard(format!(
                "{} stones on the board, at most {} supported",
                total,
                Utility::MAX
            )));
        }
        Ok(Self { pockets, stores })
    }

    /// Build a board from the nested row format used on the wire.
    ///
    /// # Errors
    /// Returns `MancalaError::InvalidBoard` unless exactly two rows are given.
    pub fn from_rows(rows: Vec<Vec<u32>>, stores: [u32; 2]) -> Result<Self> {
        let rows: [Vec<u32>; 2] = rows.try_into().map_err(|rows: Vec<Vec<u32>>| {
            MancalaError::InvalidBoard(format!("expected 2 rows, got {}", rows.len()))
        })?;
        Self::new(rows, stores)
    }

    /// Pockets per side.
    #[inline]
    pub fn width(&self) -> usize {
        self.pockets[0].len()
    }

    /// The pocket row owned by `side`.
    #[inline]
    pub fn row(&self, side: Side) -> &[u32] {
        &self.pockets[side.index()]
    }

    /// Stones in one pocket, or `None` if the index is off the row.
    #[inline]
    pub fn pocket(&self, side: Side, index: usize) -> Option<u32> {
        self.row(side).get(index).copied()
    }

    /// Stones banked in `side`'s store.
    #[inline]
    pub fn store(&self, side: Side) -> u32 {
        self.stores[side.index()]
    }

    /// Both stores, indexed by side.
    #[inline]
    pub fn stores(&self) -> [u32; 2] {
        self.stores
    }

    /// Stones still on `side`'s row.
    pub fn row_total(&self, side: Side) -> u32 {
        self.row(side).iter().sum()
    }

    /// All stones on the board, pockets and stores included.
    pub fn total_stones(&self) -> u32 {
        Side::BOTH
            .iter()
            .map(|&side| self.row_total(side) + self.store(side))
            .sum()
    }

    /// Store difference from `side`'s perspective.
    #[inline]
    pub fn store_difference(&self, side: Side) -> Utility {
        self.store(side) as Utility - self.store(side.opponent()) as Utility
    }

    /// Mutable access for rule implementations building a successor.
    #[inline]
    pub fn row_mut(&mut self, side: Side) -> &mut [u32] {
        &mut self.pockets[side.index()]
    }

    /// Add stones to `side`'s store.
    #[inline]
    pub fn bank(&mut self, side: Side, stones: u32) {
        self.stores[side.index()] += stones;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = |n: u32| format!("[{:>2}]", n);
        let dark: Vec<String> = self.row(Side::Dark).iter().map(|&n| cell(n)).collect();
        let light: Vec<String> = self.row(Side::Light).iter().map(|&n| cell(n)).collect();
        let gap = " ".repeat(dark.join(" ").len());

        writeln!(f, "     {}", dark.join(" "))?;
        writeln!(
            f,
            "({:>2}) {} ({:>2})",
            self.store(Side::Dark),
            gap,
            self.store(Side::Light)
        )?;
        writeln!(f, "     {}", light.join(" "))
    }
}
