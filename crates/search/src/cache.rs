//! Transposition cache shared by the tree searchers.
//!
//! Keys include the remaining ply budget, so a value computed with a
//! shallow horizon is never reused where a deeper search was asked for.
//! Values are stored from the side-to-move's perspective together with a
//! [`Bound`], which makes values cut off by alpha-beta safe to reuse.

use std::collections::HashMap;

use mancala_core::{Board, SearchLimit, Side, Utility};

/// What a cached value says about the true search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The value is exact.
    Exact,
    /// The true value is at least this (search failed high).
    Lower,
    /// The true value is at most this (search failed low).
    Upper,
}

/// Cache key: the position, who is to move, and the budget left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub board: Board,
    pub side: Side,
    pub remaining: SearchLimit,
}

impl CacheKey {
    pub fn new(board: &Board, side: Side, remaining: SearchLimit) -> Self {
        Self {
            board: board.clone(),
            side,
            remaining,
        }
    }
}

/// A cached search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntry {
    /// Value from the side-to-move's perspective.
    pub value: Utility,
    pub bound: Bound,
}

impl CacheEntry {
    pub fn exact(value: Utility) -> Self {
        Self {
            value,
            bound: Bound::Exact,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

/// In-memory transposition cache.
///
/// Owned by whoever drives the searches and handed to each call that has
/// caching enabled. It is never cleared implicitly; entries stay valid across
/// searches as long as the same evaluator is used.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    map: HashMap<CacheKey, CacheEntry>,
    stats: CacheStats,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry.
    pub fn probe(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        self.stats.probes += 1;
        let entry = self.map.get(key).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        }
        entry
    }

    /// Store an entry. An exact entry is never replaced by a bound.
    pub fn store(&mut self, key: CacheKey, entry: CacheEntry) {
        self.stats.stores += 1;
        match self.map.get(&key) {
            Some(old) if old.bound == Bound::Exact && entry.bound != Bound::Exact => {}
            _ => {
                self.map.insert(key, entry);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&mut self) {
        self.map.clear();
        self.stats = CacheStats::default();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(stores: [u32; 2], side: Side, remaining: SearchLimit) -> CacheKey {
        let board = Board::new([vec![1, 2], vec![3, 4]], stores).unwrap();
        CacheKey::new(&board, side, remaining)
    }

    #[test]
    fn test_probe_miss_then_hit() {
        let mut cache = TranspositionCache::new();
        let k = key([0, 0], Side::Dark, SearchLimit::Plies(3));

        assert_eq!(cache.probe(&k), None);
        cache.store(k.clone(), CacheEntry::exact(5));
        assert_eq!(cache.probe(&k), Some(CacheEntry::exact(5)));

        let stats = cache.stats();
        assert_eq!(stats.probes, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.stores, 1);
    }

    #[test]
    fn test_key_distinguishes_side_and_depth() {
        let mut cache = TranspositionCache::new();
        cache.store(
            key([0, 0], Side::Dark, SearchLimit::Plies(3)),
            CacheEntry::exact(5),
        );

        assert!(cache.probe(&key([0, 0], Side::Light, SearchLimit::Plies(3))).is_none());
        assert!(cache.probe(&key([0, 0], Side::Dark, SearchLimit::Plies(2))).is_none());
        assert!(cache.probe(&key([0, 0], Side::Dark, SearchLimit::Unbounded)).is_none());
        assert!(cache.probe(&key([0, 0], Side::Dark, SearchLimit::Plies(3))).is_some());
    }

    #[test]
    fn test_key_is_by_value() {
        let mut cache = TranspositionCache::new();
        cache.store(key([2, 1], Side::Dark, SearchLimit::Unbounded), CacheEntry::exact(1));

        // A separately constructed but equal board hits the same entry
        let other = key([2, 1], Side::Dark, SearchLimit::Unbounded);
        assert_eq!(cache.probe(&other), Some(CacheEntry::exact(1)));
    }

    #[test]
    fn test_exact_not_replaced_by_bound() {
        let mut cache = TranspositionCache::new();
        let k = key([0, 0], Side::Dark, SearchLimit::Plies(1));

        cache.store(k.clone(), CacheEntry::exact(3));
        cache.store(
            k.clone(),
            CacheEntry {
                value: 9,
                bound: Bound::Lower,
            },
        );
        assert_eq!(cache.probe(&k), Some(CacheEntry::exact(3)));

        cache.store(k.clone(), CacheEntry::exact(4));
        assert_eq!(cache.probe(&k), Some(CacheEntry::exact(4)));
    }

    #[test]
    fn test_clear() {
        let mut cache = TranspositionCache::new();
        cache.store(key([0, 0], Side::Dark, SearchLimit::Plies(1)), CacheEntry::exact(0));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
