//! Depth-bounded adversarial search for Mancala.
//!
//! This crate provides the two tree searchers and the pieces they share:
//!
//! - [`Evaluator`] / [`Heuristic`] - utility and cutoff evaluation
//! - [`TranspositionCache`] - memo of search values keyed by
//!   (board, side to move, remaining depth), with exact/lower/upper bounds
//! - [`Minimax`] - full-width search
//! - [`AlphaBeta`] - the same search with cut-offs
//!
//! Both searchers are generic over the board rules (`mancala_core::Rules`)
//! and return identical moves and values for the same inputs.
//!
//! # Example
//!
//! ```
//! use mancala_core::{SearchLimit, Side};
//! use mancala_kalah::Kalah;
//! use mancala_search::{AlphaBeta, Heuristic, TranspositionCache};
//!
//! let board = Kalah::initial_board(4, 2).unwrap();
//! let searcher = AlphaBeta::new(Kalah, Heuristic::StoreDifference);
//! let mut cache = TranspositionCache::new();
//!
//! let result = searcher.select_move(&board, Side::Dark, SearchLimit::Plies(4), Some(&mut cache));
//! println!("Best move: {:?} (value {})", result.best_move, result.value);
//! ```

pub mod alphabeta;
pub mod cache;
pub mod evaluator;
pub mod minimax;
mod result;
mod role;

pub use alphabeta::AlphaBeta;
pub use cache::{Bound, CacheEntry, CacheKey, CacheStats, TranspositionCache};
pub use evaluator::{utility, Evaluator, Heuristic};
pub use minimax::Minimax;
pub use result::{SearchResult, SearchStats};
pub use role::Role;
