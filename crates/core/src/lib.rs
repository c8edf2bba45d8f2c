//! Mancala Core - board representation and rules interface
//!
//! This crate provides the value types shared by every searcher and the
//! `Rules` trait through which they consume the game's mechanics.
//!
//! # Types
//!
//! - [`Board`] - Immutable pockets + stores snapshot, hashed by value
//! - [`Side`] - One of the two players
//! - [`Move`] - Pocket index on the mover's own row
//! - [`SearchLimit`] - Ply budget (or unbounded) for the tree searchers
//! - [`Rules`] - Trait for legal-move generation and move application

mod board;
mod error;
mod rules;
mod types;

pub use board::Board;
pub use error::{MancalaError, Result};
pub use rules::Rules;
pub use types::{Move, SearchLimit, Side, Utility};
