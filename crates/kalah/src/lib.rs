//! Mancala Kalah - sowing rules for the Mancala engine
//!
//! Implements the `mancala_core::Rules` trait: legal-move generation,
//! counter-clockwise sowing that skips the opponent's store, captures on
//! the mover's own row, extra-turn detection and the end-of-game sweep.

mod game_impl;
mod sowing;

pub use game_impl::Kalah;
pub use sowing::{sow, Play};
