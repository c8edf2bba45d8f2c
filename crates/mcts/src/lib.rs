//! Monte Carlo Tree Search for Mancala.
//!
//! Rollouts pick a path with the UCB formula, expand the leaf, score it with
//! a uniformly random playout to the end of the game and back the store
//! difference up the path. The tree is keyed by (board, side to move), so
//! transpositions share statistics.
//!
//! # Example
//!
//! ```
//! use mancala_core::Side;
//! use mancala_kalah::Kalah;
//! use mancala_mcts::{Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let board = Kalah::initial_board(6, 4).unwrap();
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(Kalah, MctsConfig::with_rollouts(200), rng).unwrap();
//!
//! let result = mcts.search(&board, Side::Dark);
//! println!("Best move: {:?}", result.best_move);
//! for child in &result.children {
//!     println!("{}: {} visits, mean {:.2}", child.mv, child.visits, child.mean_reward);
//! }
//! ```

pub mod config;
mod node;
mod playout;
pub mod search;
mod tree;

pub use config::MctsConfig;
pub use node::{Node, NodeId, NodeStats};
pub use playout::simulate;
pub use search::{ChildStats, Mcts, MctsResult};
pub use tree::Tree;
