//! Move selection for one game.

use mancala_core::{Board, MancalaError, Move, Result, SearchLimit, Side};
use mancala_kalah::Kalah;
use mancala_mcts::Mcts;
use mancala_search::{AlphaBeta, Heuristic, Minimax, SearchResult, TranspositionCache};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::Config;
use crate::protocol::{Algorithm, Handshake};

/// Plays one side of a game with the algorithm chosen in the handshake.
///
/// Owns the transposition cache, which lives as long as the engine and is
/// shared by every move it searches.
pub struct Engine {
    side: Side,
    algorithm: Algorithm,
    limit: SearchLimit,
    heuristic: Heuristic,
    cache: Option<TranspositionCache>,
    mcts: Mcts<Kalah, ChaCha8Rng>,
}

impl Engine {
    /// # Errors
    /// Returns `MancalaError::InvalidConfig` if the MCTS settings are invalid.
    pub fn new(handshake: &Handshake, config: &Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mcts = Mcts::new(Kalah, config.mcts_config(), rng)?;

        // MCTS plays every rollout to the end of the game
        let limit = match handshake.algorithm {
            Algorithm::Mcts => SearchLimit::Unbounded,
            _ => handshake.limit,
        };

        Ok(Self {
            side: handshake.side,
            algorithm: handshake.algorithm,
            limit,
            heuristic: config.heuristic.heuristic(),
            cache: handshake.caching.then(TranspositionCache::new),
            mcts,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Report the settings the way the manager's operators expect to see them.
    pub fn log_settings(&self) {
        info!("Running {}", self.algorithm);
        info!("Caching is {}", if self.cache.is_some() { "ON" } else { "OFF" });
        match self.limit {
            SearchLimit::Unbounded => info!("Depth Limit is OFF"),
            SearchLimit::Plies(n) => info!("Depth Limit is {}", n),
        }
    }

    /// Choose a move for this engine's side.
    ///
    /// # Errors
    /// Returns `MancalaError::NoLegalMoves` if the side has nothing to play.
    pub fn choose(&mut self, board: &Board) -> Result<Move> {
        let mv = match self.algorithm {
            Algorithm::Minimax => {
                let searcher = Minimax::new(Kalah, self.heuristic);
                let result =
                    searcher.select_move(board, self.side, self.limit, self.cache.as_mut());
                self.log_result(&result);
                result.best_move
            }
            Algorithm::AlphaBeta => {
                let searcher = AlphaBeta::new(Kalah, self.heuristic);
                let result =
                    searcher.select_move(board, self.side, self.limit, self.cache.as_mut());
                self.log_result(&result);
                result.best_move
            }
            Algorithm::Mcts => {
                let result = self.mcts.search(board, self.side);
                debug!(
                    rollouts = result.rollouts,
                    tree_size = result.tree_size,
                    "mcts move"
                );
                result.best_move
            }
        };
        let mv = mv.ok_or(MancalaError::NoLegalMoves)?;

        if let Ok(play) = Kalah.play(board, self.side, mv) {
            if play.extra_turn {
                debug!(%mv, side = %self.side, "move ends in own store");
            }
            if play.captured > 0 {
                debug!(%mv, captured = play.captured, "move captures");
            }
        }
        Ok(mv)
    }

    fn log_result(&self, result: &SearchResult) {
        debug!(
            value = result.value,
            nodes = result.stats.nodes,
            cache_hits = result.stats.cache_hits,
            cutoffs = result.stats.cutoffs,
            cache_size = self.cache.as_ref().map_or(0, TranspositionCache::len),
            "search move"
        );
    }
}
