//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and are referenced by index.

use mancala_core::{Board, Move, Side};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Rollout statistics for a single node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of rollouts that passed through this node.
    pub visits: u32,

    /// Sum of rewards, each from the perspective of the side to move here.
    pub reward_sum: f64,
}

impl NodeStats {
    /// Mean reward for the side to move here.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / f64::from(self.visits)
        }
    }
}

/// A position in the MCTS tree: a board and the side to move on it.
#[derive(Clone, Debug)]
pub struct Node {
    pub board: Board,
    pub side: Side,

    pub stats: NodeStats,

    /// Children: (move, node_id) pairs in move generation order.
    pub children: Vec<(Move, NodeId)>,

    /// Whether this node has been expanded (children generated).
    pub expanded: bool,

    /// Whether the side to move has no legal move.
    pub terminal: bool,
}

impl Node {
    /// Create a new unexpanded node.
    pub fn new(board: Board, side: Side) -> Self {
        Self {
            board,
            side,
            stats: NodeStats::default(),
            children: Vec::new(),
            expanded: false,
            terminal: false,
        }
    }
}
