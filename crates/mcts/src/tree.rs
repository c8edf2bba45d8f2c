//! Arena-allocated MCTS tree with a transposition index.
//!
//! Nodes are stored in a contiguous vector and referenced by index. A node
//! is identified by its (board, side to move) pair, so a position reached
//! along two different move orders shares one node and one set of
//! statistics.

use std::collections::HashMap;

use mancala_core::{Board, Move, Side};

use crate::node::{Node, NodeId};

/// MCTS tree.
///
/// Edges only point from a position to its successors. Every move either
/// banks a stone or moves stones strictly toward the mover's store, so no
/// position can reach itself and the graph stays acyclic.
#[derive(Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    index: HashMap<(Board, Side), NodeId>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node and start over from a fresh root.
    pub(crate) fn reset(&mut self, board: &Board, side: Side) {
        self.nodes.clear();
        self.index.clear();
        let root = self.get_or_insert(board, side);
        debug_assert_eq!(root, NodeId::ROOT);
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Find the node for a position, if it has been added.
    pub fn lookup(&self, board: &Board, side: Side) -> Option<NodeId> {
        self.index.get(&(board.clone(), side)).copied()
    }

    /// Return the node for a position, adding an unexpanded one if needed.
    pub(crate) fn get_or_insert(&mut self, board: &Board, side: Side) -> NodeId {
        if let Some(id) = self.lookup(board, side) {
            return id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(board.clone(), side));
        self.index.insert((board.clone(), side), id);
        id
    }

    /// Get the root node, if the tree has been seeded.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pick the move whose child has the best average reward for `side`.
    ///
    /// Children store rewards from their own mover's perspective, so their
    /// averages are negated. Unvisited children are ignored and ties go to
    /// the first move. Returns `None` if the position is not in the tree,
    /// not expanded, or none of its children has been visited.
    pub fn ucb_select(&self, board: &Board, side: Side) -> Option<Move> {
        let node = self.get(self.lookup(board, side)?);
        if !node.expanded {
            return None;
        }

        let mut best: Option<(Move, f64)> = None;
        for &(mv, child_id) in &node.children {
            let child = self.get(child_id);
            if child.stats.visits == 0 {
                continue;
            }
            let average = -child.stats.mean_reward();
            if best.map_or(true, |(_, best_average)| average > best_average) {
                best = Some((mv, average));
            }
        }
        best.map(|(mv, _)| mv)
    }
}
