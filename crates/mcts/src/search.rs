//! Monte Carlo Tree Search with UCB selection.
//!
//! Each rollout selects a path down the tree, expands the leaf, scores it
//! with a random playout and backs the reward up the path, negating it at
//! every level.

use mancala_core::{Board, Move, Result, Rules, Side};
use rand::Rng;
use tracing::{debug, trace};

use crate::{
    config::MctsConfig,
    node::NodeId,
    playout::simulate,
    tree::Tree,
};

/// Statistics for one root move.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub visits: u32,
    /// Mean reward from the root side's perspective.
    pub mean_reward: f64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug, PartialEq)]
pub struct MctsResult {
    /// Chosen move, or `None` if the root side has no legal move.
    pub best_move: Option<Move>,

    /// Root moves in generation order. Empty if the root was never expanded.
    pub children: Vec<ChildStats>,

    /// Rollouts performed.
    pub rollouts: usize,

    /// Nodes in the tree when the search finished.
    pub tree_size: usize,
}

/// Monte Carlo Tree Search.
///
/// Generic over:
/// - `R`: the board rules
/// - `G`: the random number generator driving the playouts
pub struct Mcts<R: Rules, G: Rng> {
    rules: R,
    config: MctsConfig,
    rng: G,
    tree: Tree,
}

impl<R: Rules, G: Rng> Mcts<R, G> {
    /// Create a new MCTS instance.
    ///
    /// # Errors
    /// Returns `MancalaError::InvalidConfig` if the configuration is invalid.
    pub fn new(rules: R, config: MctsConfig, rng: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules,
            config,
            rng,
            tree: Tree::new(),
        })
    }

    /// The tree built by the last search.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Run the configured number of rollouts on a fresh tree and pick a move.
    pub fn select_move(&mut self, board: &Board, side: Side) -> Option<Move> {
        self.search(board, side).best_move
    }

    /// Run the configured number of rollouts on a fresh tree.
    ///
    /// The move is the visited root child with the best average reward. If
    /// no root child was visited (too few rollouts) a uniformly random legal
    /// move is returned instead.
    pub fn search(&mut self, board: &Board, side: Side) -> MctsResult {
        self.tree.reset(board, side);

        let moves = self.rules.legal_moves(board, side);
        if moves.is_empty() {
            return MctsResult {
                best_move: None,
                children: Vec::new(),
                rollouts: 0,
                tree_size: self.tree.len(),
            };
        }

        for i in 0..self.config.rollouts {
            self.rollout(i);
        }

        let best_move = match self.tree.ucb_select(board, side) {
            Some(mv) => mv,
            None => {
                let mv = moves[self.rng.gen_range(0..moves.len())];
                debug!(
                    %mv,
                    rollouts = self.config.rollouts,
                    "no root move visited, playing at random"
                );
                mv
            }
        };

        let result = self.extract_results(best_move);
        debug!(
            best_move = %best_move,
            rollouts = result.rollouts,
            tree_size = result.tree_size,
            "mcts search complete"
        );
        result
    }

    /// One rollout: select -> expand -> simulate -> backpropagate.
    fn rollout(&mut self, index: usize) {
        let path = self.select_path();
        let leaf = path[path.len() - 1];
        self.expand_leaf(leaf);

        let node = self.tree.get(leaf);
        let reward = simulate(&self.rules, &node.board, node.side, &mut self.rng);
        trace!(rollout = index, depth = path.len() - 1, reward, "rollout");

        self.backpropagate(&path, reward);
    }

    /// Walk down from the root while the current node is expanded and not
    /// terminal.
    fn select_path(&self) -> Vec<NodeId> {
        let mut path = vec![NodeId::ROOT];
        let mut current = NodeId::ROOT;

        loop {
            let node = self.tree.get(current);
            if node.terminal || !node.expanded {
                break;
            }
            match self.select_child(current) {
                Some(child) => {
                    path.push(child);
                    current = child;
                }
                None => break,
            }
        }
        path
    }

    /// Select a child using the UCB formula.
    ///
    /// UCB(c) = -avg(c) + w * sqrt(ln(N_parent) / N_c)
    ///
    /// The child's average is negated because it is stored from the
    /// opponent's perspective. An unvisited child is taken immediately.
    fn select_child(&self, node_id: NodeId) -> Option<NodeId> {
        let node = self.tree.get(node_id);
        let parent_visits = f64::from(node.stats.visits.max(1));
        let weight = self.config.exploration_weight;

        let mut best: Option<(NodeId, f64)> = None;
        for &(_, child_id) in &node.children {
            let child = self.tree.get(child_id);
            if child.stats.visits == 0 {
                return Some(child_id);
            }

            let exploit = -child.stats.mean_reward();
            let explore = (parent_visits.ln() / f64::from(child.stats.visits)).sqrt();
            let ucb = exploit + weight * explore;

            if best.map_or(true, |(_, best_ucb)| ucb > best_ucb) {
                best = Some((child_id, ucb));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Add a node for every successor of the leaf, reusing existing nodes.
    fn expand_leaf(&mut self, node_id: NodeId) {
        let node = self.tree.get(node_id);
        if node.expanded || node.terminal {
            return;
        }
        let (board, side) = (node.board.clone(), node.side);

        let moves = self.rules.legal_moves(&board, side);
        if moves.is_empty() {
            self.tree.get_mut(node_id).terminal = true;
            return;
        }

        let children: Vec<(Move, NodeId)> = moves
            .into_iter()
            .map(|mv| {
                let child = self.rules.apply_move(&board, side, mv);
                (mv, self.tree.get_or_insert(&child, side.opponent()))
            })
            .collect();

        let node = self.tree.get_mut(node_id);
        node.children = children;
        node.expanded = true;
    }

    /// Backpropagate the reward through the path.
    ///
    /// The reward is from the perspective of the side to move at the leaf.
    /// Going up the path, perspective alternates.
    fn backpropagate(&mut self, path: &[NodeId], leaf_reward: f64) {
        let mut reward = leaf_reward;

        for &node_id in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.stats.visits += 1;
            node.stats.reward_sum += reward;
            reward = -reward;
        }
    }

    fn extract_results(&self, best_move: Move) -> MctsResult {
        let children = self
            .tree
            .root()
            .map(|root| {
                root.children
                    .iter()
                    .map(|&(mv, id)| {
                        let stats = &self.tree.get(id).stats;
                        ChildStats {
                            mv,
                            visits: stats.visits,
                            mean_reward: -stats.mean_reward(),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        MctsResult {
            best_move: Some(best_move),
            children,
            rollouts: self.config.rollouts,
            tree_size: self.tree.len(),
        }
    }
}
