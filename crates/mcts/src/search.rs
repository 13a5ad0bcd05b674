//! Decoupled UCT search over a shared transposition table.
//!
//! Each playout walks from the root, asking every node it meets for one
//! action per side, until the game ends, the depth horizon is reached or
//! the deadline passes. The final state is evaluated once and the result
//! is backpropagated to every node on the path.

use std::marker::PhantomData;
use std::time::{Duration, Instant};

use sunforest_core::{Joint, Result, Side, SimultaneousGame, SunforestError};
use tracing::{debug, trace};

use crate::{
    config::{SearchConfig, TreeRetention},
    evaluator::Evaluator,
    node::{ActionStats, SearchNode},
    tree::SearchTree,
};

/// Playouts between two progress traces.
const TRACE_INTERVAL: u32 = 1024;

/// Counters from one `explore` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed playouts.
    pub playouts: u32,

    /// Nodes in the transposition table afterwards.
    pub nodes: usize,

    /// Wall time spent.
    pub elapsed: Duration,
}

/// Result of a full search from one root.
#[derive(Clone, Debug)]
pub struct SearchResult<A> {
    /// Player action with the best mean reward.
    pub best_action: A,

    /// Statistics of every action tried at the root, per side.
    pub root_stats: Joint<Vec<(A, ActionStats)>>,

    pub stats: SearchStats,
}

impl<A: Copy + Eq> SearchResult<A> {
    /// Root statistics of one action of `side`, if it was tried.
    pub fn action_stats(&self, side: Side, action: A) -> Option<ActionStats> {
        self.root_stats[side]
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, stats)| *stats)
    }
}

/// Monte Carlo Tree Search for simultaneous-move games.
///
/// Generic over:
/// - `G`: The game being played
/// - `E`: The evaluator ordering actions and scoring playouts
pub struct Mcts<G: SimultaneousGame, E: Evaluator<G>> {
    config: SearchConfig,
    evaluator: E,
    tree: SearchTree<G::State, G::Action>,
    _game: PhantomData<G>,
}

impl<G, E> Mcts<G, E>
where
    G: SimultaneousGame,
    E: Evaluator<G>,
{
    /// Create a new search with an empty transposition table.
    pub fn new(config: SearchConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            tree: SearchTree::new(),
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Mutable access to the configuration, e.g. to change the depth
    /// between turns.
    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// The transposition table.
    pub fn tree(&self) -> &SearchTree<G::State, G::Action> {
        &self.tree
    }

    /// Apply the retention policy before searching from a new root.
    pub fn begin_turn(&mut self, game: &G, root: &G::State) {
        let before = self.tree.len();
        match self.config.retention {
            TreeRetention::Discard => self.tree.clear(),
            TreeRetention::PruneBeforeTurn => {
                let turn = game.turn(root);
                self.tree.prune(|state| game.turn(state) >= turn);
            }
            TreeRetention::Keep => {}
        }
        trace!(
            retention = ?self.config.retention,
            before,
            after = self.tree.len(),
            "applied tree retention"
        );
    }

    /// Run playouts from `root` until `deadline` (or the playout cap).
    ///
    /// # Errors
    /// Returns the first transition or evaluation error; the statistics
    /// gathered so far stay in the table.
    pub fn explore(
        &mut self,
        game: &G,
        root: &G::State,
        deadline: Instant,
    ) -> Result<SearchStats> {
        let start = Instant::now();
        let horizon = game.turn(root).saturating_add(self.config.max_depth);
        let exploration_factor = self.config.exploration_factor;
        let mut path: Vec<(G::State, Joint<G::Action>)> = Vec::new();
        let mut playouts = 0u32;

        while Instant::now() < deadline && !self.config.playouts_exhausted(playouts) {
            path.clear();
            let mut state = root.clone();

            while !game.is_terminal(&state) && game.turn(&state) < horizon {
                if Instant::now() >= deadline {
                    break;
                }
                let evaluator = &self.evaluator;
                let node = self
                    .tree
                    .get_or_insert_with(&state, || new_node(evaluator, game, &state));
                let actions = node.select(exploration_factor);
                let next = game.apply(&state, actions)?;
                path.push((state, actions));
                state = next;
            }

            let result = self.evaluator.evaluate(game, &state, deadline)?;
            for (visited, actions) in &path {
                if let Some(node) = self.tree.get_mut(visited) {
                    node.update(*actions, result);
                }
            }

            playouts += 1;
            if playouts % TRACE_INTERVAL == 0 {
                trace!(playouts, nodes = self.tree.len(), "search progress");
            }
        }

        let stats = SearchStats {
            playouts,
            nodes: self.tree.len(),
            elapsed: start.elapsed(),
        };
        debug!(
            playouts = stats.playouts,
            nodes = stats.nodes,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "explore finished"
        );
        Ok(stats)
    }

    /// Best player action at `root`.
    ///
    /// Builds the root node if no playout reached it, so a search that ran
    /// out of time still answers with the most promising untried action.
    ///
    /// # Errors
    /// Returns `SunforestError::NoLegalActions` if `root` is terminal.
    pub fn best_action(&mut self, game: &G, root: &G::State) -> Result<G::Action> {
        if game.is_terminal(root) {
            return Err(SunforestError::NoLegalActions);
        }
        let evaluator = &self.evaluator;
        self.tree
            .get_or_insert_with(root, || new_node(evaluator, game, root))
            .best_action()
            .ok_or(SunforestError::NoLegalActions)
    }

    /// Explore from `root` until `deadline`, then report the best action
    /// and the root statistics.
    ///
    /// # Errors
    /// See [`Mcts::explore`] and [`Mcts::best_action`].
    pub fn search(
        &mut self,
        game: &G,
        root: &G::State,
        deadline: Instant,
    ) -> Result<SearchResult<G::Action>> {
        let stats = self.explore(game, root, deadline)?;
        let best_action = self.best_action(game, root)?;

        let node = self
            .tree
            .get(root)
            .expect("BUG: best_action did not create the root node");
        let root_stats = Joint::from_fn(|side| node.explored(side).to_vec());

        Ok(SearchResult {
            best_action,
            root_stats,
            stats,
        })
    }
}

/// Build a fresh node for `state` with both action lists ordered by the
/// evaluator.
fn new_node<G, E>(evaluator: &E, game: &G, state: &G::State) -> SearchNode<G::Action>
where
    G: SimultaneousGame,
    E: Evaluator<G>,
{
    let mut actions = game.legal_actions(state);
    for side in Side::BOTH {
        evaluator.order_actions(game, state, side, &mut actions[side]);
    }
    SearchNode::new(actions)
}
