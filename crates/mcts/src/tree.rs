//! Transposition table: game state to search node.
//!
//! There are no parent/child links. Any two paths reaching the same state
//! share one node, which is what makes the table a DAG rather than a tree.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::SearchNode;

/// State-keyed node storage shared across playouts.
#[derive(Debug)]
pub struct SearchTree<S, A> {
    nodes: HashMap<S, SearchNode<A>>,
}

impl<S: Clone + Eq + Hash, A: Copy + Eq + Hash + Ord> SearchTree<S, A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Get the node for `state`, if one exists.
    pub fn get(&self, state: &S) -> Option<&SearchNode<A>> {
        self.nodes.get(state)
    }

    /// Get a mutable reference to the node for `state`.
    pub fn get_mut(&mut self, state: &S) -> Option<&mut SearchNode<A>> {
        self.nodes.get_mut(state)
    }

    /// Get the node for `state`, building it with `make` on first visit.
    pub fn get_or_insert_with(
        &mut self,
        state: &S,
        make: impl FnOnce() -> SearchNode<A>,
    ) -> &mut SearchNode<A> {
        // Look up first so the common hit path never clones the key.
        if self.nodes.contains_key(state) {
            return self
                .nodes
                .get_mut(state)
                .expect("BUG: node vanished between lookups");
        }
        self.nodes.entry(state.clone()).or_insert_with(make)
    }

    /// Every `(state, node)` pair, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &SearchNode<A>)> {
        self.nodes.iter()
    }

    /// Keep only the nodes whose state satisfies `keep`.
    pub fn prune(&mut self, mut keep: impl FnMut(&S) -> bool) {
        self.nodes.retain(|state, _| keep(state));
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Clone + Eq + Hash, A: Copy + Eq + Hash + Ord> Default for SearchTree<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
