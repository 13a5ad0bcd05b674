//! Search node: one decoupled bandit per side.
//!
//! Each side first tries every legal action once, most promising first
//! (popped from the end of its "to explore" stack), then switches to UCB1
//! over the actions it has tried. The two sides choose independently.

use std::hash::Hash;

use sunforest_core::{Joint, Side};

/// Statistics for one action of one side.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionStats {
    /// Sum of rewards from this side's perspective.
    pub reward_sum: f64,

    /// Number of playouts that chose this action.
    pub visits: u32,
}

impl ActionStats {
    /// Mean reward, 0.0 if never visited.
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }
}

/// A node of the transposition table.
#[derive(Clone, Debug)]
pub struct SearchNode<A> {
    /// Untried actions, least promising first.
    to_explore: Joint<Vec<A>>,

    /// Tried actions with their statistics, in first-try order.
    explored: Joint<Vec<(A, ActionStats)>>,

    total_visits: u32,
}

impl<A: Copy + Eq + Hash + Ord> SearchNode<A> {
    /// Create a node from each side's ordered action list (least promising
    /// first).
    pub fn new(to_explore: Joint<Vec<A>>) -> Self {
        let explored = Joint::from_fn(|side| Vec::with_capacity(to_explore[side].len()));
        Self {
            to_explore,
            explored,
            total_visits: 0,
        }
    }

    /// Number of `update` calls so far.
    pub fn total_visits(&self) -> u32 {
        self.total_visits
    }

    /// Tried actions of `side` and their statistics.
    pub fn explored(&self, side: Side) -> &[(A, ActionStats)] {
        &self.explored[side]
    }

    /// Untried actions of `side`, least promising first.
    pub fn to_explore(&self, side: Side) -> &[A] {
        &self.to_explore[side]
    }

    /// Pick one action per side.
    ///
    /// An untried action is popped and recorded with zero visits so `update`
    /// finds it.
    pub fn select(&mut self, exploration_factor: f32) -> Joint<A> {
        Joint::from_fn(|side| self.select_side(side, exploration_factor))
    }

    fn select_side(&mut self, side: Side, exploration_factor: f32) -> A {
        if let Some(action) = self.to_explore[side].pop() {
            self.explored[side].push((action, ActionStats::default()));
            return action;
        }

        let ln_total = (self.total_visits.max(1) as f64).ln();
        let c = exploration_factor as f64;
        let mut best: Option<(f64, A)> = None;
        for &(action, stats) in &self.explored[side] {
            // Tried but not yet updated (deadline hit mid-playout) counts as
            // the most urgent arm.
            let ucb = if stats.visits == 0 {
                f64::INFINITY
            } else {
                stats.mean() + c * (ln_total / stats.visits as f64).sqrt()
            };
            let better = match best {
                None => true,
                Some((best_ucb, best_action)) => {
                    ucb > best_ucb || (ucb == best_ucb && action > best_action)
                }
            };
            if better {
                best = Some((ucb, action));
            }
        }

        // INVARIANT: a node is built with at least one action per side, and
        // every popped action moves to `explored`.
        best.map(|(_, action)| action)
            .expect("BUG: select on a side with no actions")
    }

    /// Record one playout that chose `actions` and ended with `result`
    /// (player's perspective).
    pub fn update(&mut self, actions: Joint<A>, result: f32) {
        self.total_visits += 1;
        for side in Side::BOTH {
            let reward = side.sign() as f64 * result as f64;
            let entry = self.entry_mut(side, actions[side]);
            entry.reward_sum += reward;
            entry.visits += 1;
        }
    }

    fn entry_mut(&mut self, side: Side, action: A) -> &mut ActionStats {
        let explored = &mut self.explored[side];
        let index = match explored.iter().position(|(a, _)| *a == action) {
            Some(index) => index,
            None => {
                explored.push((action, ActionStats::default()));
                explored.len() - 1
            }
        };
        &mut explored[index].1
    }

    /// The player's action with the highest mean among visited ones. With
    /// none visited, the most promising untried action.
    pub fn best_action(&self) -> Option<A> {
        let mut best: Option<(f64, A)> = None;
        for &(action, stats) in &self.explored[Side::Player] {
            if stats.visits == 0 {
                continue;
            }
            let mean = stats.mean();
            let better = match best {
                None => true,
                Some((best_mean, best_action)) => {
                    mean > best_mean || (mean == best_mean && action > best_action)
                }
            };
            if better {
                best = Some((mean, action));
            }
        }

        best.map(|(_, action)| action)
            .or_else(|| self.to_explore[Side::Player].last().copied())
            .or_else(|| self.explored[Side::Player].first().map(|(a, _)| *a))
    }
}
