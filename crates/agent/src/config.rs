//! Agent configuration.
//!
//! Defaults match the game's time limits: a long first turn, short turns
//! afterwards, and a deeper search horizon while the clock allows it.

use std::time::Duration;

use sunforest_mcts::{SearchConfig, TreeRetention};

use crate::TimeBudget;

/// Everything an [`Agent`](crate::Agent) needs besides the board.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// Time allowed on the first turn.
    pub first_turn_budget: Duration,

    /// Time allowed on every later turn.
    pub turn_budget: Duration,

    /// Days the tree walk may look ahead on the first turn.
    pub first_turn_depth: u32,

    /// Days the tree walk may look ahead on later turns.
    pub turn_depth: u32,

    /// UCB1 exploration constant.
    pub exploration_factor: f32,

    /// Transposition table policy between turns.
    pub retention: TreeRetention,

    /// Optional playout cap per turn, for reproducible games.
    pub max_playouts: Option<u32>,

    /// Seed for the ordering jitter.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            first_turn_budget: Duration::from_millis(1000),
            turn_budget: Duration::from_millis(100),
            first_turn_depth: 6,
            turn_depth: 3,
            exploration_factor: SearchConfig::default().exploration_factor,
            retention: TreeRetention::default(),
            max_playouts: None,
            seed: 0,
        }
    }
}

impl AgentConfig {
    /// Default limits with every turn allowed `budget`.
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            first_turn_budget: budget,
            turn_budget: budget,
            ..Default::default()
        }
    }

    /// Search depth for the first or a later turn.
    pub fn depth(&self, first_turn: bool) -> u32 {
        if first_turn {
            self.first_turn_depth
        } else {
            self.turn_depth
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            exploration_factor: self.exploration_factor,
            max_depth: self.first_turn_depth,
            max_playouts: self.max_playouts,
            retention: self.retention,
        }
    }

    pub fn time_budget(&self) -> TimeBudget {
        TimeBudget::new(self.first_turn_budget, self.turn_budget)
    }
}
