//! Monte Carlo Tree Search for simultaneous-move games.
//!
//! This crate provides a generic decoupled UCT search that can be used with
//! any game implementing the `sunforest_core::SimultaneousGame` trait.
//!
//! # Features
//!
//! - **Decoupled bandits**: each side selects its own action per node with
//!   UCB1, after trying every action once in evaluator order
//! - **Transposition table**: nodes are keyed by game state and shared by
//!   every path that reaches it
//! - **Deadline bound**: the clock is polled at every node visit, so the
//!   search can always answer in time
//! - **Retention policy**: the table can be discarded, pruned or kept
//!   between turns
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use sunforest_mcts::{games::{Step, Tally}, Mcts, ScoreEvaluator, SearchConfig};
//!
//! let game = Tally::new(1);
//! let state = game.initial_state();
//!
//! let mut mcts = Mcts::new(SearchConfig::with_playouts(500), ScoreEvaluator);
//! let deadline = Instant::now() + Duration::from_secs(5);
//! let result = mcts.search(&game, &state, deadline).expect("tally never fails");
//!
//! assert_eq!(result.best_action, Step(2));
//! println!("{} playouts", result.stats.playouts);
//! ```

pub mod config;
pub mod evaluator;
pub mod games;
mod node;
pub mod search;
mod tree;

pub use config::{SearchConfig, TreeRetention};
pub use evaluator::{Evaluator, RolloutEvaluator, ScoreEvaluator};
pub use node::{ActionStats, SearchNode};
pub use search::{Mcts, SearchResult, SearchStats};
pub use tree::SearchTree;
