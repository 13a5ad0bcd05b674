//! Sunforest Agent - search-driven player for the forest game
//!
//! Ties the generic search to the forest rules:
//! - [`HeuristicEvaluator`] orders a fresh node's actions by cell richness,
//!   action type and cost
//! - [`TimeBudget`] turns the per-turn time limit into a search deadline and
//!   learns a safety margin from past overruns
//! - [`Agent`] runs one turn: retention, search, best action, logging
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sunforest_agent::{Agent, AgentConfig};
//! use sunforest_forest::Board;
//!
//! let config = AgentConfig::with_budget(Duration::from_millis(20));
//! let mut agent = Agent::new(Board::standard(), config);
//! let state = agent.game().initial_state();
//! let report = agent.act(&state).expect("opening is never terminal");
//! println!("{} after {} playouts", report.action, report.playouts);
//! ```

mod agent;
mod budget;
mod config;
mod heuristic;

pub use agent::{Agent, TurnReport};
pub use budget::{TimeBudget, INITIAL_MARGIN, MARGIN_DECAY};
pub use config::AgentConfig;
pub use heuristic::{HeuristicEvaluator, OrderingKey, LATE_GAME_DAY};
