//! Sunforest Core - Simultaneous-move game abstractions and common types
//!
//! This crate provides the core `SimultaneousGame` trait that defines the
//! interface between a rule set and the decoupled-UCT search.
//!
//! # Types
//!
//! - [`SimultaneousGame`] - Trait for games where both sides act each tick
//! - [`Side`] - The maximizing player or the minimizing opponent
//! - [`Joint`] - One value per side (actions, action lists, player states)

mod error;
mod game;
mod types;

pub use error::{Result, SunforestError};
pub use game::SimultaneousGame;
pub use types::{Joint, Side};
