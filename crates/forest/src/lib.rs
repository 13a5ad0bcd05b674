//! Sunforest Forest - Rules of the hexagonal tree-growing game
//!
//! Two players grow, seed and harvest trees on a hexagonal board over
//! 24 days. Trees collect sun unless a taller tree shades them, and the sun
//! turns around the board once every six days.
//!
//! States are immutable values: every transition produces a new
//! [`GameState`], which makes them usable as transposition-table keys.

mod action;
mod board;
mod cell;
mod game_impl;
mod hex;
mod player;
mod state;
mod tree;

pub use action::{Action, ActionKind};
pub use board::{Board, MAX_RADIUS, MAX_SEED_DISTANCE};
pub use cell::{CellId, CellSet, CellSetIter};
pub use game_impl::Forest;
pub use hex::{sun_direction, CubeCoord, DIRECTIONS};
pub use player::PlayerState;
pub use state::{GameState, COMPLETE_COST, GROW_COST, MAX_DAY, STARTING_NUTRIENTS};
pub use tree::{Tree, MAX_TREE_SIZE};
