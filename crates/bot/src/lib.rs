//! Sunforest Bot - the forest agent behind a line protocol
//!
//! - [`protocol`] reads the board and per-turn positions from text input and
//!   formats the chosen action
//! - [`selfplay`] pits two agents against each other and records the game

pub mod protocol;
pub mod selfplay;

pub use protocol::{read_board, read_turn, write_board, write_turn, LineReader, TurnInput};
pub use selfplay::{play_game, GameRecord, SelfplaySettings, TickRecord};
