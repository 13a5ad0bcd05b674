//! Test game implementations for search validation.
//!
//! These games are small enough that the right answer is known, which makes
//! them useful for checking the search before pointing it at the forest.

pub mod tally;

pub use tally::{Step, Tally, TallyState, MAX_STEP};
