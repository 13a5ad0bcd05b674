use std::fmt::Debug;
use std::hash::Hash;

use crate::{Joint, Result};

/// A two-player simultaneous-move game abstraction for tree search.
///
/// Both sides pick an action every tick without seeing the other's choice,
/// and the pair is resolved by a single transition. Scores are always from
/// the perspective of [`Side::Player`](crate::Side::Player): the player
/// maximizes, the opponent minimizes.
pub trait SimultaneousGame {
    /// The game state. Equality and hashing key the transposition table.
    type State: Clone + Eq + Hash;

    /// A single side's action. The total order breaks selection ties.
    type Action: Copy + Eq + Hash + Ord + Debug;

    /// Returns the legal actions of each side. Never empty for a
    /// non-terminal state.
    fn legal_actions(&self, state: &Self::State) -> Joint<Vec<Self::Action>>;

    /// Resolves one tick where both sides act, returning a new state
    /// (immutable operation).
    ///
    /// # Errors
    /// Returns an error if an action does not fit the state; callers treat
    /// this as fatal for the current decision.
    fn apply(&self, state: &Self::State, actions: Joint<Self::Action>) -> Result<Self::State>;

    /// Returns true once the game has ended.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Coarse progress counter (days, rounds) used to bound search depth.
    fn turn(&self, state: &Self::State) -> u32;

    /// Signed margin for the player: exact on terminal states, an estimate
    /// otherwise.
    fn score(&self, state: &Self::State) -> f32;
}
