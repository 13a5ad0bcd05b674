//! Evaluation abstraction for the search.
//!
//! An evaluator does two jobs:
//! - orders a fresh node's actions so the most promising are tried first
//! - scores the state a playout stops in
//!
//! [`ScoreEvaluator`] uses the game's own score; [`RolloutEvaluator`] plays
//! random joint actions a few steps further before scoring.

use std::cell::RefCell;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use sunforest_core::{Joint, Result, Side, SimultaneousGame};

/// Trait for ordering actions and evaluating game states.
pub trait Evaluator<G: SimultaneousGame> {
    /// Sort `actions` of `side` so that the most promising come last (they
    /// are popped from the end). Defaults to the action total order.
    fn order_actions(&self, game: &G, state: &G::State, side: Side, actions: &mut [G::Action]) {
        let _ = (game, state, side);
        actions.sort_unstable();
    }

    /// Value of `state` from the player's perspective. Evaluators that
    /// simulate further stop at `deadline` and score where they are.
    ///
    /// # Errors
    /// Propagates transition errors from evaluators that simulate further.
    fn evaluate(&self, game: &G, state: &G::State, deadline: Instant) -> Result<f32>;
}

/// Scores the state directly with [`SimultaneousGame::score`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreEvaluator;

impl<G: SimultaneousGame> Evaluator<G> for ScoreEvaluator {
    fn evaluate(&self, game: &G, state: &G::State, _deadline: Instant) -> Result<f32> {
        Ok(game.score(state))
    }
}

/// Evaluator playing uniformly random joint actions before scoring.
pub struct RolloutEvaluator<R: Rng> {
    /// Random number generator (wrapped in RefCell for interior mutability).
    rng: RefCell<R>,

    /// Maximum transitions in a random playout.
    max_rollout_steps: usize,
}

impl<R: Rng> RolloutEvaluator<R> {
    /// Create a new rollout evaluator.
    ///
    /// # Arguments
    /// * `rng` - Random number generator for rollouts
    /// * `max_rollout_steps` - Maximum transitions in a random playout
    pub fn new(rng: R, max_rollout_steps: usize) -> Self {
        Self {
            rng: RefCell::new(rng),
            max_rollout_steps,
        }
    }

    /// Play random joint actions until terminal, out of steps or past
    /// `deadline`.
    fn rollout<G: SimultaneousGame>(
        &self,
        game: &G,
        initial_state: &G::State,
        deadline: Instant,
    ) -> Result<G::State> {
        let mut state = initial_state.clone();
        let mut rng = self.rng.borrow_mut();

        for _ in 0..self.max_rollout_steps {
            if game.is_terminal(&state) || Instant::now() >= deadline {
                break;
            }
            let legal = game.legal_actions(&state);
            let (Some(&player), Some(&opponent)) = (
                legal.player.choose(&mut *rng),
                legal.opponent.choose(&mut *rng),
            ) else {
                break;
            };
            state = game.apply(&state, Joint::new(player, opponent))?;
        }

        Ok(state)
    }
}

impl<G: SimultaneousGame, R: Rng> Evaluator<G> for RolloutEvaluator<R> {
    fn evaluate(&self, game: &G, state: &G::State, deadline: Instant) -> Result<f32> {
        let final_state = self.rollout(game, state, deadline)?;
        Ok(game.score(&final_state))
    }
}
