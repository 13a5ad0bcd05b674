//! Tally: a tiny simultaneous-move game for search validation.
//!
//! Each turn both sides pick a step of 0, 1 or 2. The player's margin grows
//! by its own step and shrinks by the opponent's. After a fixed number of
//! turns the margin is the score. Stepping 2 is dominant for both sides, so
//! a correct search must converge to it.

use std::fmt;

use sunforest_core::{Joint, Result, SimultaneousGame, SunforestError};

/// Largest legal step.
pub const MAX_STEP: u8 = 2;

/// One side's step.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Step(pub u8);

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STEP {}", self.0)
    }
}

/// Tally state: turns played and the running margin.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct TallyState {
    pub turn: u32,
    pub margin: i32,
}

/// The game, parameterized by its length in turns.
#[derive(Clone, Copy, Debug)]
pub struct Tally {
    turns: u32,
}

impl Tally {
    /// A game lasting `turns` turns.
    pub fn new(turns: u32) -> Self {
        Self { turns }
    }

    pub fn initial_state(&self) -> TallyState {
        TallyState::default()
    }
}

impl SimultaneousGame for Tally {
    type State = TallyState;
    type Action = Step;

    fn legal_actions(&self, state: &TallyState) -> Joint<Vec<Step>> {
        if self.is_terminal(state) {
            return Joint::default();
        }
        let steps: Vec<Step> = (0..=MAX_STEP).map(Step).collect();
        Joint::new(steps.clone(), steps)
    }

    fn apply(&self, state: &TallyState, actions: Joint<Step>) -> Result<TallyState> {
        if self.is_terminal(state) {
            return Err(SunforestError::IllegalAction(
                "the game is over".to_string(),
            ));
        }
        for step in [actions.player, actions.opponent] {
            if step.0 > MAX_STEP {
                return Err(SunforestError::IllegalAction(format!(
                    "{} is larger than {}",
                    step, MAX_STEP
                )));
            }
        }
        Ok(TallyState {
            turn: state.turn + 1,
            margin: state.margin + actions.player.0 as i32 - actions.opponent.0 as i32,
        })
    }

    fn is_terminal(&self, state: &TallyState) -> bool {
        state.turn >= self.turns
    }

    fn turn(&self, state: &TallyState) -> u32 {
        state.turn
    }

    fn score(&self, state: &TallyState) -> f32 {
        state.margin as f32
    }
}
