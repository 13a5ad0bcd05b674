//! Action ordering for fresh search nodes.
//!
//! Every action of a new node gets one playout before UCB1 takes over, so
//! the order only decides which actions are tried first. Actions are sorted
//! ascending by [`OrderingKey`] and popped from the end.

use std::cell::RefCell;
use std::time::Instant;

use rand::Rng;
use sunforest_core::{Result, Side, SimultaneousGame};
use sunforest_forest::{Action, ActionKind, Board, Forest, GameState};
use sunforest_mcts::Evaluator;

/// Day from which harvesting is preferred over planting.
pub const LATE_GAME_DAY: u8 = 12;

/// Sort key of one action; greater keys are tried first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderingKey {
    /// Richness of the target cell, 0 for WAIT.
    pub richness: u8,
    /// Action type rank, COMPLETE bumped by one late in the game.
    pub priority: u8,
    /// Negated sun cost: cheaper first.
    pub neg_cost: i64,
    /// Seeded noise so equal actions do not always come in the same order.
    pub jitter: u16,
}

/// Orders actions by richness, type and cost, and scores playouts with the
/// game's projected score.
pub struct HeuristicEvaluator<R: Rng> {
    rng: RefCell<R>,
}

impl<R: Rng> HeuristicEvaluator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }

    /// Key of `action` played by `side` in `state`.
    pub fn ordering_key(
        &self,
        board: &Board,
        state: &GameState,
        side: Side,
        action: Action,
    ) -> OrderingKey {
        let richness = action.target().map_or(0, |cell| board.richness(cell));

        let kind = action.kind();
        let mut priority = kind.rank();
        if kind == ActionKind::Complete && state.day() >= LATE_GAME_DAY {
            priority += 1;
        }

        let cost = state.action_cost(side, action).unwrap_or(0);

        OrderingKey {
            richness,
            priority,
            neg_cost: -(cost as i64),
            jitter: self.rng.borrow_mut().gen(),
        }
    }
}

impl<R: Rng> Evaluator<Forest> for HeuristicEvaluator<R> {
    fn order_actions(
        &self,
        game: &Forest,
        state: &GameState,
        side: Side,
        actions: &mut [Action],
    ) {
        let board = game.board();
        actions.sort_by_cached_key(|&action| self.ordering_key(board, state, side, action));
    }

    fn evaluate(&self, game: &Forest, state: &GameState, _deadline: Instant) -> Result<f32> {
        Ok(game.score(state))
    }
}
