//! One search-driven player.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sunforest_core::Result;
use sunforest_forest::{Action, Board, Forest, GameState};
use sunforest_mcts::Mcts;
use tracing::info;

use crate::{AgentConfig, HeuristicEvaluator, TimeBudget};

/// What happened during one turn.
#[derive(Clone, Copy, Debug)]
pub struct TurnReport {
    pub action: Action,
    pub playouts: u32,
    /// Transposition table size after the search.
    pub nodes: usize,
    pub elapsed: Duration,
    /// Safety margin for the next turn.
    pub margin: Duration,
}

/// Plays the player seat of a forest game under a per-turn time budget.
pub struct Agent {
    game: Forest,
    mcts: Mcts<Forest, HeuristicEvaluator<ChaCha8Rng>>,
    budget: TimeBudget,
    config: AgentConfig,
}

impl Agent {
    pub fn new(board: Board, config: AgentConfig) -> Self {
        let evaluator = HeuristicEvaluator::new(ChaCha8Rng::seed_from_u64(config.seed));
        Self {
            game: Forest::new(board),
            mcts: Mcts::new(config.search_config(), evaluator),
            budget: config.time_budget(),
            config,
        }
    }

    pub fn game(&self) -> &Forest {
        &self.game
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Choose the player's action in `state` within this turn's budget.
    ///
    /// # Errors
    /// Returns a transition error if the search reached an inconsistent
    /// state, or `SunforestError::NoLegalActions` if the game is over.
    pub fn act(&mut self, state: &GameState) -> Result<TurnReport> {
        self.act_from(state, Instant::now())
    }

    /// Like [`Agent::act`] for a turn whose clock started at `start`, such
    /// as when its first input line arrived.
    pub fn act_from(&mut self, state: &GameState, start: Instant) -> Result<TurnReport> {
        let deadline = self.budget.deadline(start);
        self.act_until(state, start, deadline)
    }

    /// Like [`Agent::act`] with an explicit deadline. A deadline already in
    /// the past still yields an action.
    pub fn act_before(&mut self, state: &GameState, deadline: Instant) -> Result<TurnReport> {
        self.act_until(state, Instant::now(), deadline)
    }

    fn act_until(
        &mut self,
        state: &GameState,
        start: Instant,
        deadline: Instant,
    ) -> Result<TurnReport> {
        let depth = self.config.depth(self.budget.is_first_turn());
        self.mcts.config_mut().max_depth = depth;
        self.mcts.begin_turn(&self.game, state);

        let stats = self.mcts.explore(&self.game, state, deadline)?;
        let action = self.mcts.best_action(&self.game, state)?;

        let elapsed = start.elapsed();
        self.budget.record(elapsed, stats.playouts, state.day() as u32);

        let report = TurnReport {
            action,
            playouts: stats.playouts,
            nodes: stats.nodes,
            elapsed,
            margin: self.budget.margin(),
        };
        info!(
            day = state.day(),
            %action,
            depth,
            playouts = report.playouts,
            nodes = report.nodes,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            margin_ms = report.margin.as_secs_f64() * 1e3,
            "turn done"
        );
        Ok(report)
    }
}
