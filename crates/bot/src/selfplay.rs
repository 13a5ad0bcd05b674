//! Agent-versus-agent games.
//!
//! Both seats are played by an [`Agent`]; the opponent's agent is shown the
//! position with the seats swapped, so it always thinks of itself as the
//! player. Records serialize with serde for MessagePack output.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sunforest_agent::{Agent, AgentConfig};
use sunforest_core::{Joint, Result, Side, SimultaneousGame};
use sunforest_forest::{Board, GameState};
use sunforest_mcts::TreeRetention;
use tracing::debug;

/// How each game is played.
#[derive(Clone, Debug)]
pub struct SelfplaySettings {
    /// Per-turn time budget for both agents.
    pub budget: Duration,
    /// Playout cap per turn. With a cap and a generous budget, games are
    /// reproducible from their seed.
    pub max_playouts: Option<u32>,
    pub retention: TreeRetention,
    /// Stop a game that has not ended after this many ticks.
    pub max_ticks: usize,
}

impl Default for SelfplaySettings {
    fn default() -> Self {
        Self {
            budget: Duration::from_millis(100),
            max_playouts: None,
            retention: TreeRetention::default(),
            max_ticks: 1000,
        }
    }
}

impl SelfplaySettings {
    fn agent_config(&self, seed: u64) -> AgentConfig {
        AgentConfig {
            max_playouts: self.max_playouts,
            retention: self.retention,
            seed,
            ..AgentConfig::with_budget(self.budget)
        }
    }
}

/// One simultaneous step of a recorded game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TickRecord {
    pub day: u8,
    /// Action lines as the referee would receive them.
    pub player: String,
    pub opponent: String,
    pub player_playouts: u32,
    pub opponent_playouts: u32,
}

/// A complete game.
#[derive(Serialize, Deserialize, Debug)]
pub struct GameRecord {
    pub ticks: Vec<TickRecord>,

    /// End-of-game scores, player first.
    pub final_scores: [u32; 2],

    /// +1 player win, -1 opponent win, 0 draw.
    pub outcome: f32,

    /// Seed, settings and timing.
    pub metadata: HashMap<String, serde_json::Value>,
}

impl GameRecord {
    /// True if the game was cut off by the tick cap.
    pub fn truncated(&self) -> bool {
        self.metadata
            .get("truncated")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Play one game on `board` from the standard opening.
///
/// # Errors
/// Returns the first agent or transition error.
pub fn play_game(board: &Board, seed: u64, settings: &SelfplaySettings) -> Result<GameRecord> {
    let start = Instant::now();
    let mut player = Agent::new(board.clone(), settings.agent_config(seed));
    let mut opponent = Agent::new(
        board.clone(),
        settings.agent_config(seed.wrapping_add(1)),
    );
    let game = player.game().clone();

    let mut state = game.initial_state();
    let mut ticks = Vec::new();
    while !game.is_terminal(&state) && ticks.len() < settings.max_ticks {
        let mine = player.act(&state)?;
        let theirs = opponent.act(&state.swapped())?;
        ticks.push(TickRecord {
            day: state.day(),
            player: mine.action.to_string(),
            opponent: theirs.action.to_string(),
            player_playouts: mine.playouts,
            opponent_playouts: theirs.playouts,
        });
        state = game.apply(&state, Joint::new(mine.action, theirs.action))?;
    }

    let record = finish(&state, board, ticks, seed, settings, start.elapsed());
    debug!(
        seed,
        ticks = record.ticks.len(),
        player = record.final_scores[0],
        opponent = record.final_scores[1],
        "game over"
    );
    Ok(record)
}

fn finish(
    state: &GameState,
    board: &Board,
    ticks: Vec<TickRecord>,
    seed: u64,
    settings: &SelfplaySettings,
    elapsed: Duration,
) -> GameRecord {
    let final_scores = Side::BOTH.map(|side| state.player(side).final_score());
    let margin = state.score(board);

    let mut metadata = HashMap::new();
    metadata.insert("seed".to_string(), serde_json::json!(seed));
    metadata.insert("days".to_string(), serde_json::json!(state.day()));
    metadata.insert("truncated".to_string(), serde_json::json!(!state.is_terminal()));
    metadata.insert(
        "budget_ms".to_string(),
        serde_json::json!(settings.budget.as_millis() as u64),
    );
    metadata.insert(
        "max_playouts".to_string(),
        serde_json::json!(settings.max_playouts),
    );
    metadata.insert(
        "elapsed_ms".to_string(),
        serde_json::json!(elapsed.as_secs_f64() * 1e3),
    );

    GameRecord {
        ticks,
        final_scores,
        outcome: margin.signum() as f32,
        metadata,
    }
}
