//! Forest game bot and self-play tool.
//!
//! `sunforest play` speaks the referee's line protocol on stdin/stdout.
//! `sunforest selfplay` plays agent-versus-agent games in parallel and can
//! save them in MessagePack format. Logs always go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use sunforest_agent::{Agent, AgentConfig};
use sunforest_bot::protocol::{read_board, read_turn, LineReader};
use sunforest_bot::selfplay::{play_game, GameRecord, SelfplaySettings};
use sunforest_forest::Board;
use sunforest_mcts::TreeRetention;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Forest game bot driven by simultaneous-move tree search.
#[derive(Parser)]
#[command(name = "sunforest")]
#[command(about = "Play the forest game over stdin/stdout or run self-play games")]
struct Cli {
    /// Default log level when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game against the referee on stdin/stdout.
    Play {
        /// Seed for the action-ordering jitter.
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Transposition table policy between turns.
        #[arg(long, value_enum, default_value = "discard")]
        retention: Retention,

        /// Time allowed on the first turn, in milliseconds.
        #[arg(long, default_value = "1000")]
        first_turn_ms: u64,

        /// Time allowed on later turns, in milliseconds.
        #[arg(long, default_value = "100")]
        turn_ms: u64,
    },

    /// Play agent-versus-agent games.
    Selfplay {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Per-turn time budget for both agents, in milliseconds.
        #[arg(short, long, default_value = "100")]
        budget_ms: u64,

        /// Base seed; game `i` uses `seed + i * 1000`.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Playout cap per turn, for reproducible games.
        #[arg(long)]
        max_playouts: Option<u32>,

        /// Transposition table policy between turns.
        #[arg(long, value_enum, default_value = "discard")]
        retention: Retention,

        /// Directory for `game_NNNNNN.msgpack` records. Nothing is written
        /// without it.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Retention {
    Discard,
    Prune,
    Keep,
}

impl From<Retention> for TreeRetention {
    fn from(value: Retention) -> Self {
        match value {
            Retention::Discard => TreeRetention::Discard,
            Retention::Prune => TreeRetention::PruneBeforeTurn,
            Retention::Keep => TreeRetention::Keep,
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Run the play command until the referee closes stdin.
fn cmd_play(config: AgentConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = LineReader::new(stdin.lock());
    let board = read_board(&mut reader).context("Failed to read the cell listing")?;
    let mut agent = Agent::new(board, config);
    let mut stdout = io::stdout().lock();

    while let Some(turn) = read_turn(&mut reader, agent.game().board())
        .with_context(|| format!("Failed to read turn input near line {}", reader.line_number()))?
    {
        let report = agent
            .act_from(&turn.state, turn.received)
            .with_context(|| format!("Search failed on day {}", turn.state.day()))?;
        writeln!(stdout, "{}", report.action).context("Failed to write action")?;
        stdout.flush().context("Failed to flush stdout")?;
    }
    info!("input closed, game over");
    Ok(())
}

/// Run the selfplay command.
fn cmd_selfplay(
    games: usize,
    settings: SelfplaySettings,
    seed: u64,
    output: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = &output {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    println!(
        "Playing {} games, {} ms per turn, playout cap {:?}",
        games,
        settings.budget.as_millis(),
        settings.max_playouts
    );
    let start = Instant::now();
    let board = Board::standard();

    let records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| {
            let game_seed = seed.wrapping_add(i as u64 * 1000);
            play_game(&board, game_seed, &settings)
                .with_context(|| format!("Game {} (seed {}) failed", i, game_seed))
        })
        .collect::<Result<_>>()?;

    if let Some(dir) = &output {
        for (i, record) in records.iter().enumerate() {
            let filename = dir.join(format!("game_{:06}.msgpack", i));
            let file = File::create(&filename)
                .with_context(|| format!("Failed to create file: {:?}", filename))?;
            let mut writer = BufWriter::new(file);
            rmp_serde::encode::write_named(&mut writer, record)
                .with_context(|| format!("Failed to serialize game {}", i))?;
        }
    }

    let elapsed = start.elapsed();
    let player_wins = records.iter().filter(|r| r.outcome > 0.5).count();
    let opponent_wins = records.iter().filter(|r| r.outcome < -0.5).count();
    let draws = records.len() - player_wins - opponent_wins;
    let truncated = records.iter().filter(|r| r.truncated()).count();
    let total_ticks: usize = records.iter().map(|r| r.ticks.len()).sum();

    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!(
        "Average game length: {:.1} ticks",
        total_ticks as f64 / games.max(1) as f64
    );
    println!(
        "Outcomes: player {}, opponent {}, draws {}",
        player_wins, opponent_wins, draws
    );
    if truncated > 0 {
        println!("Truncated games: {}", truncated);
    }
    if let Some(dir) = &output {
        println!("Files saved to: {:?}", dir);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Play {
            seed,
            retention,
            first_turn_ms,
            turn_ms,
        } => cmd_play(AgentConfig {
            first_turn_budget: Duration::from_millis(first_turn_ms),
            turn_budget: Duration::from_millis(turn_ms),
            retention: retention.into(),
            seed,
            ..AgentConfig::default()
        }),

        Commands::Selfplay {
            games,
            budget_ms,
            seed,
            max_playouts,
            retention,
            output,
        } => cmd_selfplay(
            games,
            SelfplaySettings {
                budget: Duration::from_millis(budget_ms),
                max_playouts,
                retention: retention.into(),
                ..SelfplaySettings::default()
            },
            seed,
            output,
        ),
    }
}
