//! The bot against a scripted referee: positions from real play are written
//! in the referee's format, read back, and answered with legal actions.

use std::io::Cursor;
use std::time::Duration;

use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sunforest_agent::{Agent, AgentConfig};
use sunforest_bot::{read_board, read_turn, write_board, write_turn, LineReader};
use sunforest_core::{Side, SimultaneousGame};
use sunforest_forest::{Action, Board, Forest, GameState};

/// Play at least `ticks` random joint actions from the opening, stopping
/// where neither side is waiting, as the referee only asks for actions then.
fn random_position(game: &Forest, seed: u64, ticks: usize) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = game.initial_state();
    let mut played = 0;
    while !game.is_terminal(&state) {
        let waiting = Side::BOTH.iter().any(|&side| state.player(side).is_waiting);
        if played >= ticks && !waiting {
            break;
        }
        played += 1;
        let legal = game.legal_actions(&state);
        let actions = legal.map(|a| *a.choose(&mut rng).expect("WAIT is always legal"));
        state = game.apply(&state, actions).unwrap();
    }
    state
}

#[test]
fn transcript_of_several_turns() {
    let game = Forest::new(Board::standard());
    let positions: Vec<GameState> = (0..4)
        .map(|i| random_position(&game, i, 10 * i as usize))
        .filter(|s| !s.is_terminal())
        .collect();

    let mut transcript = write_board(game.board());
    for state in &positions {
        transcript.push_str(&write_turn(state));
    }

    let mut reader = LineReader::new(Cursor::new(transcript.into_bytes()));
    let board = read_board(&mut reader).unwrap();
    let config = AgentConfig {
        max_playouts: Some(16),
        ..AgentConfig::with_budget(Duration::from_secs(10))
    };
    let mut agent = Agent::new(board, config);

    let mut answered = 0;
    while let Some(turn) = read_turn(&mut reader, agent.game().board()).unwrap() {
        assert_eq!(turn.state, positions[answered]);
        let report = agent.act_from(&turn.state, turn.received).unwrap();

        let line = report.action.to_string();
        let parsed: Action = line.parse().unwrap();
        assert_eq!(parsed, report.action);
        assert!(game.legal_actions(&turn.state).player.contains(&parsed));
        answered += 1;
    }
    assert_eq!(answered, positions.len());
}

#[test]
fn opponent_seat_through_swapped_input() {
    let game = Forest::new(Board::standard());
    let state = random_position(&game, 9, 6);
    let seen = state.swapped();

    let text = write_turn(&seen);
    let mut reader = LineReader::new(Cursor::new(text.into_bytes()));
    let turn = read_turn(&mut reader, game.board()).unwrap().unwrap();
    assert_eq!(turn.state, seen);

    let mut agent = Agent::new(
        game.board().clone(),
        AgentConfig {
            max_playouts: Some(8),
            ..AgentConfig::with_budget(Duration::from_secs(10))
        },
    );
    let action = agent.act(&turn.state).unwrap().action;
    assert!(game.legal_actions(&state).opponent.contains(&action));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any position the referee can ask about survives its format unchanged.
    #[test]
    fn reachable_positions_survive_the_wire(seed in any::<u64>(), ticks in 0usize..120) {
        let game = Forest::new(Board::standard());
        let state = random_position(&game, seed, ticks);
        prop_assume!(!state.is_terminal());

        let mut reader = LineReader::new(Cursor::new(write_turn(&state).into_bytes()));
        let turn = read_turn(&mut reader, game.board()).unwrap().unwrap();
        prop_assert_eq!(turn.state, state);
    }
}
