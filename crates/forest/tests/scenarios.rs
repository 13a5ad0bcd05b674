//! Hand-built positions checked against the game rules.

use sunforest_core::{Joint, Side, SunforestError};
use sunforest_forest::{Action, Board, CellId, GameState, PlayerState, Tree};

fn cell(i: u8) -> CellId {
    CellId::new(i).unwrap()
}

#[test]
fn single_seed_grows_and_collects_sun() {
    let board = Board::standard();
    let state = GameState::new(
        0,
        20,
        vec![
            Tree::new(cell(1), 0, Side::Player, false),
            Tree::new(cell(4), 0, Side::Opponent, false),
        ],
        PlayerState::new(5, 0, false),
        PlayerState::new(5, 0, false),
        &board,
    )
    .unwrap();

    let actions = state.legal_actions(&board);
    for side in Side::BOTH {
        assert!(actions[side].contains(&Action::Wait));
        let grow = Action::Grow {
            target: if side == Side::Player { cell(1) } else { cell(4) },
        };
        assert!(actions[side].contains(&grow));
        assert_eq!(state.action_cost(side, grow), Some(1));
    }

    let grown = state
        .apply_actions(
            Joint::new(Action::Grow { target: cell(1) }, Action::Wait),
            &board,
        )
        .unwrap();
    assert_eq!(grown.player(Side::Player).sun, 4);

    let next_day = grown
        .apply_actions(Joint::new(Action::Wait, Action::Wait), &board)
        .unwrap();
    assert_eq!(next_day.day(), 1);
    assert_eq!(next_day.player(Side::Player).sun, 5);
    assert_eq!(next_day.player(Side::Opponent).sun, 5);
}

#[test]
fn fourth_seed_costs_three() {
    let board = Board::standard();
    let trees = vec![
        Tree::new(cell(0), 1, Side::Player, false),
        Tree::new(cell(7), 0, Side::Player, false),
        Tree::new(cell(9), 0, Side::Player, false),
        Tree::new(cell(11), 0, Side::Player, false),
    ];
    let is_seed = |a: &Action| matches!(a, Action::Seed { .. });

    let poor = GameState::new(
        0,
        20,
        trees.clone(),
        PlayerState::new(2, 0, false),
        PlayerState::default(),
        &board,
    )
    .unwrap();
    assert_eq!(poor.seed_cost(Side::Player), 3);
    assert!(!poor.legal_actions(&board).player.iter().any(is_seed));

    let rich = GameState::new(
        0,
        20,
        trees,
        PlayerState::new(3, 0, false),
        PlayerState::default(),
        &board,
    )
    .unwrap();
    assert!(rich.legal_actions(&board).player.iter().any(is_seed));
}

#[test]
fn shaded_tree_collects_nothing() {
    let board = Board::standard();
    // Day 0: the sun shines along (1,-1,0), so the tree on the centre shades cell 1.
    let state = GameState::new(
        0,
        20,
        vec![
            Tree::new(cell(0), 3, Side::Player, false),
            Tree::new(cell(1), 2, Side::Opponent, false),
        ],
        PlayerState::default(),
        PlayerState::default(),
        &board,
    )
    .unwrap();

    let shadows = state.shadows(&board, 0);
    assert_eq!(shadows[1], 3);
    let income = state.sun_production(&board, 0);
    assert_eq!(income.player, 3);
    assert_eq!(income.opponent, 0);

    // Six days later the sun is back in the same direction.
    assert_eq!(state.sun_production(&board, 6), income);
    // From the opposite side the smaller tree casts onto a taller one.
    let shadows = state.shadows(&board, 3);
    assert_eq!(shadows[0], 2);
    let income = state.sun_production(&board, 3);
    assert_eq!(income, Joint::new(3, 2));
}

#[test]
fn harvest_scores_nutrients_plus_richness() {
    let mut richness = vec![1u8; 37];
    richness[5] = 3;
    let board = Board::with_richness(3, &richness).unwrap();
    let state = GameState::new(
        3,
        12,
        vec![Tree::new(cell(5), 3, Side::Opponent, false)],
        PlayerState::default(),
        PlayerState::new(4, 10, false),
        &board,
    )
    .unwrap();

    let next = state
        .apply_actions(
            Joint::new(Action::Wait, Action::Complete { target: cell(5) }),
            &board,
        )
        .unwrap();
    assert_eq!(next.player(Side::Opponent).score, 25);
    assert_eq!(next.player(Side::Opponent).sun, 0);
    assert_eq!(next.nutrients(), 11);
    assert!(next.tree_at(cell(5)).is_none());
}

#[test]
fn nutrients_never_go_negative() {
    let board = Board::standard();
    let state = GameState::new(
        5,
        1,
        vec![
            Tree::new(cell(1), 3, Side::Player, false),
            Tree::new(cell(4), 3, Side::Opponent, false),
        ],
        PlayerState::new(4, 0, false),
        PlayerState::new(4, 0, false),
        &board,
    )
    .unwrap();

    let next = state
        .apply_actions(
            Joint::new(
                Action::Complete { target: cell(1) },
                Action::Complete { target: cell(4) },
            ),
            &board,
        )
        .unwrap();
    assert_eq!(next.nutrients(), 0);
    assert_eq!(next.player(Side::Player).score, 4);
    assert_eq!(next.player(Side::Opponent).score, 4);
}

#[test]
fn unusable_cells_cannot_be_seeded() {
    let mut richness = vec![1u8; 37];
    richness[1..=6].fill(0);
    let board = Board::with_richness(3, &richness).unwrap();
    let state = GameState::new(
        0,
        20,
        vec![Tree::new(cell(0), 1, Side::Player, false)],
        PlayerState::default(),
        PlayerState::default(),
        &board,
    )
    .unwrap();

    let actions = state.legal_actions(&board);
    assert!(actions.player.iter().all(|a| !matches!(a, Action::Seed { .. })));

    let result = state.apply_actions(
        Joint::new(
            Action::Seed {
                origin: cell(0),
                target: cell(1),
            },
            Action::Wait,
        ),
        &board,
    );
    assert!(result.is_err());
}

#[test]
fn referee_lines_naming_foreign_cells_fail_cleanly() {
    let board = Board::standard();
    let state = GameState::standard_start(&board);

    assert!(matches!(
        "GROW 70".parse::<Action>(),
        Err(SunforestError::InvalidAction(_))
    ));

    // Cell 40 exists on a radius-4 board but not on this one.
    let grow: Action = "GROW 40".parse().unwrap();
    assert_eq!(
        state.apply_actions(Joint::new(grow, Action::Wait), &board),
        Err(SunforestError::InvalidCell(40))
    );
    let seed: Action = "SEED 19 44".parse().unwrap();
    assert_eq!(
        state.apply_actions(Joint::new(Action::Wait, seed), &board),
        Err(SunforestError::InvalidCell(44))
    );
}
