//! Implementation of the simultaneous-move game trait for the forest game.

use sunforest_core::{Joint, Result, SimultaneousGame};

use crate::{Action, Board, GameState};

/// The forest game on a fixed board.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    board: Board,
}

impl Forest {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// The board every state of this game is played on.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Opening position on this game's board.
    pub fn initial_state(&self) -> GameState {
        GameState::standard_start(&self.board)
    }
}

impl SimultaneousGame for Forest {
    type State = GameState;
    type Action = Action;

    fn legal_actions(&self, state: &GameState) -> Joint<Vec<Action>> {
        state.legal_actions(&self.board)
    }

    fn apply(&self, state: &GameState, actions: Joint<Action>) -> Result<GameState> {
        state.apply_actions(actions, &self.board)
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        state.is_terminal()
    }

    fn turn(&self, state: &GameState) -> u32 {
        state.day() as u32
    }

    fn score(&self, state: &GameState) -> f32 {
        state.score(&self.board) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunforest_core::Side;

    #[test]
    fn test_waiting_advances_day() {
        let game = Forest::default();
        let state = game.initial_state();
        let next = game
            .apply(&state, Joint::new(Action::Wait, Action::Wait))
            .unwrap();
        assert_eq!(game.turn(&next), 1);
        assert!(!game.is_terminal(&next));
    }

    #[test]
    fn test_opening_actions() {
        let game = Forest::default();
        let state = game.initial_state();
        let actions = game.legal_actions(&state);
        for side in Side::BOTH {
            assert!(actions[side].contains(&Action::Wait));
            assert!(actions[side].len() > 1);
        }
        assert_eq!(game.score(&state), 0.0);
    }
}
