/// One side's resources.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PlayerState {
    /// Sun energy, spent on every action but WAIT.
    pub sun: u32,
    pub score: u32,
    /// Set once the side has chosen WAIT this day.
    pub is_waiting: bool,
}

impl PlayerState {
    pub const fn new(sun: u32, score: u32, is_waiting: bool) -> Self {
        Self {
            sun,
            score,
            is_waiting,
        }
    }

    /// End-of-game score: leftover sun converts at 3 sun per point.
    #[inline]
    pub const fn final_score(&self) -> u32 {
        self.score + self.sun / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_score_converts_sun() {
        assert_eq!(PlayerState::new(0, 10, false).final_score(), 10);
        assert_eq!(PlayerState::new(8, 10, false).final_score(), 12);
        assert_eq!(PlayerState::new(9, 0, true).final_score(), 3);
    }
}
