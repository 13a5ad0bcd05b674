//! Per-side bookkeeping for simultaneous-move games.
//!
//! Every tick has two actors, so most search data comes in pairs:
//! - [`Side`]: which of the two actors
//! - [`Joint`]: one value per side, indexable by [`Side`]

use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Side {
    /// The maximizing side, whose action the search returns.
    Player,
    /// The minimizing side.
    Opponent,
}

impl Side {
    /// Both sides, player first.
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    /// Get the other side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Index usable for per-side arrays (player = 0, opponent = 1).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    /// Sign applied to player-perspective rewards for this side.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Opponent => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// A value for each side.
///
/// # Example
/// ```
/// use sunforest_core::{Joint, Side};
///
/// let sun = Joint::new(5, 3);
/// assert_eq!(sun[Side::Opponent], 3);
/// assert_eq!(sun.map(|s| s * 2).player, 10);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Joint<T> {
    pub player: T,
    pub opponent: T,
}

impl<T> Joint<T> {
    /// Create a pair from the player's and the opponent's value.
    pub const fn new(player: T, opponent: T) -> Self {
        Self { player, opponent }
    }

    /// Build a pair by evaluating `f` for each side.
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            player: f(Side::Player),
            opponent: f(Side::Opponent),
        }
    }

    /// Apply `f` to both values.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Joint<U> {
        Joint {
            player: f(self.player),
            opponent: f(self.opponent),
        }
    }

    /// Exchange the two values.
    pub fn swapped(self) -> Self {
        Self {
            player: self.opponent,
            opponent: self.player,
        }
    }
}

impl<T> Index<Side> for Joint<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

impl<T> IndexMut<Side> for Joint<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}
