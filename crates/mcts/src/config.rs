//! Search configuration parameters.
//!
//! These parameters control the decoupled UCT search. Timing (the deadline)
//! is supplied per call, not configured here.

/// What happens to the transposition table when a new turn begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TreeRetention {
    /// Drop every node: each turn searches from scratch.
    #[default]
    Discard,
    /// Keep only nodes whose turn is at least the new root's turn.
    PruneBeforeTurn,
    /// Keep every node for the lifetime of the search.
    Keep,
}

/// Search configuration parameters.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// UCB1 exploration constant `c` in `mean + c * sqrt(ln(N) / n)`.
    /// Rewards are raw score margins, so this is on the scale of points.
    pub exploration_factor: f32,

    /// How many turns past the root a playout may walk the tree before it is
    /// scored.
    pub max_depth: u32,

    /// Stop after this many playouts even if the deadline is further away.
    /// `None` means the deadline alone bounds the search.
    pub max_playouts: Option<u32>,

    /// Transposition table policy between turns.
    pub retention: TreeRetention,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_factor: 7.45,
            max_depth: 3,
            max_playouts: None,
            retention: TreeRetention::Discard,
        }
    }
}

impl SearchConfig {
    /// Create a config walking at most `max_depth` turns past the root.
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Create a config bounded by a playout count, for reproducible searches.
    pub fn with_playouts(max_playouts: u32) -> Self {
        Self {
            max_playouts: Some(max_playouts),
            ..Default::default()
        }
    }

    /// True once `playouts` reaches the configured cap.
    pub fn playouts_exhausted(&self, playouts: u32) -> bool {
        self.max_playouts.is_some_and(|cap| playouts >= cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!((config.exploration_factor - 7.45).abs() < 1e-5);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.max_playouts, None);
        assert_eq!(config.retention, TreeRetention::Discard);
    }

    #[test]
    fn test_with_depth() {
        let config = SearchConfig::with_depth(6);
        assert_eq!(config.max_depth, 6);
        assert!((config.exploration_factor - 7.45).abs() < 1e-5);
    }

    #[test]
    fn test_playout_cap() {
        let config = SearchConfig::with_playouts(10);
        assert!(!config.playouts_exhausted(9));
        assert!(config.playouts_exhausted(10));
        assert!(!SearchConfig::default().playouts_exhausted(u32::MAX));
    }
}
