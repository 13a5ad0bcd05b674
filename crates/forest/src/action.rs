//! Actions and their text form.
//!
//! The text form matches the game's command protocol:
//! `WAIT`, `GROW <cell>`, `SEED <origin> <target>`, `COMPLETE <cell>`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use sunforest_core::SunforestError;

use crate::CellId;

/// Action type, ordered by rank: `Wait < Complete < Seed < Grow`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum ActionKind {
    Wait,
    Complete,
    Seed,
    Grow,
}

impl ActionKind {
    /// Numeric rank used in orderings.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            ActionKind::Wait => 0,
            ActionKind::Complete => 1,
            ActionKind::Seed => 2,
            ActionKind::Grow => 3,
        }
    }
}

/// A single side's action for one tick.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    Wait,
    Grow { target: CellId },
    Seed { origin: CellId, target: CellId },
    Complete { target: CellId },
}

impl Action {
    /// The action type
    #[inline]
    pub const fn kind(self) -> ActionKind {
        match self {
            Action::Wait => ActionKind::Wait,
            Action::Grow { .. } => ActionKind::Grow,
            Action::Seed { .. } => ActionKind::Seed,
            Action::Complete { .. } => ActionKind::Complete,
        }
    }

    /// Cell the action targets (the new seed's cell for SEED).
    #[inline]
    pub const fn target(self) -> Option<CellId> {
        match self {
            Action::Wait => None,
            Action::Grow { target } | Action::Seed { target, .. } | Action::Complete { target } => {
                Some(target)
            }
        }
    }

    /// The tree that acts: the grown/harvested tree, or the seed's parent.
    #[inline]
    pub const fn actor(self) -> Option<CellId> {
        match self {
            Action::Wait => None,
            Action::Grow { target } | Action::Complete { target } => Some(target),
            Action::Seed { origin, .. } => Some(origin),
        }
    }

    /// Sort key: rank, then target descending, then origin ascending.
    fn sort_key(self) -> (u8, i16, i16) {
        let target = self.target().map_or(0, |c| c.raw() as i16);
        let origin = match self {
            Action::Seed { origin, .. } => origin.raw() as i16,
            _ => 0,
        };
        (self.kind().rank(), -target, origin)
    }
}

impl Ord for Action {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Action {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Wait => write!(f, "WAIT"),
            Action::Grow { target } => write!(f, "GROW {}", target),
            Action::Seed { origin, target } => write!(f, "SEED {} {}", origin, target),
            Action::Complete { target } => write!(f, "COMPLETE {}", target),
        }
    }
}

impl FromStr for Action {
    type Err = SunforestError;

    /// Parse a protocol command. Trailing words after `WAIT` (the game
    /// prints `WAIT Zzz`-style messages) are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SunforestError::InvalidAction(s.to_string());
        let mut parts = s.split_whitespace();
        let keyword = parts.next().ok_or_else(invalid)?;
        let mut cell = || -> Result<CellId, SunforestError> {
            parts
                .next()
                .and_then(|p| p.parse::<u8>().ok())
                .and_then(CellId::new)
                .ok_or_else(invalid)
        };

        match keyword {
            "WAIT" => Ok(Action::Wait),
            "GROW" => Ok(Action::Grow { target: cell()? }),
            "COMPLETE" => Ok(Action::Complete { target: cell()? }),
            "SEED" => {
                let origin = cell()?;
                let target = cell()?;
                Ok(Action::Seed { origin, target })
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: u8) -> CellId {
        CellId::new(i).unwrap()
    }

    #[test]
    fn test_kind_order() {
        assert!(ActionKind::Wait < ActionKind::Complete);
        assert!(ActionKind::Complete < ActionKind::Seed);
        assert!(ActionKind::Seed < ActionKind::Grow);
    }

    #[test]
    fn test_action_order_by_rank_first() {
        let wait = Action::Wait;
        let complete = Action::Complete { target: c(0) };
        let seed = Action::Seed {
            origin: c(1),
            target: c(2),
        };
        let grow = Action::Grow { target: c(30) };
        assert!(wait < complete);
        assert!(complete < seed);
        assert!(seed < grow);
    }

    #[test]
    fn test_action_order_within_rank() {
        // Lower target cells sort higher.
        assert!(Action::Grow { target: c(5) } > Action::Grow { target: c(9) });
        // Same target: origin ascending.
        let a = Action::Seed {
            origin: c(1),
            target: c(4),
        };
        let b = Action::Seed {
            origin: c(3),
            target: c(4),
        };
        assert!(a < b);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Wait.to_string(), "WAIT");
        assert_eq!(Action::Grow { target: c(5) }.to_string(), "GROW 5");
        assert_eq!(
            Action::Seed {
                origin: c(1),
                target: c(2)
            }
            .to_string(),
            "SEED 1 2"
        );
        assert_eq!(Action::Complete { target: c(3) }.to_string(), "COMPLETE 3");
    }

    #[test]
    fn test_parse() {
        assert_eq!("WAIT".parse::<Action>().unwrap(), Action::Wait);
        assert_eq!("WAIT Zzz".parse::<Action>().unwrap(), Action::Wait);
        assert_eq!(
            "SEED 12 30".parse::<Action>().unwrap(),
            Action::Seed {
                origin: c(12),
                target: c(30)
            }
        );
        assert_eq!(
            "COMPLETE 3".parse::<Action>().unwrap(),
            Action::Complete { target: c(3) }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Action>().is_err());
        assert!("GROW".parse::<Action>().is_err());
        assert!("GROW x".parse::<Action>().is_err());
        assert!("SEED 1".parse::<Action>().is_err());
        assert!("JUMP 1".parse::<Action>().is_err());
    }

    #[test]
    fn test_parse_rejects_cells_past_any_board() {
        for line in ["GROW 70", "COMPLETE 64", "SEED 1 200", "SEED 300 1"] {
            assert_eq!(
                line.parse::<Action>(),
                Err(SunforestError::InvalidAction(line.to_string()))
            );
        }
        assert_eq!("GROW 63".parse::<Action>(), Ok(Action::Grow { target: c(63) }));
    }

    #[test]
    fn test_target_and_actor() {
        let seed = Action::Seed {
            origin: c(1),
            target: c(2),
        };
        assert_eq!(seed.target(), Some(c(2)));
        assert_eq!(seed.actor(), Some(c(1)));
        assert_eq!(Action::Wait.target(), None);
        assert_eq!(Action::Grow { target: c(4) }.actor(), Some(c(4)));
    }
}
