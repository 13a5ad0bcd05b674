use sunforest_core::Side;

use crate::CellId;

/// Tallest tree size. Only trees of this size can be harvested.
pub const MAX_TREE_SIZE: u8 = 3;

/// A tree on the board. At most one tree stands on each cell.
///
/// Field order makes the derived ordering sort by cell, which is the
/// canonical order trees are stored in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Tree {
    pub cell: CellId,
    /// 0 = seed, 3 = fully grown.
    pub size: u8,
    pub owner: Side,
    /// Dormant trees cannot act again until the next day.
    pub dormant: bool,
}

impl Tree {
    pub const fn new(cell: CellId, size: u8, owner: Side, dormant: bool) -> Self {
        Self {
            cell,
            size,
            owner,
            dormant,
        }
    }

    /// A freshly planted, dormant seed.
    pub const fn seed(cell: CellId, owner: Side) -> Self {
        Self::new(cell, 0, owner, true)
    }

    /// This tree after acting this day.
    #[inline]
    pub const fn with_dormant(self, dormant: bool) -> Self {
        Self { dormant, ..self }
    }

    /// This tree one size larger and dormant.
    #[inline]
    pub const fn grown(self) -> Self {
        Self {
            size: self.size + 1,
            dormant: true,
            ..self
        }
    }
}
