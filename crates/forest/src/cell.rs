use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A cell index on the board, in ring-walk order (0 = centre).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CellId(pub(crate) u8);

/// Upper bound on cell indices; every index fits in one [`CellSet`] bit.
const MAX_CELLS: u8 = 64;

impl CellId {
    /// Creates a cell id from a raw index, or `None` if it cannot be a cell
    /// on any board. Whether it lies on a particular board is the board's call.
    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index < MAX_CELLS {
            Some(CellId(index))
        } else {
            None
        }
    }

    /// Creates a cell id without bounds checking (debug-asserted).
    #[inline]
    pub const fn new_unchecked(index: u8) -> Self {
        debug_assert!(index < MAX_CELLS);
        CellId(index)
    }

    /// Returns the index as usize for table lookups
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the raw index
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// A set of cells packed into a 64-bit mask (bit i = cell i).
///
/// Boards are limited to 61 cells, so every board fits.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellSet(pub u64);

impl CellSet {
    /// Empty set
    pub const EMPTY: CellSet = CellSet(0);

    /// Returns true if no cells are set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the given cell is set
    #[inline]
    pub const fn contains(self, cell: CellId) -> bool {
        (self.0 >> cell.0) & 1 == 1
    }

    /// Adds the given cell
    #[inline]
    pub fn insert(&mut self, cell: CellId) {
        self.0 |= 1u64 << cell.0;
    }

    /// Number of cells in the set
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate over the cells in ascending index order
    #[inline]
    pub fn iter(self) -> CellSetIter {
        CellSetIter(self.0)
    }
}

/// Iterator over the cells of a [`CellSet`].
pub struct CellSetIter(u64);

impl Iterator for CellSetIter {
    type Item = CellId;

    #[inline]
    fn next(&mut self) -> Option<CellId> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Some(CellId(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CellSetIter {}

impl IntoIterator for CellSet {
    type Item = CellId;
    type IntoIter = CellSetIter;

    fn into_iter(self) -> CellSetIter {
        self.iter()
    }
}

impl FromIterator<CellId> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellId>>(iter: I) -> Self {
        let mut set = CellSet::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl BitAnd for CellSet {
    type Output = CellSet;

    #[inline]
    fn bitand(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 & rhs.0)
    }
}

impl BitOr for CellSet {
    type Output = CellSet;

    #[inline]
    fn bitor(self, rhs: CellSet) -> CellSet {
        CellSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: CellSet) {
        self.0 |= rhs.0;
    }
}

impl Not for CellSet {
    type Output = CellSet;

    #[inline]
    fn not(self) -> CellSet {
        CellSet(!self.0)
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| c.0)).finish()
    }
}
