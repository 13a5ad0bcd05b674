//! Immutable hexagonal board topology.
//!
//! The board is built once per process: cells are laid out ring by ring
//! around the centre, and the seeding reach sets are precomputed so legal
//! action generation never measures distances.

use std::collections::HashMap;

use sunforest_core::{Result, SunforestError};

use crate::hex::{CubeCoord, DIRECTIONS};
use crate::{CellId, CellSet};

/// Largest supported radius (61 cells, so a [`CellSet`] covers the board).
pub const MAX_RADIUS: u8 = 4;

/// Largest distance a tree can seed (the size of the tallest tree).
pub const MAX_SEED_DISTANCE: usize = 3;

/// Richness of the centre cell on a default board.
const CENTER_RICHNESS: u8 = 3;

/// Hexagonal board: cell coordinates, richness and reach sets.
#[derive(Clone, Debug)]
pub struct Board {
    radius: u8,
    coords: Vec<CubeCoord>,
    index_by_coord: HashMap<CubeCoord, CellId>,
    richness: Vec<u8>,
    /// `neighbors[cell][direction]`, `None` past the board edge.
    neighbors: Vec<[Option<CellId>; 6]>,
    /// `reach[cell][d]`: usable cells at exactly distance `d`.
    reach: Vec<[CellSet; MAX_SEED_DISTANCE + 1]>,
}

impl Board {
    /// The standard radius-3 board (37 cells) with default richness.
    pub fn standard() -> Self {
        Self::layout(3, None)
    }

    /// A board of the given radius with default richness: 3 in the centre
    /// and the first ring, then one less per ring.
    ///
    /// # Errors
    /// Returns `SunforestError::InvalidRadius` if `radius > MAX_RADIUS`.
    pub fn hexagon(radius: u8) -> Result<Self> {
        if radius > MAX_RADIUS {
            return Err(SunforestError::InvalidRadius(radius));
        }
        Ok(Self::layout(radius, None))
    }

    /// A board with per-cell richness taken from the puzzle's cell listing.
    ///
    /// # Errors
    /// Returns an error if the radius is unsupported, the table length does
    /// not match the cell count, or a richness exceeds 3.
    pub fn with_richness(radius: u8, richness: &[u8]) -> Result<Self> {
        if radius > MAX_RADIUS {
            return Err(SunforestError::InvalidRadius(radius));
        }
        let expected = Self::cell_count(radius);
        if richness.len() != expected {
            return Err(SunforestError::RichnessMismatch {
                expected,
                found: richness.len(),
            });
        }
        if let Some((cell, &value)) = richness.iter().enumerate().find(|(_, r)| **r > 3) {
            return Err(SunforestError::InvalidRichness {
                cell,
                richness: value,
            });
        }
        Ok(Self::layout(radius, Some(richness)))
    }

    /// Number of cells on a board of the given radius.
    pub const fn cell_count(radius: u8) -> usize {
        let r = radius as usize;
        1 + 3 * r * (r + 1)
    }

    /// Lay out the cells ring by ring. Radius must already be validated.
    fn layout(radius: u8, richness: Option<&[u8]>) -> Self {
        let count = Self::cell_count(radius);
        let mut coords = Vec::with_capacity(count);
        let mut default_richness = Vec::with_capacity(count);

        coords.push(CubeCoord::ORIGIN);
        default_richness.push(CENTER_RICHNESS);

        for ring in 1..=radius as i8 {
            let mut coord = DIRECTIONS[0].scaled(ring);
            let ring_richness = (CENTER_RICHNESS as i8 + 1 - ring).max(0) as u8;
            for orientation in 0..DIRECTIONS.len() {
                for _ in 0..ring {
                    coords.push(coord);
                    default_richness.push(ring_richness);
                    coord = coord + DIRECTIONS[(orientation + 2) % 6];
                }
            }
        }

        let index_by_coord: HashMap<CubeCoord, CellId> = coords
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, CellId(i as u8)))
            .collect();

        let neighbors = coords
            .iter()
            .map(|&c| {
                let mut row = [None; 6];
                for (dir, slot) in row.iter_mut().enumerate() {
                    *slot = index_by_coord.get(&(c + DIRECTIONS[dir])).copied();
                }
                row
            })
            .collect();

        let richness = richness.map_or(default_richness, <[u8]>::to_vec);

        let mut board = Self {
            radius,
            coords,
            index_by_coord,
            richness,
            neighbors,
            reach: Vec::new(),
        };
        board.reach = board.compute_reach_sets();
        board
    }

    /// For every origin, the usable cells at each distance `0..=3`.
    fn compute_reach_sets(&self) -> Vec<[CellSet; MAX_SEED_DISTANCE + 1]> {
        let mut reach = vec![[CellSet::EMPTY; MAX_SEED_DISTANCE + 1]; self.coords.len()];
        for (target, &target_coord) in self.coords.iter().enumerate() {
            if self.richness[target] == 0 {
                continue;
            }
            for (origin, &origin_coord) in self.coords.iter().enumerate() {
                let dist = origin_coord.distance(target_coord) as usize;
                if dist <= MAX_SEED_DISTANCE {
                    reach[origin][dist].insert(CellId(target as u8));
                }
            }
        }
        reach
    }

    /// Board radius
    pub fn radius(&self) -> u8 {
        self.radius
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Never true: every board has at least the centre cell.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// All cells in index order
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.coords.len()).map(|i| CellId(i as u8))
    }

    /// Look up a cell by raw index, checking bounds.
    pub fn cell(&self, index: usize) -> Result<CellId> {
        if index < self.coords.len() {
            Ok(CellId(index as u8))
        } else {
            Err(SunforestError::InvalidCell(index))
        }
    }

    /// Fertility of a cell (0 = unusable).
    #[inline]
    pub fn richness(&self, cell: CellId) -> u8 {
        self.richness[cell.index()]
    }

    /// Cube coordinate of a cell
    #[inline]
    pub fn coord(&self, cell: CellId) -> CubeCoord {
        self.coords[cell.index()]
    }

    /// Cell at a coordinate, if it is on the board
    #[inline]
    pub fn index_of(&self, coord: CubeCoord) -> Option<CellId> {
        self.index_by_coord.get(&coord).copied()
    }

    /// Hex distance between two cells
    #[inline]
    pub fn distance(&self, a: CellId, b: CellId) -> u8 {
        self.coord(a).distance(self.coord(b))
    }

    /// Adjacent cell in direction `dir` (index into `DIRECTIONS`).
    #[inline]
    pub fn neighbor(&self, cell: CellId, dir: usize) -> Option<CellId> {
        self.neighbors[cell.index()][dir]
    }

    /// The cell reflected through the centre.
    pub fn mirror(&self, cell: CellId) -> Option<CellId> {
        self.index_of(self.coord(cell).mirrored())
    }

    /// Usable cells at exactly `distance` from `origin`.
    ///
    /// # Panics
    /// Panics if `distance > MAX_SEED_DISTANCE`.
    #[inline]
    pub fn cells_at_distance(&self, origin: CellId, distance: usize) -> CellSet {
        self.reach[origin.index()][distance]
    }

    /// Usable cells within `1..=max_distance` of `origin`.
    #[inline]
    pub fn seed_targets(&self, origin: CellId, max_distance: usize) -> CellSet {
        let rings = &self.reach[origin.index()];
        let mut targets = CellSet::EMPTY;
        for set in rings.iter().take(max_distance.min(MAX_SEED_DISTANCE) + 1).skip(1) {
            targets |= *set;
        }
        targets
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_size() {
        let board = Board::standard();
        assert_eq!(board.len(), 37);
        assert_eq!(board.radius(), 3);
        assert_eq!(Board::cell_count(4), 61);
    }

    #[test]
    fn test_ring_walk_order() {
        let board = Board::standard();
        assert_eq!(board.coord(CellId(0)), CubeCoord::ORIGIN);
        assert_eq!(board.coord(CellId(1)), CubeCoord::new(1, -1, 0));
        assert_eq!(board.coord(CellId(2)), CubeCoord::new(1, 0, -1));
        assert_eq!(board.coord(CellId(7)), CubeCoord::new(2, -2, 0));
        assert_eq!(board.coord(CellId(19)), CubeCoord::new(3, -3, 0));
    }

    #[test]
    fn test_index_coord_bijection() {
        let board = Board::standard();
        for cell in board.cells() {
            assert_eq!(board.index_of(board.coord(cell)), Some(cell));
        }
    }

    #[test]
    fn test_default_richness_by_ring() {
        let board = Board::standard();
        assert_eq!(board.richness(CellId(0)), 3);
        assert_eq!(board.richness(CellId(1)), 3);
        assert_eq!(board.richness(CellId(7)), 2);
        assert_eq!(board.richness(CellId(36)), 1);
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            Board::hexagon(5).unwrap_err(),
            SunforestError::InvalidRadius(5)
        );
        assert!(Board::hexagon(4).is_ok());
    }

    #[test]
    fn test_with_richness_validation() {
        let err = Board::with_richness(3, &[1; 36]).unwrap_err();
        assert_eq!(
            err,
            SunforestError::RichnessMismatch {
                expected: 37,
                found: 36
            }
        );

        let mut table = vec![1; 37];
        table[4] = 9;
        assert!(matches!(
            Board::with_richness(3, &table),
            Err(SunforestError::InvalidRichness { cell: 4, .. })
        ));
    }

    #[test]
    fn test_unusable_cells_excluded_from_reach() {
        let mut table = vec![1; 37];
        table[2] = 0;
        let board = Board::with_richness(3, &table).unwrap();

        assert!(!board.cells_at_distance(CellId(0), 1).contains(CellId(2)));
        assert!(board.cells_at_distance(CellId(0), 1).contains(CellId(1)));
        assert!(board.cells_at_distance(CellId(2), 0).is_empty());
    }

    #[test]
    fn test_reach_sets_match_distance() {
        let board = Board::standard();
        for origin in board.cells() {
            for d in 0..=MAX_SEED_DISTANCE {
                for target in board.cells_at_distance(origin, d) {
                    assert_eq!(board.distance(origin, target) as usize, d);
                }
            }
        }
        assert_eq!(board.cells_at_distance(CellId(0), 1).len(), 6);
        assert_eq!(board.cells_at_distance(CellId(0), 3).len(), 18);
    }

    #[test]
    fn test_seed_targets_union() {
        let board = Board::standard();
        let targets = board.seed_targets(CellId(0), 2);
        assert_eq!(targets.len(), 18);
        assert!(!targets.contains(CellId(0)));
        assert!(board.seed_targets(CellId(0), 0).is_empty());
    }

    #[test]
    fn test_neighbors_and_edges() {
        let board = Board::standard();
        for dir in 0..6 {
            assert!(board.neighbor(CellId(0), dir).is_some());
        }
        // Outer ring cell 19 sits at (3,-3,0); stepping further out leaves the board.
        assert_eq!(board.neighbor(CellId(19), 0), None);
    }

    #[test]
    fn test_mirror_is_involution() {
        let board = Board::standard();
        for cell in board.cells() {
            let mirrored = board.mirror(cell).unwrap();
            assert_eq!(board.mirror(mirrored), Some(cell));
            assert_eq!(board.richness(cell), board.richness(mirrored));
        }
        assert_eq!(board.mirror(CellId(19)), Some(CellId(28)));
    }
}
