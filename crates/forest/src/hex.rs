//! Cube coordinates for the hexagonal board.

use std::ops::Add;

/// A hex position in cube coordinates (`x + y + z == 0`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CubeCoord {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl CubeCoord {
    /// The board centre.
    pub const ORIGIN: CubeCoord = CubeCoord::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Hex distance: half the Manhattan distance in cube space.
    #[inline]
    pub fn distance(self, other: CubeCoord) -> u8 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        (dx + dy + dz) / 2
    }

    /// Multiply each component by `factor`.
    #[inline]
    pub const fn scaled(self, factor: i8) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Point reflection through the origin.
    #[inline]
    pub const fn mirrored(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for CubeCoord {
    type Output = CubeCoord;

    #[inline]
    fn add(self, rhs: CubeCoord) -> CubeCoord {
        CubeCoord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// The six unit directions. The sun shines along `DIRECTIONS[day % 6]`.
pub const DIRECTIONS: [CubeCoord; 6] = [
    CubeCoord::new(1, -1, 0),
    CubeCoord::new(1, 0, -1),
    CubeCoord::new(0, 1, -1),
    CubeCoord::new(-1, 1, 0),
    CubeCoord::new(-1, 0, 1),
    CubeCoord::new(0, -1, 1),
];

/// Index into [`DIRECTIONS`] of the sun direction on `day`.
#[inline]
pub const fn sun_direction(day: u8) -> usize {
    (day % 6) as usize
}
