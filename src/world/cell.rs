use serde::{Deserialize, Serialize};

/// Neighbor offsets in (dx, dz), cardinals first.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),   // North
    (1, 0),   // East
    (0, -1),  // South
    (-1, 0),  // West
    (1, 1),   // Northeast
    (1, -1),  // Southeast
    (-1, -1), // Southwest
    (-1, 1),  // Northwest
];

/// A location on the movement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    /// Marker for "no cell", e.g. an actor that has not been placed yet.
    pub const INVALID: CellCoord = CellCoord {
        x: i32::MIN,
        z: i32::MIN,
    };

    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// All eight surrounding cells, unbounded. Callers filter against their grid.
    pub fn neighbors(self) -> impl Iterator<Item = CellCoord> {
        NEIGHBOR_OFFSETS.iter().map(move |&(dx, dz)| {
            CellCoord::new(self.x.wrapping_add(dx), self.z.wrapping_add(dz))
        })
    }

    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self != other && self.x.abs_diff(other.x) <= 1 && self.z.abs_diff(other.z) <= 1
    }

    pub fn is_diagonal_to(self, other: CellCoord) -> bool {
        self.x.abs_diff(other.x) == 1 && self.z.abs_diff(other.z) == 1
    }

    /// Chebyshev distance, the number of 8-way steps between two cells.
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.x, self.z)
        } else {
            write!(f, "(invalid)")
        }
    }
}
