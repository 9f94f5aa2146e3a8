//! # Direction Module
//!
//! The six axis-aligned directions a voxel face can point in.

use cgmath::Vector3;

/// One of the six axis-aligned directions.
///
/// The integer values index per-face tables such as the texture atlas.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    /// Positive X (east)
    XPOS = 0,

    /// Negative X (west)
    XNEG = 1,

    /// Positive Y (up)
    YPOS = 2,

    /// Negative Y (down)
    YNEG = 3,

    /// Positive Z (north)
    ZPOS = 4,

    /// Negative Z (south)
    ZNEG = 5,
}

impl Direction {
    /// Returns all six directions in a consistent order.
    ///
    /// The order is: [XPOS, XNEG, YPOS, YNEG, ZPOS, ZNEG]
    pub fn all() -> [Direction; 6] {
        [
            Direction::XPOS,
            Direction::XNEG,
            Direction::YPOS,
            Direction::YNEG,
            Direction::ZPOS,
            Direction::ZNEG,
        ]
    }

    /// The four horizontal directions a chunk can have neighbours in.
    ///
    /// The order is: [ZPOS, ZNEG, XPOS, XNEG]
    pub fn lateral() -> [Direction; 4] {
        [
            Direction::ZPOS,
            Direction::ZNEG,
            Direction::XPOS,
            Direction::XNEG,
        ]
    }

    /// The direction pointing the other way along the same axis.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::XPOS => Direction::XNEG,
            Direction::XNEG => Direction::XPOS,
            Direction::YPOS => Direction::YNEG,
            Direction::YNEG => Direction::YPOS,
            Direction::ZPOS => Direction::ZNEG,
            Direction::ZNEG => Direction::ZPOS,
        }
    }

    /// Unit step in this direction.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            Direction::XPOS => Vector3::new(1, 0, 0),
            Direction::XNEG => Vector3::new(-1, 0, 0),
            Direction::YPOS => Vector3::new(0, 1, 0),
            Direction::YNEG => Vector3::new(0, -1, 0),
            Direction::ZPOS => Vector3::new(0, 0, 1),
            Direction::ZNEG => Vector3::new(0, 0, -1),
        }
    }

    /// Index into four-slot lateral tables, or `None` for the vertical directions.
    pub fn lateral_index(self) -> Option<usize> {
        match self {
            Direction::ZPOS => Some(0),
            Direction::ZNEG => Some(1),
            Direction::XPOS => Some(2),
            Direction::XNEG => Some(3),
            Direction::YPOS | Direction::YNEG => None,
        }
    }
}
