use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::Point;

/// Side of a rectangle, in clockwise order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

/// Step along an edge, indexed by direction. Edges always run toward
/// increasing coordinates.
const STEPS: [Point; 4] = [
    Point::new(1, 0), // Top
    Point::new(0, 1), // Right
    Point::new(1, 0), // Bottom
    Point::new(0, 1), // Left
];

/// Outward normal, indexed by direction
const NORMALS: [Point; 4] = [
    Point::new(0, -1), // Top
    Point::new(1, 0),  // Right
    Point::new(0, 1),  // Bottom
    Point::new(-1, 0), // Left
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    const fn from_index(i: usize) -> Direction {
        Self::ALL[i & 3]
    }

    pub const fn rotate_cw(self) -> Direction {
        Self::from_index(self as usize + 1)
    }

    pub const fn rotate_ccw(self) -> Direction {
        Self::from_index(self as usize + 3)
    }

    pub const fn opposite(self) -> Direction {
        Self::from_index(self as usize + 2)
    }

    /// Unit step along an edge facing this way
    pub const fn step(self) -> Point {
        STEPS[self as usize]
    }

    /// Unit vector pointing out of the rectangle
    pub const fn normal(self) -> Point {
        NORMALS[self as usize]
    }

    /// Top and bottom edges run horizontally
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }

    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// Directions at right angles to this one (clockwise neighbour first)
    pub const fn perpendicular(self) -> [Direction; 2] {
        [self.rotate_cw(), self.rotate_ccw()]
    }
}
