use serde::{Deserialize, Serialize};

use super::{Direction, Edge, Point};

/// Axis-aligned rectangle of grid cells
///
/// Covers columns `x..x + w` and rows `y..y + h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Intervals share a run of positive length (not just an end point)
fn intervals_overlap_strict(a0: i32, a1: i32, b0: i32, b1: i32) -> bool {
    a1.min(b1) > a0.max(b0)
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the last column
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the last row
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub const fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Rectangles share at least one cell
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Boundary cells on the given side
    pub fn edge(&self, dir: Direction) -> Edge {
        match dir {
            Direction::Top => Edge::new((self.x, self.y), self.w, dir),
            Direction::Right => Edge::new((self.right() - 1, self.y), self.h, dir),
            Direction::Bottom => Edge::new((self.x, self.bottom() - 1), self.w, dir),
            Direction::Left => Edge::new((self.x, self.y), self.h, dir),
        }
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Point> + use<> {
        let r = *self;
        (r.y..r.bottom()).flat_map(move |y| (r.x..r.right()).map(move |x| Point::new(x, y)))
    }

    /// Rectangles sit side by side with a shared border of positive length
    ///
    /// Touching only at a corner does not count, neither does overlapping.
    pub fn touches_along_edge(&self, b: &Rect) -> bool {
        // Vertical edge touch
        if self.right() == b.x || self.x == b.right() {
            return intervals_overlap_strict(self.y, self.bottom(), b.y, b.bottom());
        }

        // Horizontal edge touch
        if self.y == b.bottom() || self.bottom() == b.y {
            return intervals_overlap_strict(self.x, self.right(), b.x, b.right());
        }

        false
    }
}
