use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Direction, Point};

/// A run of boundary cells along one side of a rectangle
///
/// `origin` is the low-coordinate end; the run covers `length` cells stepping
/// by `dir.step()`. `dir` says which side of the rectangle the run is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub origin: Point,
    pub length: i32,
    pub dir: Direction,
}

impl Edge {
    pub fn new(origin: impl Into<Point>, length: i32, dir: Direction) -> Self {
        Self {
            origin: origin.into(),
            length,
            dir,
        }
    }

    pub fn step(&self) -> Point {
        self.dir.step()
    }

    pub fn normal(&self) -> Point {
        self.dir.normal()
    }

    pub fn midpoint(&self) -> Point {
        self.origin + self.step() * (self.length / 2)
    }

    /// Last cell of the run
    pub fn endpoint(&self) -> Point {
        self.origin + self.step() * (self.length - 1)
    }

    pub fn is_horizontal(&self) -> bool {
        self.dir.is_horizontal()
    }

    pub fn is_vertical(&self) -> bool {
        self.dir.is_vertical()
    }

    /// Coordinate held constant along the run (y for horizontal edges)
    pub fn fixed_coord(&self) -> i32 {
        if self.is_horizontal() {
            self.origin.y
        } else {
            self.origin.x
        }
    }

    /// Inclusive span covered along the run's axis
    fn span(&self) -> (i32, i32) {
        let end = self.endpoint();
        if self.is_horizontal() {
            (self.origin.x, end.x)
        } else {
            (self.origin.y, end.y)
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.endpoint();
        write!(
            f,
            "{} : ({}, {}) -> ({}, {})",
            self.dir, self.origin.x, self.origin.y, end.x, end.y
        )
    }
}

/// Project edge `a` onto edge `b`
///
/// Only edges on opposite sides (Top/Bottom or Left/Right) can project. The
/// result is the part of `a` lying across from `b`: it keeps `a`'s direction
/// and fixed coordinate. Returns `None` for equal directions, mismatched
/// orientations, or an overlap without positive length.
pub fn project(a: &Edge, b: &Edge) -> Option<Edge> {
    if b.dir != a.dir.opposite() {
        return None;
    }

    let (a0, a1) = a.span();
    let (b0, b1) = b.span();
    let start = a0.max(b0);
    let end = a1.min(b1);
    if end <= start {
        return None;
    }

    let origin = if a.is_horizontal() {
        Point::new(start, a.origin.y)
    } else {
        Point::new(a.origin.x, start)
    };
    Some(Edge::new(origin, end - start, a.dir))
}
