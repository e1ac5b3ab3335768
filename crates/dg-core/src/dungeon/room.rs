//! Rooms and room shaping
//!
//! A room starts as one partition leaf. Shaping pulls its sides inward at
//! random; merging may later append more rectangles to it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::geometry::{Direction, Point, Rect};
use crate::rng::DungeonRng;

/// One playable area: one or more rectangles plus its corridor links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Constituent rectangles, the first being the original leaf
    pub rects: Vec<Rect>,
    /// Indices of rooms joined to this one by a corridor
    pub connections: BTreeSet<usize>,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self {
            rects: vec![rect],
            connections: BTreeSet::new(),
        }
    }

    /// Truncated mean of the rectangle centers
    pub fn center(&self) -> Point {
        let n = self.rects.len().max(1) as i32;
        let sum = self
            .rects
            .iter()
            .fold(Point::ZERO, |acc, r| acc + r.center());
        Point::new(sum.x / n, sum.y / n)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rects.iter().any(|r| r.contains(p))
    }

    /// Floor cells over all rectangles
    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Any rectangle of `self` shares a border with any rectangle of `other`
    pub fn touches(&self, other: &Room) -> bool {
        self.rects
            .iter()
            .any(|a| other.rects.iter().any(|b| a.touches_along_edge(b)))
    }

    pub fn is_connected_to(&self, other: usize) -> bool {
        self.connections.contains(&other)
    }
}

/// Inset parameters for [`shape_rect`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkParams {
    pub chance: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl From<&DungeonConfig> for ShrinkParams {
    fn from(config: &DungeonConfig) -> Self {
        Self {
            chance: config.shrink_chance,
            mean: config.shrink_mean,
            std_dev: config.shrink_std_dev,
            min: config.shrink_min,
            max: config.shrink_max,
        }
    }
}

/// Trim a pair of opposite insets so at least one cell remains between them
fn fit_insets(near: i32, far: i32, dim: i32) -> (i32, i32) {
    let excess = near + far - (dim - 1);
    if excess <= 0 {
        return (near, far);
    }
    // Take from the larger inset first
    if near >= far {
        let cut = excess.min(near);
        (near - cut, far - (excess - cut))
    } else {
        let cut = excess.min(far);
        (near - (excess - cut), far - cut)
    }
}

/// Randomly pull each side of `rect` inward
///
/// Sides are visited Top, Right, Bottom, Left. Each one shrinks with
/// probability `chance` by a clamped gaussian fraction of the dimension it
/// cuts into. Width and height never drop below 1.
pub fn shape_rect(rect: Rect, params: &ShrinkParams, rng: &mut DungeonRng) -> Rect {
    let mut insets = [0i32; 4];
    for dir in Direction::ALL {
        if !rng.chance(params.chance) {
            continue;
        }
        let frac = rng.gauss(params.mean, params.std_dev).clamp(params.min, params.max);
        let dim = if dir.is_horizontal() { rect.h } else { rect.w };
        insets[dir as usize] = (frac * dim as f64) as i32;
    }

    let (top, bottom) = fit_insets(
        insets[Direction::Top as usize],
        insets[Direction::Bottom as usize],
        rect.h,
    );
    let (left, right) = fit_insets(
        insets[Direction::Left as usize],
        insets[Direction::Right as usize],
        rect.w,
    );

    Rect::new(
        rect.x + left,
        rect.y + top,
        rect.w - left - right,
        rect.h - top - bottom,
    )
}

/// Shape a freshly extracted room (its only rectangle)
pub fn shape_room(room: &mut Room, params: &ShrinkParams, rng: &mut DungeonRng) {
    debug_assert_eq!(room.rects.len(), 1, "rooms are shaped before merging");
    if let Some(rect) = room.rects.first_mut() {
        *rect = shape_rect(*rect, params, rng);
    }
}
