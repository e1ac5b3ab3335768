//! Corridor carving
//!
//! Every accepted connection gets one corridor between the closest pair of
//! rectangles of its two rooms. A straight corridor is used when the
//! rectangles face each other across a gap; otherwise an L-shaped elbow, and
//! as a last resort a horizontal-then-vertical tunnel between the centers.
//!
//! Carving only ever turns wall into tunnel. Room floors crossed on the way
//! are left alone.

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use super::map::Map;
use super::room::Room;
use crate::geometry::{Direction, Point, Rect, project};

/// How a corridor was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum CarveKind {
    /// Straight run between facing edges
    Direct,
    /// Two legs with one turn
    Elbow,
    /// Center to center tunnel
    Fallback,
}

/// One carved corridor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corridor {
    pub kind: CarveKind,
    /// Wall cells turned into tunnel
    pub cells: usize,
}

/// Carve every cell of an axis-aligned segment, both ends included
fn carve_run(map: &mut Map, from: Point, to: Point) -> usize {
    debug_assert!(from.x == to.x || from.y == to.y, "{from:?} -> {to:?} is not straight");
    let step = Point::new((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut p = from;
    let mut carved = usize::from(map.carve_tunnel_cell(p));
    while p != to {
        p = p + step;
        carved += usize::from(map.carve_tunnel_cell(p));
    }
    carved
}

/// Tunnel from `from` to `to`: along row `from.y`, then along column `to.x`
pub fn draw_tunnel(map: &mut Map, from: Point, to: Point) -> usize {
    let corner = Point::new(to.x, from.y);
    carve_run(map, from, corner) + carve_run(map, corner, to)
}

/// Straight corridor from `a` up or left into `b`
///
/// Only works when `b` lies strictly above `a` (sharing columns) or strictly
/// to the left (sharing rows).
fn carve_direct(map: &mut Map, a: &Rect, b: &Rect) -> Option<usize> {
    let a_top = a.edge(Direction::Top);
    let b_bottom = b.edge(Direction::Bottom);
    if a_top.origin.y > b_bottom.origin.y
        && let Some(p) = project(&a_top, &b_bottom)
    {
        let start = p.midpoint();
        return Some(carve_run(map, start, Point::new(start.x, b_bottom.origin.y)));
    }

    let a_left = a.edge(Direction::Left);
    let b_right = b.edge(Direction::Right);
    if a_left.origin.x > b_right.origin.x
        && let Some(p) = project(&a_left, &b_right)
    {
        let start = p.midpoint();
        return Some(carve_run(map, start, Point::new(b_right.origin.x, start.y)));
    }

    None
}

/// Best elbow route from `a` to `b` as `(start, corner, end)`
///
/// Leaves `a` through the midpoint of one side and enters `b` through the
/// midpoint of a side perpendicular to it, both legs heading outward from `a`
/// and inward to `b`. The shortest such route wins; earlier candidates win
/// ties (sides of `a` in Top, Right, Bottom, Left order).
fn elbow_route(a: &Rect, b: &Rect) -> Option<(Point, Point, Point)> {
    let mut best: Option<(i32, (Point, Point, Point))> = None;

    for da in Direction::ALL {
        let ma = a.edge(da).midpoint();
        let na = da.normal();
        for db in da.perpendicular() {
            let mb = b.edge(db).midpoint();
            let d = mb - ma;
            if d.dot(na) <= 0 || d.dot(db.normal()) >= 0 {
                continue;
            }
            let dist = ma.manhattan(mb);
            if best.is_none_or(|(best_dist, _)| dist < best_dist) {
                let corner = ma + na * d.dot(na);
                best = Some((dist, (ma, corner, mb)));
            }
        }
    }

    best.map(|(_, route)| route)
}

/// Connect two rectangles with a corridor
pub fn join_rects(map: &mut Map, a: &Rect, b: &Rect) -> Corridor {
    let direct = carve_direct(map, a, b).or_else(|| carve_direct(map, b, a));

    let corridor = if let Some(cells) = direct {
        Corridor {
            kind: CarveKind::Direct,
            cells,
        }
    } else if let Some((start, corner, end)) = elbow_route(a, b) {
        Corridor {
            kind: CarveKind::Elbow,
            cells: carve_run(map, start, corner) + carve_run(map, corner, end),
        }
    } else {
        Corridor {
            kind: CarveKind::Fallback,
            cells: draw_tunnel(map, a.center(), b.center()),
        }
    };

    if corridor.cells == 0 {
        debug!(?a, ?b, kind = %corridor.kind, "zero-length carve");
    }
    corridor
}

/// Rectangle pair with the closest centers (first pair wins ties)
pub fn closest_rect_pair(a: &Room, b: &Room) -> Option<(Rect, Rect)> {
    let mut best: Option<(i32, Rect, Rect)> = None;
    for ra in &a.rects {
        for rb in &b.rects {
            let dist = ra.center().manhattan(rb.center());
            if best.is_none_or(|(best_dist, _, _)| dist < best_dist) {
                best = Some((dist, *ra, *rb));
            }
        }
    }
    best.map(|(_, ra, rb)| (ra, rb))
}

/// Per-kind corridor totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarveTally {
    pub direct: usize,
    pub elbow: usize,
    pub fallback: usize,
    pub tunnel_cells: usize,
}

impl CarveTally {
    fn record(&mut self, corridor: Corridor) {
        match corridor.kind {
            CarveKind::Direct => self.direct += 1,
            CarveKind::Elbow => self.elbow += 1,
            CarveKind::Fallback => self.fallback += 1,
        }
        self.tunnel_cells += corridor.cells;
    }
}

/// Carve one corridor per link between the map's rooms
pub fn carve_connections(map: &mut Map, links: &[(usize, usize)]) -> CarveTally {
    let mut tally = CarveTally::default();

    for &(i, j) in links {
        let pair = match (map.rooms().get(i), map.rooms().get(j)) {
            (Some(a), Some(b)) => closest_rect_pair(a, b),
            _ => None,
        };
        let Some((a, b)) = pair else {
            debug!(i, j, "no rectangles to join");
            continue;
        };
        tally.record(join_rects(map, &a, &b));
    }

    debug!(
        direct = tally.direct,
        elbow = tally.elbow,
        fallback = tally.fallback,
        cells = tally.tunnel_cells,
        "carved corridors"
    );
    tally
}
