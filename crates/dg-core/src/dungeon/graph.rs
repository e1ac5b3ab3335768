//! Room connectivity graph
//!
//! Candidate edges come from each room's K nearest neighbours (Manhattan
//! distance between centers). Kruskal's algorithm over those candidates picks
//! a minimum spanning tree, which becomes the room connection relation.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::room::Room;
use crate::geometry::Point;

/// Union-find over room indices
///
/// Rooms in the same set are already linked by accepted edges.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        // Initially, each room is its own set
        Self {
            parent: (0..num_rooms).collect(),
            size: vec![1; num_rooms],
            components: num_rooms,
        }
    }

    /// Representative of `a`'s set (with path halving)
    pub fn find(&mut self, mut a: usize) -> usize {
        while self.parent[a] != a {
            self.parent[a] = self.parent[self.parent[a]];
            a = self.parent[a];
        }
        a
    }

    /// Check if two rooms are connected (in the same set)
    pub fn are_connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Join the sets of `a` and `b`; false if they were already one set
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        // Attach the smaller tree under the larger one
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.components -= 1;
        true
    }

    /// Number of disjoint sets
    pub fn components(&self) -> usize {
        self.components
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        self.components <= 1
    }
}

/// Weighted candidate link between two rooms, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CandidateEdge {
    pub weight: i32,
    pub a: usize,
    pub b: usize,
}

/// K-nearest-neighbour candidate edges, sorted by ascending weight
///
/// Each center contributes links to its `k` closest other centers (ties go to
/// the lower index). Duplicate pairs collapse to one edge with the smallest
/// weight seen. Output order is `(weight, a, b)`.
pub fn candidate_edges(centers: &[Point], k: usize) -> Vec<CandidateEdge> {
    let mut best: BTreeMap<(usize, usize), i32> = BTreeMap::new();

    for (i, &ci) in centers.iter().enumerate() {
        let mut near: Vec<(i32, usize)> = centers
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, &cj)| (ci.manhattan(cj), j))
            .collect();
        near.sort_unstable();

        for &(weight, j) in near.iter().take(k) {
            let key = (i.min(j), i.max(j));
            best.entry(key)
                .and_modify(|w| *w = (*w).min(weight))
                .or_insert(weight);
        }
    }

    let mut edges: Vec<CandidateEdge> = best
        .into_iter()
        .map(|((a, b), weight)| CandidateEdge { weight, a, b })
        .collect();
    edges.sort_unstable();
    edges
}

/// Pick a minimum spanning forest from `candidates`
///
/// Returns the accepted `(a, b)` pairs in acceptance order.
pub fn spanning_tree(num_rooms: usize, candidates: &[CandidateEdge]) -> Vec<(usize, usize)> {
    let mut tracker = ConnectivityTracker::new(num_rooms);
    let mut accepted = Vec::with_capacity(num_rooms.saturating_sub(1));

    for edge in candidates {
        if tracker.merge(edge.a, edge.b) {
            accepted.push((edge.a, edge.b));
            if tracker.all_connected() {
                break;
            }
        }
    }

    if !tracker.all_connected() {
        warn!(
            components = tracker.components(),
            rooms = num_rooms,
            "candidate graph is disconnected; raise the neighbor count to link every room"
        );
    }

    accepted
}

/// Result of [`connect_rooms`]
#[derive(Debug, Clone, Default)]
pub struct ConnectionPlan {
    /// Accepted links in acceptance order
    pub links: Vec<(usize, usize)>,
    /// Size of the candidate graph the links were chosen from
    pub candidate_count: usize,
}

/// Link rooms with a spanning tree and record it on both endpoints
pub fn connect_rooms(rooms: &mut [Room], k: usize) -> ConnectionPlan {
    let centers: Vec<Point> = rooms.iter().map(Room::center).collect();
    let candidates = candidate_edges(&centers, k);
    let links = spanning_tree(rooms.len(), &candidates);

    for &(a, b) in &links {
        rooms[a].connections.insert(b);
        rooms[b].connections.insert(a);
    }

    debug!(
        rooms = rooms.len(),
        candidates = candidates.len(),
        links = links.len(),
        "built room graph"
    );

    ConnectionPlan {
        links,
        candidate_count: candidates.len(),
    }
}
