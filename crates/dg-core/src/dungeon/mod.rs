//! Dungeon generation stages and the resulting [`Map`]

mod bsp;
mod corridor;
mod generation;
mod graph;
mod map;
mod merge;
mod room;

pub use bsp::{BspNode, SplitAxis, generate_tree, split};
pub use corridor::{
    CarveKind, CarveTally, Corridor, carve_connections, closest_rect_pair, draw_tunnel, join_rects,
};
pub use generation::{GenerationStats, count_touching_pairs, generate};
pub use graph::{
    CandidateEdge, ConnectionPlan, ConnectivityTracker, candidate_edges, connect_rooms,
    spanning_tree,
};
pub use map::{Map, TileKind};
pub use merge::{MergeOutcome, merge_touching_rooms};
pub use room::{Room, ShrinkParams, shape_rect, shape_room};
