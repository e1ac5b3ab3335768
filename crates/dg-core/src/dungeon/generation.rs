//! Level generation pipeline
//!
//! partition -> extract -> shape -> fill ids -> merge (re-tag) -> graph -> carve
//!
//! Each stage runs exactly once, in that order, off one seeded RNG.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bsp::generate_tree;
use super::corridor::{CarveTally, carve_connections};
use super::graph::connect_rooms;
use super::map::Map;
use super::merge::merge_touching_rooms;
use super::room::{Room, ShrinkParams, shape_room};
use crate::config::DungeonConfig;
use crate::error::ConfigError;
use crate::geometry::Rect;
use crate::rng::DungeonRng;

/// Counters collected while building a [`Map`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Partition leaves (rooms before merging)
    pub leaves: usize,
    /// Depth of the partition tree
    pub tree_depth: usize,
    /// Rooms left after merging
    pub rooms: usize,
    /// Room pairs still touching after the merge pass
    pub residual_touches: usize,
    pub candidate_edges: usize,
    /// Accepted links (spanning tree edges)
    pub connections: usize,
    pub corridors: CarveTally,
}

/// Build a map from `config`
///
/// The configuration is validated first; after that generation cannot fail.
pub fn generate(config: &DungeonConfig) -> Result<Map, ConfigError> {
    config.validate()?;
    let mut rng = DungeonRng::new(config.seed);
    Ok(build(config, &mut rng))
}

fn build(config: &DungeonConfig, rng: &mut DungeonRng) -> Map {
    let root = Rect::new(0, 0, config.width, config.height);
    let tree = generate_tree(root, config.min_size, rng);
    let tree_depth = tree.depth();
    let leaves = tree.into_leaves();
    debug!(leaves = leaves.len(), depth = tree_depth, "partitioned map");

    let params = ShrinkParams::from(config);
    let mut rooms: Vec<Room> = leaves.into_iter().map(Room::new).collect();
    for room in &mut rooms {
        shape_room(room, &params, rng);
    }
    let leaf_count = rooms.len();

    let mut map = Map::from_rooms(config.width, config.height, rooms, config.id_offset);

    let outcome = merge_touching_rooms(map.take_rooms());
    debug!(
        before = leaf_count,
        after = outcome.rooms.len(),
        merged = outcome.merged_count(),
        "merged rooms"
    );
    map.apply_merge(outcome);

    let residual_touches = count_touching_pairs(map.rooms());
    if residual_touches > 0 {
        debug!(pairs = residual_touches, "rooms still touching after merge pass");
    }

    let plan = connect_rooms(map.rooms_mut(), config.neighbor_count);
    let corridors = carve_connections(&mut map, &plan.links);

    let stats = GenerationStats {
        leaves: leaf_count,
        tree_depth,
        rooms: map.rooms().len(),
        residual_touches,
        candidate_edges: plan.candidate_count,
        connections: plan.links.len(),
        corridors,
    };
    debug!(?stats, seed = rng.seed(), "generated map");
    map.set_stats(stats);
    map
}

/// Room pairs that share a border
pub fn count_touching_pairs(rooms: &[Room]) -> usize {
    let mut count = 0;
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if a.touches(b) {
                count += 1;
            }
        }
    }
    count
}

impl Map {
    /// Build a map from `config`; see [`generate`]
    pub fn generate(config: &DungeonConfig) -> Result<Map, ConfigError> {
        generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TILE_WALL;

    #[test]
    fn test_default_config_generates() {
        let map = Map::generate(&DungeonConfig::default()).unwrap();
        let stats = map.stats();

        assert_eq!(map.tiles().len(), 120 * 75);
        assert!(stats.leaves > 1);
        assert_eq!(stats.rooms, map.rooms().len());
        assert!(stats.rooms <= stats.leaves);
        // Seed 1 yields a connected candidate graph, so the tree spans every room
        assert_eq!(stats.connections, stats.rooms - 1);
        assert!(map.is_fully_connected());
        assert_eq!(
            stats.corridors.direct + stats.corridors.elbow + stats.corridors.fallback,
            stats.connections
        );
    }

    #[test]
    fn test_same_seed_same_map() {
        let config = DungeonConfig::default().with_seed(1234);
        let a = Map::generate(&config).unwrap();
        let b = Map::generate(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DungeonConfig {
            min_size: 0,
            ..DungeonConfig::default()
        };
        assert_eq!(Map::generate(&config), Err(ConfigError::ZeroMinSize));
    }

    #[test]
    fn test_smallest_map() {
        // 16 x 16 with min_size 8 allows at most one cut
        let config = DungeonConfig::default().with_size(16, 16);
        let map = Map::generate(&config).unwrap();
        assert!(map.rooms().len() <= 2);
        assert_eq!(map.stats().connections, map.rooms().len() - 1);
        assert!(map.is_fully_connected());
        assert!(map.tiles().iter().any(|&t| t != TILE_WALL));
    }

    #[test]
    fn test_count_touching_pairs() {
        let rooms = vec![
            Room::new(Rect::new(0, 0, 4, 4)),
            Room::new(Rect::new(4, 0, 4, 4)),
            Room::new(Rect::new(20, 0, 4, 4)),
        ];
        assert_eq!(count_touching_pairs(&rooms), 1);
    }
}
