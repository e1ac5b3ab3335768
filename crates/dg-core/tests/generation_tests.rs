use std::collections::{HashSet, VecDeque};

use dg_core::dungeon::{
    BspNode, ConnectivityTracker, candidate_edges, count_touching_pairs, generate_tree,
    merge_touching_rooms,
};
use dg_core::geometry::{Direction, Edge, Point, Rect, project};
use dg_core::{
    ConfigError, DungeonConfig, DungeonRng, Map, MapError, TILE_DOOR, TILE_TUNNEL, TILE_WALL,
};
use proptest::prelude::*;

fn config(seed: u64, width: i32, height: i32, min_size: i32) -> DungeonConfig {
    DungeonConfig {
        min_size,
        ..DungeonConfig::default().with_seed(seed).with_size(width, height)
    }
}

/// Whether the K-nearest candidate graph over the final rooms is connected
fn candidates_connected(map: &Map, k: usize) -> bool {
    let centers: Vec<Point> = map.rooms().iter().map(|r| r.center()).collect();
    let mut tracker = ConnectivityTracker::new(centers.len());
    for edge in candidate_edges(&centers, k) {
        tracker.merge(edge.a, edge.b);
    }
    tracker.all_connected()
}

/// Rooms reachable by walking passable tiles from room 0
fn rooms_reachable_by_tiles(map: &Map) -> HashSet<usize> {
    let mut reached = HashSet::new();
    let Some(start) = map.rooms().first().map(|r| r.rects[0].origin()) else {
        return reached;
    };

    let mut seen = vec![false; map.tiles().len()];
    let mut queue = VecDeque::from([start]);
    seen[(start.x + map.width() * start.y) as usize] = true;

    while let Some(p) = queue.pop_front() {
        if let Some(room) = map.room_at(p.x, p.y) {
            reached.insert(room);
        }
        for dir in Direction::ALL {
            let n = p + dir.normal();
            if !map.is_passable(n.x, n.y) {
                continue;
            }
            let i = (n.x + map.width() * n.y) as usize;
            if !seen[i] {
                seen[i] = true;
                queue.push_back(n);
            }
        }
    }
    reached
}

fn check_tree(node: &BspNode, min_size: i32) -> Result<(), TestCaseError> {
    match node {
        BspNode::Leaf(rect) => {
            prop_assert!(rect.w >= min_size && rect.h >= min_size, "small leaf {:?}", rect);
        }
        BspNode::Split(rect, a, b) => {
            let (ra, rb) = (a.rect(), b.rect());
            prop_assert!(!ra.overlaps(rb));
            prop_assert_eq!(ra.area() + rb.area(), rect.area());
            check_tree(a, min_size)?;
            check_tree(b, min_size)?;
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn leaves_respect_min_size(
        seed in any::<u64>(),
        width in 8i32..200,
        height in 8i32..150,
        min_size in 2i32..12,
    ) {
        let mut rng = DungeonRng::new(seed);
        let tree = generate_tree(Rect::new(0, 0, width, height), min_size, &mut rng);
        if tree.is_leaf() {
            prop_assert_eq!(*tree.rect(), Rect::new(0, 0, width, height));
        } else {
            check_tree(&tree, min_size)?;
        }
        let total: i64 = tree.leaves().iter().map(Rect::area).sum();
        prop_assert_eq!(total, i64::from(width) * i64::from(height));
    }

    #[test]
    fn generated_maps_are_consistent(
        seed in any::<u64>(),
        width in 32i32..160,
        height in 32i32..100,
        min_size in 4i32..=8,
    ) {
        let cfg = config(seed, width, height, min_size);
        let map = Map::generate(&cfg).unwrap();
        let rooms = map.rooms();

        // Every floor tile belongs to a room that covers it
        for y in 0..height {
            for x in 0..width {
                let tile = map.tile(x, y).unwrap();
                if tile >= cfg.id_offset {
                    let room = map.room_at(x, y);
                    prop_assert!(room.is_some(), "stale floor id {} at ({}, {})", tile, x, y);
                    prop_assert!(rooms[room.unwrap()].contains(Point::new(x, y)));
                }
            }
        }

        // Every room cell carries that room's id
        for (i, room) in rooms.iter().enumerate() {
            prop_assert!(!room.rects.is_empty());
            for rect in &room.rects {
                prop_assert!(rect.w >= 1 && rect.h >= 1);
                for p in rect.cells() {
                    prop_assert_eq!(map.room_at(p.x, p.y), Some(i));
                }
            }
        }

        // Symmetric connections
        for (i, room) in rooms.iter().enumerate() {
            for &j in &room.connections {
                prop_assert!(j < rooms.len());
                prop_assert!(rooms[j].connections.contains(&i));
            }
        }

        let stats = map.stats();
        let corridors = stats.corridors;
        prop_assert_eq!(corridors.direct + corridors.elbow + corridors.fallback, stats.connections);
        prop_assert_eq!(stats.residual_touches, count_touching_pairs(rooms));

        // A second merge pass only finds what the residual count reported
        let again = merge_touching_rooms(rooms.to_vec());
        if stats.residual_touches == 0 {
            prop_assert_eq!(again.merged_count(), 0);
            prop_assert_eq!(again.remap, (0..rooms.len()).collect::<Vec<_>>());
        } else {
            prop_assert!(again.merged_count() >= 1);
            prop_assert!(again.merged_count() <= stats.residual_touches);
        }

        if candidates_connected(&map, cfg.neighbor_count) {
            prop_assert!(map.is_fully_connected());
            prop_assert_eq!(stats.connections, rooms.len() - 1);
            prop_assert_eq!(rooms_reachable_by_tiles(&map).len(), rooms.len());
        }
    }

    #[test]
    fn project_needs_opposite_sides(
        ax in -50i32..50, ay in -50i32..50, alen in 1i32..40,
        bx in -50i32..50, by in -50i32..50, blen in 1i32..40,
        da in 0usize..4, db in 0usize..4,
    ) {
        let a = Edge::new((ax, ay), alen, Direction::ALL[da]);
        let b = Edge::new((bx, by), blen, Direction::ALL[db]);
        let projected = project(&a, &b);
        if b.dir != a.dir.opposite() {
            prop_assert!(projected.is_none());
        }
        if let Some(p) = projected {
            prop_assert_eq!(p.dir, a.dir);
            prop_assert!(p.length > 0 && p.length < alen && p.length < blen);
            prop_assert_eq!(p.fixed_coord(), a.fixed_coord());
        }
    }
}

/// FNV-1a over the little-endian bytes of every tile
fn tiles_checksum(tiles: &[u32]) -> u64 {
    tiles
        .iter()
        .flat_map(|t| t.to_le_bytes())
        .fold(0xcbf2_9ce4_8422_2325, |h, byte| {
            (h ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

#[test]
fn test_seed_one_is_reproducible() {
    let cfg = DungeonConfig::default();
    assert_eq!(cfg.seed, 1);

    let first = Map::generate(&cfg).unwrap();
    let second = Map::generate(&cfg).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_seed_one_golden_map() {
    let map = Map::generate(&DungeonConfig::default()).unwrap();

    let stats = map.stats();
    assert_eq!(stats.leaves, 29);
    assert_eq!(stats.tree_depth, 8);
    assert_eq!(stats.rooms, 27);
    assert_eq!(stats.residual_touches, 0);
    assert_eq!(stats.candidate_edges, 64);
    assert_eq!(stats.connections, 26);
    assert_eq!(stats.corridors.direct, 26);
    assert_eq!(stats.corridors.elbow, 0);
    assert_eq!(stats.corridors.fallback, 0);
    assert_eq!(stats.corridors.tunnel_cells, 109);

    let rooms = map.rooms();
    assert_eq!(rooms[0].rects, [Rect::new(4, 2, 15, 12)]);
    assert_eq!(rooms[1].rects, [Rect::new(0, 18, 19, 14)]);
    assert_eq!(rooms[2].rects, [Rect::new(26, 0, 9, 17)]);
    assert_eq!(rooms[3].rects, [Rect::new(25, 20, 15, 15)]);
    // The two merged rooms
    assert_eq!(rooms[10].rects, [Rect::new(43, 14, 16, 6), Rect::new(59, 17, 16, 7)]);
    assert_eq!(rooms[22].rects, [Rect::new(77, 45, 9, 30), Rect::new(86, 54, 9, 15)]);
    assert!(rooms.iter().enumerate().all(|(i, r)| i == 10 || i == 22 || r.rects.len() == 1));

    let tunnels = map.tiles().iter().filter(|&&t| t == TILE_TUNNEL).count();
    let floors = map.tiles().iter().filter(|&&t| t >= map.id_offset()).count();
    assert_eq!(tunnels, 109);
    assert_eq!(floors, 4820);
    assert_eq!(tiles_checksum(map.tiles()), 0x9a47_8b9c_b810_f9fc);
}

#[test]
fn test_different_seeds_differ() {
    let a = Map::generate(&DungeonConfig::default().with_seed(1)).unwrap();
    let b = Map::generate(&DungeonConfig::default().with_seed(2)).unwrap();
    assert_ne!(a.tiles(), b.tiles());
}

#[test]
fn test_golden_projection() {
    let a = Edge::new((1, 1), 10, Direction::Top);
    let b = Edge::new((8, 3), 5, Direction::Bottom);
    assert_eq!(project(&a, &b), Some(Edge::new((8, 1), 2, Direction::Top)));
}

#[test]
fn test_invalid_configs() {
    let base = DungeonConfig::default();

    let cases = [
        (
            DungeonConfig { width: 0, ..base.clone() },
            ConfigError::InvalidDimensions { width: 0, height: 75 },
        ),
        (
            DungeonConfig { min_size: 40, ..base.clone() },
            ConfigError::MinSizeTooLarge { min_size: 40, max: 37 },
        ),
        (
            DungeonConfig { neighbor_count: 0, ..base.clone() },
            ConfigError::ZeroNeighborCount,
        ),
        (
            DungeonConfig { id_offset: 2, ..base.clone() },
            ConfigError::InvalidIdOffset { offset: 2, min: TILE_DOOR + 1, max: u32::MAX - 134 },
        ),
    ];

    for (cfg, expected) in cases {
        assert_eq!(Map::generate(&cfg).unwrap_err(), expected);
    }

    let bad_chance = DungeonConfig { shrink_chance: 1.5, ..base };
    assert!(matches!(
        Map::generate(&bad_chance),
        Err(ConfigError::InvalidProbability { name: "shrink_chance", .. })
    ));
}

#[test]
fn test_overlay_on_generated_map() {
    let mut map = Map::generate(&DungeonConfig::default()).unwrap();

    let floor = map.rooms()[0].rects[0].origin();
    assert!(matches!(
        map.overlay(floor.x, floor.y, TILE_DOOR),
        Err(MapError::ProtectedTile { .. })
    ));

    let wall = (0..map.height())
        .flat_map(|y| (0..map.width()).map(move |x| (x, y)))
        .find(|&(x, y)| map.tile(x, y) == Some(TILE_WALL))
        .expect("map has walls");
    map.overlay(wall.0, wall.1, TILE_DOOR).unwrap();
    assert_eq!(map.tile(wall.0, wall.1), Some(TILE_DOOR));

    assert_eq!(
        map.overlay(-1, 0, TILE_DOOR),
        Err(MapError::OutOfBounds { x: -1, y: 0 })
    );
}

#[test]
fn test_map_json_keeps_rooms() {
    let map = Map::generate(&DungeonConfig::default().with_seed(7)).unwrap();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["width"], 120);
    assert_eq!(json["rooms"].as_array().map(Vec::len), Some(map.rooms().len()));

    let back: Map = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(back, map);

    let mut shifted = json;
    shifted["id_offset"] = 11.into();
    assert!(serde_json::from_value::<Map>(shifted).is_err());
}
