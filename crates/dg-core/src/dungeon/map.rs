//! Tile grid and room list

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::generation::GenerationStats;
use super::merge::MergeOutcome;
use super::room::Room;
use crate::error::MapError;
use crate::geometry::{Point, Rect};
use crate::{TILE_DOOR, TILE_TUNNEL, TILE_WALL};

/// What a tile id stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Wall,
    Tunnel,
    Door,
    /// Floor of the room with this index
    Floor(usize),
    /// Id written by an overlay, meaning is up to the caller
    Custom(u32),
}

/// A generated dungeon level
///
/// Tiles are stored row-major (`x + width * y`). Room `i` owns the floor id
/// `id_offset + i`. Once built, the only way to change tiles is
/// [`Map::overlay`], which never touches room floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMap")]
pub struct Map {
    width: i32,
    height: i32,
    tiles: Vec<u32>,
    rooms: Vec<Room>,
    id_offset: u32,
    #[serde(default)]
    stats: GenerationStats,
}

/// Map as read from JSON, checked before it becomes a [`Map`]
#[derive(Deserialize)]
struct RawMap {
    width: i32,
    height: i32,
    tiles: Vec<u32>,
    rooms: Vec<Room>,
    id_offset: u32,
    #[serde(default)]
    stats: GenerationStats,
}

impl TryFrom<RawMap> for Map {
    type Error = MapError;

    fn try_from(raw: RawMap) -> Result<Self, Self::Error> {
        let RawMap {
            width,
            height,
            tiles,
            rooms,
            id_offset,
            stats,
        } = raw;

        if width < 0 || height < 0 {
            return Err(MapError::NegativeSize { width, height });
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(MapError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        if id_offset <= TILE_DOOR {
            return Err(MapError::ReservedIdOffset { offset: id_offset });
        }

        let map = Self {
            width,
            height,
            tiles,
            rooms,
            id_offset,
            stats,
        };

        let row = width.max(1) as usize;
        for (i, &tile) in map.tiles.iter().enumerate() {
            let (x, y) = ((i % row) as i32, (i / row) as i32);
            if map.is_floor_id(tile) && map.room_at(x, y).is_none() {
                return Err(MapError::StaleRoomId { x, y, tile });
            }
        }
        for (room, r) in map.rooms.iter().enumerate() {
            let owned = r
                .rects
                .iter()
                .flat_map(Rect::cells)
                .all(|p| map.room_at(p.x, p.y) == Some(room));
            if r.rects.is_empty() || !owned {
                return Err(MapError::RoomNotOnTiles { room });
            }
            if let Some(&other) = r.connections.iter().find(|&&j| j >= map.rooms.len()) {
                return Err(MapError::DanglingConnection { room, other });
            }
        }
        Ok(map)
    }
}

/// Tile id of room `room`, `None` if it does not fit in a `u32`
fn floor_id(id_offset: u32, room: usize) -> Option<u32> {
    u32::try_from(room)
        .ok()
        .and_then(|room| id_offset.checked_add(room))
}

impl Map {
    /// All-wall map with `rooms` stamped onto it
    pub fn from_rooms(width: i32, height: i32, rooms: Vec<Room>, id_offset: u32) -> Self {
        let cells = width.max(0) as usize * height.max(0) as usize;
        let mut map = Self {
            width,
            height,
            tiles: vec![TILE_WALL; cells],
            rooms,
            id_offset,
            stats: GenerationStats::default(),
        };
        map.fill_room_ids();
        map
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn id_offset(&self) -> u32 {
        self.id_offset
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    pub(crate) fn set_stats(&mut self, stats: GenerationStats) {
        self.stats = stats;
    }

    pub(crate) fn take_rooms(&mut self) -> Vec<Room> {
        std::mem::take(&mut self.rooms)
    }

    /// Install merged rooms and re-tag their floors
    pub(crate) fn apply_merge(&mut self, outcome: MergeOutcome) {
        self.rooms = outcome.rooms;
        self.retag(&outcome.remap);
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| x as usize + self.width as usize * y as usize)
    }

    /// Raw tile id, `None` outside the map
    pub fn tile(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    fn is_floor_id(&self, tile: u32) -> bool {
        tile >= self.id_offset
    }

    /// Room whose floor covers `(x, y)`
    pub fn room_at(&self, x: i32, y: i32) -> Option<usize> {
        let tile = self.tile(x, y)?;
        if !self.is_floor_id(tile) {
            return None;
        }
        let room = (tile - self.id_offset) as usize;
        (room < self.rooms.len()).then_some(room)
    }

    pub fn tile_kind(&self, x: i32, y: i32) -> Option<TileKind> {
        let tile = self.tile(x, y)?;
        let kind = match tile {
            TILE_WALL => TileKind::Wall,
            TILE_TUNNEL => TileKind::Tunnel,
            TILE_DOOR => TileKind::Door,
            t if self.is_floor_id(t) => TileKind::Floor((t - self.id_offset) as usize),
            t => TileKind::Custom(t),
        };
        Some(kind)
    }

    /// Tunnels, doors and room floors can be walked on
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        matches!(
            self.tile_kind(x, y),
            Some(TileKind::Tunnel | TileKind::Door | TileKind::Floor(_))
        )
    }

    /// Write every room's floor id over its rectangles
    pub(crate) fn fill_room_ids(&mut self) {
        let Self {
            width,
            height,
            tiles,
            rooms,
            id_offset,
            ..
        } = self;

        for (room_idx, room) in rooms.iter().enumerate() {
            let Some(id) = floor_id(*id_offset, room_idx) else {
                warn!(room = room_idx, offset = *id_offset, "room id overflows the tile range");
                break;
            };
            for p in room.rects.iter().flat_map(Rect::cells) {
                if p.x >= 0 && p.y >= 0 && p.x < *width && p.y < *height {
                    tiles[p.x as usize + *width as usize * p.y as usize] = id;
                }
            }
        }
    }

    /// Rewrite floor ids after rooms were renumbered
    ///
    /// `remap[old]` is the new index of the room that now owns `old`'s floor.
    pub(crate) fn retag(&mut self, remap: &[usize]) {
        let offset = self.id_offset;
        for tile in &mut self.tiles {
            if *tile < offset {
                continue;
            }
            let new = remap
                .get((*tile - offset) as usize)
                .and_then(|&new| floor_id(offset, new));
            if let Some(new) = new {
                *tile = new;
            }
        }
    }

    /// Turn a wall cell into tunnel; false if the cell was anything else
    pub(crate) fn carve_tunnel_cell(&mut self, p: Point) -> bool {
        match self.index(p.x, p.y) {
            Some(i) if self.tiles[i] == TILE_WALL => {
                self.tiles[i] = TILE_TUNNEL;
                true
            }
            _ => false,
        }
    }

    /// Place a caller-defined tile (door, decoration, ...)
    ///
    /// Room floors can be neither overwritten nor written.
    pub fn overlay(&mut self, x: i32, y: i32, tile: u32) -> Result<(), MapError> {
        let i = self.index(x, y).ok_or(MapError::OutOfBounds { x, y })?;
        let current = self.tiles[i];
        if self.is_floor_id(current) {
            return Err(MapError::ProtectedTile { x, y, tile: current });
        }
        if self.is_floor_id(tile) {
            return Err(MapError::ProtectedTile { x, y, tile });
        }
        self.tiles[i] = tile;
        Ok(())
    }

    /// Every room can reach every other through the connection relation
    pub fn is_fully_connected(&self) -> bool {
        if self.rooms.len() <= 1 {
            return true;
        }

        let mut seen = vec![false; self.rooms.len()];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(i) = queue.pop_front() {
            for &j in &self.rooms[i].connections {
                if j < seen.len() && !seen[j] {
                    seen[j] = true;
                    reached += 1;
                    queue.push_back(j);
                }
            }
        }

        reached == self.rooms.len()
    }
}
