//! Error types
//!
//! Generation itself is total once the configuration has been validated, so
//! the only failures are bad input and out-of-contract writes to a built map.

use thiserror::Error;

/// Rejected dungeon configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Minimum leaf size must be at least 1")]
    ZeroMinSize,

    #[error("Minimum leaf size {min_size} exceeds half the smaller map side ({max})")]
    MinSizeTooLarge { min_size: i32, max: i32 },

    #[error("Neighbor count must be at least 1")]
    ZeroNeighborCount,

    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("Shrink parameters must satisfy 0 <= min <= mean <= max < 0.5 with std-dev >= 0, got min={min} mean={mean} max={max} std_dev={std_dev}")]
    InvalidShrinkRange {
        min: f64,
        mean: f64,
        max: f64,
        std_dev: f64,
    },

    #[error("Room id offset {offset} must be in {min}..={max} to fit reserved tiles and every room id")]
    InvalidIdOffset { offset: u32, min: u32, max: u32 },
}

/// Rejected write to a finished map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("Cell ({x}, {y}) is outside the map")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Cell ({x}, {y}) would change room membership (tile {tile})")]
    ProtectedTile { x: i32, y: i32, tile: u32 },

    #[error("Map dimensions must not be negative, got {width}x{height}")]
    NegativeSize { width: i32, height: i32 },

    #[error("Expected {expected} tiles, got {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("Room id offset {offset} collides with reserved tiles")]
    ReservedIdOffset { offset: u32 },

    #[error("Tile {tile} at ({x}, {y}) names no room")]
    StaleRoomId { x: i32, y: i32, tile: u32 },

    #[error("Room {room} does not own its floor tiles")]
    RoomNotOnTiles { room: usize },

    #[error("Room {room} links to missing room {other}")]
    DanglingConnection { room: usize, other: usize },
}
