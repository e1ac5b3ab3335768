//! Tile ids and generation defaults

/// Solid rock; also what every cell starts as
pub const TILE_WALL: u32 = 0;
/// Carved corridor cell
pub const TILE_TUNNEL: u32 = 1;
/// Door cell (reserved for callers, never written by generation)
pub const TILE_DOOR: u32 = 2;

/// Room `i` is stored as `DEFAULT_ID_OFFSET + i` in the tile grid
pub const DEFAULT_ID_OFFSET: u32 = 10;

/// Default map dimensions
pub const DEFAULT_WIDTH: i32 = 120;
pub const DEFAULT_HEIGHT: i32 = 75;

/// Smallest leaf side the partition may produce
pub const DEFAULT_MIN_SIZE: i32 = 8;

/// Probability that a single room side gets pulled inward
pub const DEFAULT_SHRINK_CHANCE: f64 = 0.7;
pub const DEFAULT_SHRINK_MEAN: f64 = 0.2;
pub const DEFAULT_SHRINK_STD_DEV: f64 = 0.05;
pub const DEFAULT_SHRINK_MIN: f64 = 0.1;
pub const DEFAULT_SHRINK_MAX: f64 = 0.3;

/// Nearest neighbours considered per room when building candidate edges
pub const DEFAULT_NEIGHBOR_COUNT: usize = 4;

/// BSP split fraction distribution: mean, std-dev and clamp half-width
pub const SPLIT_MEAN: f64 = 0.5;
pub const SPLIT_STD_DEV: f64 = 0.15;
pub const SPLIT_LIMIT: f64 = 0.35;
