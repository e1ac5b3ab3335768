//! dg-core: BSP dungeon generation
//!
//! Partitions a rectangle into rooms, shapes and merges them, links them with
//! a spanning tree and carves corridors into a flat tile grid.
//!
//! The crate does no I/O. Everything is driven by a [`DungeonConfig`] and a
//! seeded [`DungeonRng`], so a seed always reproduces the same [`Map`].

pub mod config;
pub mod dungeon;
pub mod error;
pub mod geometry;

mod consts;
mod rng;

pub use config::DungeonConfig;
pub use consts::*;
pub use dungeon::{GenerationStats, Map, Room, TileKind};
pub use error::{ConfigError, MapError};
pub use rng::DungeonRng;
