//! Dungeon configuration
//!
//! All knobs for one generation run. Missing fields fall back to the
//! defaults in [`crate::consts`], so a JSON file only needs the values it
//! wants to change.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Parameters for building one [`crate::Map`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Map width in cells
    pub width: i32,
    /// Map height in cells
    pub height: i32,
    /// Seed for the dungeon RNG
    pub seed: u64,
    /// Smallest allowed leaf side
    pub min_size: i32,
    /// Probability that each room side is pulled inward
    pub shrink_chance: f64,
    /// Mean inset, as a fraction of the side's dimension
    pub shrink_mean: f64,
    pub shrink_std_dev: f64,
    /// Inset fraction clamp
    pub shrink_min: f64,
    pub shrink_max: f64,
    /// Nearest neighbours per room in the candidate graph (K)
    pub neighbor_count: usize,
    /// Tile id of room 0
    pub id_offset: u32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: 1,
            min_size: DEFAULT_MIN_SIZE,
            shrink_chance: DEFAULT_SHRINK_CHANCE,
            shrink_mean: DEFAULT_SHRINK_MEAN,
            shrink_std_dev: DEFAULT_SHRINK_STD_DEV,
            shrink_min: DEFAULT_SHRINK_MIN,
            shrink_max: DEFAULT_SHRINK_MAX,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            id_offset: DEFAULT_ID_OFFSET,
        }
    }
}

impl DungeonConfig {
    /// Same configuration with a different seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Same configuration with different dimensions
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Check every parameter; generation assumes this passed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        if self.min_size < 1 {
            return Err(ConfigError::ZeroMinSize);
        }

        let max = self.width.min(self.height) / 2;
        if self.min_size > max {
            return Err(ConfigError::MinSizeTooLarge {
                min_size: self.min_size,
                max,
            });
        }

        if self.neighbor_count == 0 {
            return Err(ConfigError::ZeroNeighborCount);
        }

        // NaN fails the range check too
        if !(0.0..=1.0).contains(&self.shrink_chance) {
            return Err(ConfigError::InvalidProbability {
                name: "shrink_chance",
                value: self.shrink_chance,
            });
        }

        let ordered = 0.0 <= self.shrink_min
            && self.shrink_min <= self.shrink_mean
            && self.shrink_mean <= self.shrink_max
            && self.shrink_max < 0.5;
        let spread_ok = self.shrink_std_dev.is_finite() && self.shrink_std_dev >= 0.0;
        if !ordered || !spread_ok {
            return Err(ConfigError::InvalidShrinkRange {
                min: self.shrink_min,
                mean: self.shrink_mean,
                max: self.shrink_max,
                std_dev: self.shrink_std_dev,
            });
        }

        // Room ids run up to id_offset + max_rooms - 1 and must stay in u32
        let min = TILE_DOOR + 1;
        let max = u64::from(u32::MAX).saturating_sub(self.max_rooms().saturating_sub(1));
        let max = u32::try_from(max).unwrap_or(u32::MAX);
        if self.id_offset < min || self.id_offset > max {
            return Err(ConfigError::InvalidIdOffset {
                offset: self.id_offset,
                min,
                max,
            });
        }

        Ok(())
    }

    /// Upper bound on the number of rooms a map can hold
    ///
    /// Every leaf is at least `min_size` on each side, and a guillotine cut
    /// never fits more columns (or rows) of them than the whole side does.
    pub fn max_rooms(&self) -> u64 {
        let per_side = |side: i32| u64::try_from(side / self.min_size.max(1)).unwrap_or(0);
        (per_side(self.width) * per_side(self.height)).max(1)
    }
}
