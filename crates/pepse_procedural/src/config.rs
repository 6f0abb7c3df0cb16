//! # World Configuration
//!
//! All tunables for a world, loaded once at startup.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs the
//! keys it wants to change:
//!
//! ```toml
//! seed = 7
//!
//! [viewport]
//! width = 1024.0
//!
//! [trees]
//! chance_denominator = 6
//! ```
//!
//! The defaults reproduce the classic PEPSE world: 30 unit blocks, 20
//! blocks of ground per column, a tree on one column in ten.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WorldError, WorldResult};
use crate::noise::WorldSeed;

/// Viewport dimensions in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Visible width. The slide threshold is half of this.
    pub width: f32,
    /// Visible height. The terrain baseline is a fraction of this.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl ViewportConfig {
    /// Half the viewport width.
    #[inline]
    #[must_use]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// Ground shape and column layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Edge length of every placed block.
    pub grid_unit: i32,
    /// Blocks stacked downward from the surface row of each column.
    pub depth: u32,
    /// How many of the topmost blocks in a column count as surface.
    pub surface_rows: u32,
    /// World units per noise lattice cell.
    pub noise_scale: f32,
    /// Height multiplier for `x >= 0`.
    pub positive_amplitude: f32,
    /// Height multiplier for `x < 0`.
    pub negative_amplitude: f32,
    /// Baseline height as a fraction of the viewport height.
    pub baseline_fraction: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_unit: 30,
            depth: 20,
            surface_rows: 2,
            noise_scale: 1000.0,
            positive_amplitude: 500.0,
            negative_amplitude: 15.0,
            baseline_fraction: 0.75,
        }
    }
}

/// Tree placement odds and sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// A column draws from `0..chance_denominator`.
    pub chance_denominator: u32,
    /// The drawn value that grows a tree.
    pub chance_index: u32,
    /// Shortest trunk, in cells.
    pub trunk_min: u32,
    /// Number of distinct trunk heights above `trunk_min`.
    pub trunk_span: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            chance_denominator: 10,
            chance_index: 1,
            trunk_min: 8,
            trunk_span: 8,
        }
    }
}

/// The tracked avatar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    /// Avatar height; the spawn point sits this far above the ground.
    pub height: f32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self { height: 80.0 }
    }
}

/// Host loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Ticks per second the host aims for.
    pub target_framerate: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target_framerate: 80,
        }
    }
}

/// Complete world configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed; the only source of randomness.
    pub seed: i32,
    /// Viewport dimensions.
    pub viewport: ViewportConfig,
    /// Ground settings.
    pub terrain: TerrainConfig,
    /// Tree settings.
    pub trees: TreeConfig,
    /// Avatar settings.
    pub avatar: AvatarConfig,
    /// Host loop settings.
    pub simulation: SimulationConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 120,
            viewport: ViewportConfig::default(),
            terrain: TerrainConfig::default(),
            trees: TreeConfig::default(),
            avatar: AvatarConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Small viewport for fast tests.
    #[must_use]
    pub fn test() -> Self {
        Self {
            viewport: ViewportConfig {
                width: 300.0,
                height: 300.0,
            },
            ..Self::default()
        }
    }

    /// Returns a copy with a different seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// The world seed as a typed value.
    #[inline]
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::new(self.seed)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] for malformed TOML and
    /// [`WorldError::InvalidConfig`] if validation fails.
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`WorldConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> WorldResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that the configuration describes a usable world.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> WorldResult<()> {
        if !is_positive(self.viewport.width) {
            return Err(WorldError::invalid("viewport.width", "must be positive"));
        }
        if !is_positive(self.viewport.height) {
            return Err(WorldError::invalid("viewport.height", "must be positive"));
        }
        if self.terrain.grid_unit <= 0 {
            return Err(WorldError::invalid("terrain.grid_unit", "must be positive"));
        }
        if self.terrain.depth == 0 {
            return Err(WorldError::invalid("terrain.depth", "must be at least 1"));
        }
        if self.terrain.surface_rows > self.terrain.depth {
            return Err(WorldError::invalid(
                "terrain.surface_rows",
                format!("{} exceeds depth {}", self.terrain.surface_rows, self.terrain.depth),
            ));
        }
        if !is_positive(self.terrain.noise_scale) {
            return Err(WorldError::invalid("terrain.noise_scale", "must be positive"));
        }
        if self.trees.chance_denominator == 0 {
            return Err(WorldError::invalid("trees.chance_denominator", "must be at least 1"));
        }
        if self.trees.chance_index >= self.trees.chance_denominator {
            return Err(WorldError::invalid(
                "trees.chance_index",
                format!(
                    "{} is never drawn from 0..{}",
                    self.trees.chance_index, self.trees.chance_denominator
                ),
            ));
        }
        if self.trees.trunk_min == 0 {
            return Err(WorldError::invalid("trees.trunk_min", "must be at least 1"));
        }
        if self.trees.trunk_span == 0 {
            return Err(WorldError::invalid("trees.trunk_span", "must be at least 1"));
        }
        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
