//! # PEPSE Procedural World
//!
//! Deterministic world streaming for an endless side-scrolling world.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed and column always produce the same blocks
//! 2. **Column-local**: Every column is decided from `(x, seed)` alone
//! 3. **Streamable**: Ranges can be built and discarded in any order
//! 4. **Bounded**: Only the window around the tracked entity is materialized
//!
//! ## Core Components
//!
//! - `NoiseField`: 1D gradient noise giving ground height at any x
//! - `GroundChunkBuilder`: Grid-aligned ground columns for a range
//! - `TreePlacer`: Per-column seeded tree decisions and shapes
//! - `EntityStore`: Materialized blocks, one bucket per category
//! - `WorldWindowController`: Slides the window and streams ranges
//!
//! ## Example
//!
//! ```rust,ignore
//! use pepse_procedural::{EntityStore, WorldConfig, WorldWindowController};
//!
//! let config = WorldConfig::default();
//! let mut store = EntityStore::new();
//! let mut window = WorldWindowController::new(&config, 400.0);
//! window.populate(&mut store);
//!
//! // Avatar walked far enough to the right
//! window.tick(900.0, &mut store);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod block;
pub mod config;
pub mod error;
pub mod grid;
pub mod noise;
pub mod store;
pub mod terrain;
pub mod trees;
pub mod window;

pub use block::{BlockCategory, Layer, PlacedBlock, DEFAULT_LAYER, STATIC_OBJECTS_LAYER};
pub use config::WorldConfig;
pub use error::{WorldError, WorldResult};
pub use grid::GridSpan;
pub use noise::{NoiseField, WorldSeed};
pub use store::EntityStore;
pub use terrain::GroundChunkBuilder;
pub use trees::{TreePlacer, TreePlan};
pub use window::{SlideDirection, SlideReport, TickOutcome, WorldWindowController};

/// Where the avatar appears: horizontally at half the viewport width,
/// standing on the ground there.
#[must_use]
pub fn spawn_point(config: &WorldConfig) -> (f32, f32) {
    let x = config.viewport.half_width();
    let ground = NoiseField::new(config).height_at(x);
    (x, ground - config.avatar.height)
}
