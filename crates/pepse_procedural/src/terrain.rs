//! # Ground Columns
//!
//! Turns a horizontal range into grid-aligned columns of ground blocks.
//!
//! ## Column Layout
//!
//! ```text
//!   y = surface      [S]   <- surface (top `surface_rows` blocks)
//!   y = surface + 1u [S]
//!   y = surface + 2u [G]   <- subsurface fill
//!   ...              [G]
//!   y = surface + (depth - 1)u
//! ```
//!
//! `surface` is the ground height at the column's x, floored to the grid.

use tracing::debug;

use crate::block::{BlockCategory, PlacedBlock};
use crate::config::WorldConfig;
use crate::grid::{floor_to_i32, snap_down, GridSpan};
use crate::noise::NoiseField;

/// Builds ground columns for arbitrary ranges.
#[derive(Clone, Copy, Debug)]
pub struct GroundChunkBuilder {
    noise: NoiseField,
    unit: i32,
    depth: u32,
    surface_rows: u32,
}

impl GroundChunkBuilder {
    /// Creates a builder from a world configuration.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            noise: NoiseField::new(config),
            unit: config.terrain.grid_unit.max(1),
            depth: config.terrain.depth,
            surface_rows: config.terrain.surface_rows,
        }
    }

    /// The noise field this builder samples.
    #[inline]
    #[must_use]
    pub const fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Grid unit blocks are placed on.
    #[inline]
    #[must_use]
    pub const fn grid_unit(&self) -> i32 {
        self.unit
    }

    /// Blocks per column.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Raw ground height at `x`; callable at any x, built or not.
    #[inline]
    #[must_use]
    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.noise.height_at(x)
    }

    /// The grid row the top block of column `column_x` starts on.
    #[must_use]
    pub fn surface_row(&self, column_x: i32) -> i32 {
        #[allow(clippy::cast_precision_loss)]
        let height = self.noise.height_at(column_x as f32);
        snap_down(floor_to_i32(height), self.unit)
    }

    /// Builds every column in `[min_x, max_x)` after snapping the range
    /// outward to the grid. Inverted or empty ranges yield nothing.
    #[must_use]
    pub fn build_range(&self, min_x: i32, max_x: i32) -> Vec<PlacedBlock> {
        let span = GridSpan::covering(min_x, max_x, self.unit);
        let blocks = self.build_span(span);
        debug!(
            min_x,
            max_x,
            span_start = span.start,
            span_end = span.end,
            blocks = blocks.len(),
            "built ground range"
        );
        blocks
    }

    /// Builds every column of an already aligned span.
    #[must_use]
    pub fn build_span(&self, span: GridSpan) -> Vec<PlacedBlock> {
        let mut blocks = Vec::with_capacity(span.len() * self.depth as usize);
        for column_x in span.columns() {
            self.build_column(column_x, &mut blocks);
        }
        blocks
    }

    /// Appends the blocks of one column, top to bottom.
    pub fn build_column(&self, column_x: i32, out: &mut Vec<PlacedBlock>) {
        let top = self.surface_row(column_x);
        let mut y = top;
        for row in 0..self.depth {
            let category = if row < self.surface_rows {
                BlockCategory::SurfaceGround
            } else {
                BlockCategory::SubsurfaceGround
            };
            out.push(PlacedBlock::new(column_x, y, category));
            y = y.saturating_add(self.unit);
        }
    }
}
