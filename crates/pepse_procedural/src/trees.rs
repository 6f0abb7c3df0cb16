//! # Tree Placement
//!
//! Decides, column by column, whether a tree grows there and emits its
//! trunk and foliage blocks.
//!
//! ## Per-Column Stream
//!
//! Each grid column owns a `ChaCha8Rng` seeded with
//! `WorldSeed::column_hash(column_x)`. Draws, in order:
//!
//! 1. `gen_range(0..chance_denominator)`; a tree grows iff the value is
//!    `chance_index`.
//! 2. Trunk height: `trunk_min + gen_range(0..trunk_span)` cells.
//! 3. Foliage width: `gen_range(0..max(trunk / 2, 1)) + 2`, bumped to the
//!    next odd number. Never below 3.
//!
//! The stream depends only on `(column_x, seed)`, so a column decides the
//! same way whatever range it is generated in and however often.
//!
//! ## Shape
//!
//! ```text
//!        F F F          foliage: width x width cells, centred on the
//!        F F F          trunk; lower edge `width / 2` cells below the
//!        F T F          trunk top
//!          T
//!          T            trunk: grows upward from one cell above the
//!   ~~~~~~~~~~~~~~~     column's surface row
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::block::{BlockCategory, PlacedBlock};
use crate::config::{TreeConfig, WorldConfig};
use crate::grid::{floor_to_i32, snap_down, GridSpan};
use crate::noise::WorldSeed;

/// One tree, as decided by its column's stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreePlan {
    /// Anchor column; the trunk stands here.
    pub column_x: i32,
    /// y of the lowest trunk cell (one cell above the surface row).
    pub base_y: i32,
    /// Trunk height in cells.
    pub trunk_height: u32,
    /// Foliage width and height in cells (always odd).
    pub foliage_width: u32,
}

impl TreePlan {
    /// Number of blocks this tree emits.
    #[must_use]
    pub const fn block_count(&self) -> usize {
        (self.trunk_height + self.foliage_width * self.foliage_width) as usize
    }
}

/// Places trees over horizontal ranges.
#[derive(Clone, Copy, Debug)]
pub struct TreePlacer {
    seed: WorldSeed,
    unit: i32,
    /// Column the avatar spawns in; never hosts a tree.
    spawn_column: i32,
    trees: TreeConfig,
}

impl TreePlacer {
    /// Creates a placer from a world configuration.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        let unit = config.terrain.grid_unit.max(1);
        Self {
            seed: config.world_seed(),
            unit,
            spawn_column: snap_down(floor_to_i32(config.viewport.half_width()), unit),
            trees: config.trees,
        }
    }

    /// The column kept free for the avatar's spawn.
    #[inline]
    #[must_use]
    pub const fn spawn_column(&self) -> i32 {
        self.spawn_column
    }

    /// Decides whether column `column_x` hosts a tree.
    ///
    /// `ground_height_at` may be called at any x; nothing needs to be
    /// built there yet.
    #[must_use]
    pub fn plan_column(
        &self,
        column_x: i32,
        ground_height_at: impl Fn(f32) -> f32,
    ) -> Option<TreePlan> {
        if column_x == self.spawn_column {
            return None;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.column_hash(column_x));
        if rng.gen_range(0..self.trees.chance_denominator.max(1)) != self.trees.chance_index {
            return None;
        }

        #[allow(clippy::cast_precision_loss)]
        let height = ground_height_at(column_x as f32);
        let base_y = snap_down(floor_to_i32(height), self.unit).saturating_sub(self.unit);

        let trunk_height =
            self.trees.trunk_min.max(1) + rng.gen_range(0..self.trees.trunk_span.max(1));
        let mut foliage_width = rng.gen_range(0..(trunk_height / 2).max(1)) + 2;
        if foliage_width % 2 == 0 {
            foliage_width += 1;
        }

        trace!(column_x, base_y, trunk_height, foliage_width, "tree planned");
        Some(TreePlan {
            column_x,
            base_y,
            trunk_height,
            foliage_width,
        })
    }

    /// Emits the blocks of one planned tree, trunk first.
    ///
    /// Foliage columns that would fall past the `i32` limits are left out;
    /// vertical offsets saturate.
    #[allow(clippy::cast_possible_wrap)]
    pub fn emit(&self, plan: &TreePlan, out: &mut Vec<PlacedBlock>) {
        let unit = self.unit;
        let x = plan.column_x;
        let trunk = plan.trunk_height as i32;
        let width = plan.foliage_width as i32;
        let half = width / 2;
        let rows_up = |rows: i32| rows.saturating_mul(unit);

        for i in 0..trunk {
            out.push(PlacedBlock::anchored(
                x,
                plan.base_y.saturating_sub(rows_up(i)),
                x,
                BlockCategory::Trunk,
            ));
        }

        let foliage_bottom = plan.base_y.saturating_sub(rows_up(trunk - half));
        for dx in -half..=half {
            let Some(leaf_x) = dx.checked_mul(unit).and_then(|step| x.checked_add(step)) else {
                continue;
            };
            for j in 0..width {
                out.push(PlacedBlock::anchored(
                    leaf_x,
                    foliage_bottom.saturating_sub(rows_up(j)),
                    x,
                    BlockCategory::Foliage,
                ));
            }
        }
    }

    /// Places trees on every column of `[min_x, max_x)` after snapping the
    /// range outward to the grid.
    #[must_use]
    pub fn place_range(
        &self,
        min_x: i32,
        max_x: i32,
        ground_height_at: impl Fn(f32) -> f32,
    ) -> Vec<PlacedBlock> {
        let span = GridSpan::covering(min_x, max_x, self.unit);
        self.place_span(span, ground_height_at)
    }

    /// Places trees on every column of an already aligned span.
    #[must_use]
    pub fn place_span(
        &self,
        span: GridSpan,
        ground_height_at: impl Fn(f32) -> f32,
    ) -> Vec<PlacedBlock> {
        let mut blocks = Vec::new();
        let mut trees = 0usize;
        for column_x in span.columns() {
            if let Some(plan) = self.plan_column(column_x, &ground_height_at) {
                self.emit(&plan, &mut blocks);
                trees += 1;
            }
        }
        debug!(
            span_start = span.start,
            span_end = span.end,
            trees,
            blocks = blocks.len(),
            "placed trees"
        );
        blocks
    }
}
