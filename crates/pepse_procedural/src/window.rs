//! # World Window
//!
//! Keeps world content materialized over a horizontal window around the
//! tracked entity.
//!
//! ## Sliding
//!
//! Each tick compares the tracked x with the x seen at the last slide:
//!
//! ```text
//! delta = last_tracked_x - tracked_x
//!
//! |delta| <  half viewport width   -> stable, nothing happens
//! |delta| >= half viewport width   -> slide both edges by -delta
//! ```
//!
//! A slide removes the columns the window vacated and generates the
//! columns it exposed, then remembers the new tracked x. Because only the
//! difference is stored, the controller follows respawns as long as
//! `reset_tracking` is called with the new position. `recenter` does the
//! same but also moves the window there immediately.
//!
//! ## Grid Cover
//!
//! The edges are kept exactly as slid, but what is materialized is their
//! grid cover `[snap_down(left), snap_up(right))`. Vacated and exposed
//! columns are the differences between the old and new covers, so a slide
//! by any amount, aligned or not, never builds a column twice and never
//! skips one.

use tracing::{debug, info};

use crate::config::WorldConfig;
use crate::grid::GridSpan;
use crate::store::EntityStore;
use crate::terrain::GroundChunkBuilder;
use crate::trees::TreePlacer;

/// Direction the window moved in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideDirection {
    /// Tracked entity moved toward +x.
    Right,
    /// Tracked entity moved toward -x.
    Left,
}

/// What one slide did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideReport {
    /// Which way the window moved.
    pub direction: SlideDirection,
    /// `last_tracked_x - tracked_x` at the time of the slide.
    pub delta: f32,
    /// Blocks deleted from the vacated columns.
    pub removed: usize,
    /// Blocks generated in the exposed columns.
    pub generated: usize,
    /// Left edge after the slide.
    pub left_edge: f32,
    /// Right edge after the slide.
    pub right_edge: f32,
}

/// Result of one controller tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Displacement under the threshold; nothing changed.
    Stable,
    /// The window slid and the world was updated.
    Slid(SlideReport),
}

impl TickOutcome {
    /// True if this tick slid the window.
    #[must_use]
    pub const fn slid(&self) -> bool {
        matches!(self, Self::Slid(_))
    }
}

/// Owns the window bounds and streams ranges in and out of the store.
#[derive(Clone, Debug)]
pub struct WorldWindowController {
    left_edge: f32,
    right_edge: f32,
    last_tracked_x: f32,
    /// Slide threshold.
    half_width: f32,
    unit: i32,
    ground: GroundChunkBuilder,
    trees: TreePlacer,
}

impl WorldWindowController {
    /// Creates a controller with the standard initial window
    /// `[-width / 2, 3 * width / 2)`.
    #[must_use]
    pub fn new(config: &WorldConfig, tracked_x: f32) -> Self {
        let width = config.viewport.width;
        Self::with_bounds(config, -width / 2.0, 3.0 * width / 2.0, tracked_x)
    }

    /// Creates a controller with explicit initial edges.
    #[must_use]
    pub fn with_bounds(
        config: &WorldConfig,
        left_edge: f32,
        right_edge: f32,
        tracked_x: f32,
    ) -> Self {
        Self {
            left_edge,
            right_edge,
            last_tracked_x: tracked_x,
            half_width: config.viewport.half_width(),
            unit: config.terrain.grid_unit.max(1),
            ground: GroundChunkBuilder::new(config),
            trees: TreePlacer::new(config),
        }
    }

    /// Left edge in world units.
    #[inline]
    #[must_use]
    pub const fn left_edge(&self) -> f32 {
        self.left_edge
    }

    /// Right edge in world units.
    #[inline]
    #[must_use]
    pub const fn right_edge(&self) -> f32 {
        self.right_edge
    }

    /// Tracked x recorded at the last slide (or reset).
    #[inline]
    #[must_use]
    pub const fn last_tracked_x(&self) -> f32 {
        self.last_tracked_x
    }

    /// The ground builder the controller generates with.
    #[inline]
    #[must_use]
    pub const fn ground(&self) -> &GroundChunkBuilder {
        &self.ground
    }

    /// The tree placer the controller generates with.
    #[inline]
    #[must_use]
    pub const fn trees(&self) -> &TreePlacer {
        &self.trees
    }

    /// Columns currently materialized: the grid cover of the edges.
    #[must_use]
    pub fn materialized_span(&self) -> GridSpan {
        GridSpan::covering_world(self.left_edge, self.right_edge, self.unit)
    }

    /// Builds the whole current window into `store`. Any content already
    /// anchored there is replaced, so calling this twice is harmless.
    pub fn populate(&self, store: &mut EntityStore) -> usize {
        let span = self.materialized_span();
        store.remove_anchor_range(span.start..span.end);
        let generated = self.generate(span, store);
        info!(
            left_edge = self.left_edge,
            right_edge = self.right_edge,
            seed = self.ground.noise().seed().value(),
            generated,
            "world window populated"
        );
        generated
    }

    /// Forgets the displacement since the last slide, e.g. after the
    /// tracked entity was moved externally.
    pub fn reset_tracking(&mut self, tracked_x: f32) {
        self.last_tracked_x = tracked_x;
    }

    /// Runs one control step for the tracked entity at `tracked_x`.
    pub fn tick(&mut self, tracked_x: f32, store: &mut EntityStore) -> TickOutcome {
        let delta = self.last_tracked_x - tracked_x;
        if !delta.is_finite() || delta == 0.0 || delta.abs() < self.half_width {
            return TickOutcome::Stable;
        }
        TickOutcome::Slid(self.slide(delta, tracked_x, store))
    }

    /// Slides by the full displacement since the last slide, however
    /// small. Used when the tracked entity is placed somewhere new, e.g.
    /// on respawn, so the window lands around it at once.
    pub fn recenter(&mut self, tracked_x: f32, store: &mut EntityStore) -> TickOutcome {
        let delta = self.last_tracked_x - tracked_x;
        if !delta.is_finite() || delta == 0.0 {
            return TickOutcome::Stable;
        }
        TickOutcome::Slid(self.slide(delta, tracked_x, store))
    }

    fn slide(&mut self, delta: f32, tracked_x: f32, store: &mut EntityStore) -> SlideReport {
        let direction = if delta < 0.0 {
            SlideDirection::Right
        } else {
            SlideDirection::Left
        };

        let old = self.materialized_span();
        self.left_edge -= delta;
        self.right_edge -= delta;
        let new = self.materialized_span();

        let mut removed = 0;
        for vacated in old.difference(&new) {
            if !vacated.is_empty() {
                removed += store.remove_anchor_range(vacated.start..vacated.end);
            }
        }

        let mut generated = 0;
        for exposed in new.difference(&old) {
            if !exposed.is_empty() {
                generated += self.generate(exposed, store);
            }
        }

        self.last_tracked_x = tracked_x;

        debug!(
            ?direction,
            delta,
            removed,
            generated,
            left_edge = self.left_edge,
            right_edge = self.right_edge,
            "world window slid"
        );

        SlideReport {
            direction,
            delta,
            removed,
            generated,
            left_edge: self.left_edge,
            right_edge: self.right_edge,
        }
    }

    /// Generates ground and trees for an aligned span.
    fn generate(&self, span: GridSpan, store: &mut EntityStore) -> usize {
        let ground = self.ground.build_span(span);
        let trees = self
            .trees
            .place_span(span, |x| self.ground.ground_height_at(x));
        let count = ground.len() + trees.len();
        store.extend(ground);
        store.extend(trees);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockCategory;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn world(config: &WorldConfig) -> (WorldWindowController, EntityStore) {
        let controller = WorldWindowController::new(config, config.viewport.half_width());
        let mut store = EntityStore::new();
        controller.populate(&mut store);
        (controller, store)
    }

    fn assert_window_invariant(controller: &WorldWindowController, store: &EntityStore) {
        let span = controller.materialized_span();
        let depth = controller.ground().depth() as usize;

        for block in store.iter() {
            assert!(
                span.contains(block.anchor_x),
                "anchor {} outside [{}, {})",
                block.anchor_x,
                span.start,
                span.end
            );
        }

        let columns = store.ground_columns();
        let expected: Vec<i32> = span.columns().collect();
        let actual: Vec<i32> = columns.keys().copied().collect();
        assert_eq!(actual, expected, "ground columns must tile the window exactly");
        for (x, (_, count)) in &columns {
            assert_eq!(*count, depth, "column {x} has {count} blocks");
        }

        for anchor in store.tree_anchors() {
            let trunk = store.bucket(BlockCategory::Trunk).column(anchor).len();
            let plan = controller
                .trees()
                .plan_column(anchor, |x| controller.ground().ground_height_at(x))
                .unwrap();
            assert_eq!(trunk, plan.trunk_height as usize, "tree at {anchor} is partial");
        }
    }

    #[test]
    fn test_initial_window() {
        let config = WorldConfig::default();
        let (controller, store) = world(&config);

        assert_eq!(controller.left_edge(), -400.0);
        assert_eq!(controller.right_edge(), 1200.0);
        let span = controller.materialized_span();
        assert_eq!((span.start, span.end), (-420, 1200));
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_stable_under_threshold() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        let before = store.len();

        for x in [400.0, 401.0, 10.5, 799.0, 0.01] {
            assert_eq!(controller.tick(x, &mut store), TickOutcome::Stable);
        }
        assert_eq!(store.len(), before);
        assert_eq!(controller.last_tracked_x(), 400.0);
    }

    #[test]
    fn test_slide_left_scenario() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);

        let outcome = controller.tick(400.0 - 900.0, &mut store);
        let TickOutcome::Slid(report) = outcome else {
            panic!("expected a slide, got {outcome:?}");
        };

        assert_eq!(report.direction, SlideDirection::Left);
        assert_eq!(report.delta, 900.0);
        assert_eq!(controller.left_edge(), -1300.0);
        assert_eq!(controller.right_edge(), 300.0);
        assert_eq!(controller.last_tracked_x(), -500.0);

        let columns = store.ground_columns();
        assert_eq!(columns.keys().next(), Some(&-1320));
        assert_eq!(columns.keys().next_back(), Some(&270));
        assert!(columns.range(300..1200).next().is_none());
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_slide_right() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);

        let outcome = controller.tick(400.0 + 450.0, &mut store);
        assert!(outcome.slid());
        assert_eq!(controller.left_edge(), 50.0);
        assert_eq!(controller.right_edge(), 1650.0);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_exact_threshold_slides() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        assert!(controller.tick(0.0, &mut store).slid());
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_regenerated_columns_match_first_build() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        let original = store.ground_columns();
        let original_trees = store.tree_anchors();

        // Out and back again.
        controller.tick(400.0 + 1700.0, &mut store);
        controller.tick(400.0, &mut store);

        assert_eq!(store.ground_columns(), original);
        assert_eq!(store.tree_anchors(), original_trees);
    }

    #[test]
    fn test_teleport_replaces_everything() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);

        controller.tick(400.0 + 100_000.0, &mut store);
        assert_eq!(controller.left_edge(), 99_600.0);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_random_walk_keeps_invariant() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut x = 400.0f32;
        let mut slides = 0;
        for _ in 0..400 {
            x += rng.gen_range(-337.0f32..337.0);
            if controller.tick(x, &mut store).slid() {
                slides += 1;
                assert_window_invariant(&controller, &store);
            }
        }
        assert!(slides > 0);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_reset_tracking_after_respawn() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);

        // Avatar respawned far away; host resets both positions together.
        controller.reset_tracking(5000.0);
        assert_eq!(controller.tick(5000.0, &mut store), TickOutcome::Stable);
        assert_eq!(controller.tick(5100.0, &mut store), TickOutcome::Stable);
        assert!(controller.tick(5500.0, &mut store).slid());
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_recenter_ignores_threshold() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        let original = store.ground_columns();

        controller.tick(3000.0, &mut store);
        let outcome = controller.recenter(400.0, &mut store);
        assert!(outcome.slid());
        assert_eq!(controller.left_edge(), -400.0);
        assert_eq!(store.ground_columns(), original);

        // A small nudge still moves the window.
        assert!(controller.recenter(410.0, &mut store).slid());
        assert_eq!(controller.left_edge(), -390.0);
        assert_eq!(controller.recenter(410.0, &mut store), TickOutcome::Stable);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_small_viewport() {
        let config = WorldConfig::test();
        let (mut controller, mut store) = world(&config);
        assert_eq!(controller.left_edge(), -150.0);
        assert_eq!(controller.right_edge(), 450.0);

        assert_eq!(controller.tick(299.0, &mut store), TickOutcome::Stable);
        assert!(controller.tick(300.0, &mut store).slid());
        assert_eq!(controller.left_edge(), 0.0);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_non_finite_position_is_ignored() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);
        assert_eq!(controller.tick(f32::NAN, &mut store), TickOutcome::Stable);
        assert_eq!(controller.tick(f32::INFINITY, &mut store), TickOutcome::Stable);
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_far_positions_past_i32_limits() {
        let config = WorldConfig::default();
        let (mut controller, mut store) = world(&config);

        for far in [-3.0e9f32, 3.0e9] {
            assert!(controller.tick(far, &mut store).slid());
            assert!(controller.materialized_span().is_empty());
            assert!(store.is_empty());
            assert_window_invariant(&controller, &store);

            // Coming back rebuilds a normal window.
            assert!(controller.tick(400.0, &mut store).slid());
            assert!(!controller.materialized_span().is_empty());
            assert!(!store.is_empty());
            assert_window_invariant(&controller, &store);
        }
    }

    #[test]
    fn test_window_touching_i32_limit() {
        let config = WorldConfig::default();
        let controller =
            WorldWindowController::with_bounds(&config, 2_147_482_000.0, 2_147_483_600.0, 0.0);
        let mut store = EntityStore::new();
        assert!(controller.populate(&mut store) > 0);

        let span = controller.materialized_span();
        assert_eq!(span.end, crate::grid::grid_max(30));
        assert_window_invariant(&controller, &store);
    }

    #[test]
    fn test_populate_twice_does_not_duplicate() {
        let config = WorldConfig::default();
        let (controller, mut store) = world(&config);
        let before = store.len();
        controller.populate(&mut store);
        assert_eq!(store.len(), before);
        assert_window_invariant(&controller, &store);
    }
}
