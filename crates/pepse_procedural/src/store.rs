//! # Entity Store
//!
//! Materialized world blocks, one bucket per [`BlockCategory`].
//!
//! Each bucket indexes its blocks by anchor column in a `BTreeMap`, so
//! deleting a column range is a range split over that bucket alone. No
//! bucket is ever touched by an operation on another.

use std::collections::BTreeMap;
use std::ops::Range;

use tracing::debug;

use crate::block::{BlockCategory, PlacedBlock};

/// Blocks of one category, keyed by anchor column.
#[derive(Clone, Debug, Default)]
pub struct Bucket {
    columns: BTreeMap<i32, Vec<PlacedBlock>>,
    len: usize,
}

impl Bucket {
    /// Adds a block under its anchor column.
    pub fn insert(&mut self, block: PlacedBlock) {
        self.columns.entry(block.anchor_x).or_default().push(block);
        self.len += 1;
    }

    /// Number of blocks.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the bucket is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Blocks anchored at `anchor_x`.
    #[must_use]
    pub fn column(&self, anchor_x: i32) -> &[PlacedBlock] {
        self.columns
            .get(&anchor_x)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Anchor columns present, ascending.
    pub fn anchors(&self) -> impl Iterator<Item = i32> + '_ {
        self.columns.keys().copied()
    }

    /// All blocks, in anchor order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.columns.values().flatten()
    }

    /// Removes every block whose anchor lies in `range`. Returns the
    /// number of blocks removed.
    pub fn remove_range(&mut self, range: Range<i32>) -> usize {
        if range.start >= range.end {
            return 0;
        }
        // [.. start) stays, [start .. end) goes, [end ..) comes back.
        let mut removed = self.columns.split_off(&range.start);
        let mut tail = removed.split_off(&range.end);
        self.columns.append(&mut tail);

        let count: usize = removed.values().map(Vec::len).sum();
        self.len -= count;
        count
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.columns.clear();
        self.len = 0;
    }
}

/// All materialized blocks, bucketed by category.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    buckets: [Bucket; 4],
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one block to its category's bucket.
    #[inline]
    pub fn insert(&mut self, block: PlacedBlock) {
        self.buckets[block.category.index()].insert(block);
    }

    /// Adds many blocks.
    pub fn extend(&mut self, blocks: impl IntoIterator<Item = PlacedBlock>) {
        for block in blocks {
            self.insert(block);
        }
    }

    /// The bucket for `category`.
    #[inline]
    #[must_use]
    pub fn bucket(&self, category: BlockCategory) -> &Bucket {
        &self.buckets[category.index()]
    }

    /// Blocks in `category`.
    #[inline]
    #[must_use]
    pub fn count(&self, category: BlockCategory) -> usize {
        self.bucket(category).len()
    }

    /// Total number of blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// True when nothing is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// All blocks of every category.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedBlock> {
        self.buckets.iter().flat_map(|bucket| bucket.iter())
    }

    /// Removes blocks of one category anchored in `range`.
    pub fn remove_range(&mut self, category: BlockCategory, range: Range<i32>) -> usize {
        self.buckets[category.index()].remove_range(range)
    }

    /// Removes blocks of every category anchored in `range`, bucket by
    /// bucket. Returns the total removed.
    pub fn remove_anchor_range(&mut self, range: Range<i32>) -> usize {
        let mut removed = [0usize; 4];
        for category in BlockCategory::ALL {
            removed[category.index()] = self.remove_range(category, range.clone());
        }
        let total = removed.iter().sum();
        debug!(
            start = range.start,
            end = range.end,
            surface = removed[BlockCategory::SurfaceGround.index()],
            subsurface = removed[BlockCategory::SubsurfaceGround.index()],
            trunk = removed[BlockCategory::Trunk.index()],
            foliage = removed[BlockCategory::Foliage.index()],
            "removed range"
        );
        total
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Top block y of the ground column at `column_x`, if built.
    #[must_use]
    pub fn column_height(&self, column_x: i32) -> Option<i32> {
        self.bucket(BlockCategory::SurfaceGround)
            .column(column_x)
            .iter()
            .map(|b| b.y)
            .min()
    }

    /// Per ground column: (top block y, block count), ascending by x.
    #[must_use]
    pub fn ground_columns(&self) -> BTreeMap<i32, (i32, usize)> {
        let mut columns: BTreeMap<i32, (i32, usize)> = BTreeMap::new();
        for category in [BlockCategory::SurfaceGround, BlockCategory::SubsurfaceGround] {
            for block in self.bucket(category).iter() {
                let entry = columns.entry(block.anchor_x).or_insert((block.y, 0));
                entry.0 = entry.0.min(block.y);
                entry.1 += 1;
            }
        }
        columns
    }

    /// Anchor columns that host a tree, ascending.
    #[must_use]
    pub fn tree_anchors(&self) -> Vec<i32> {
        self.bucket(BlockCategory::Trunk).anchors().collect()
    }

    /// Lowest and one-past-highest anchor column across all buckets.
    #[must_use]
    pub fn anchor_bounds(&self, unit: i32) -> Option<(i32, i32)> {
        let min = self
            .buckets
            .iter()
            .filter_map(|b| b.columns.first_key_value().map(|(x, _)| *x))
            .min()?;
        let max = self
            .buckets
            .iter()
            .filter_map(|b| b.columns.last_key_value().map(|(x, _)| *x))
            .max()?;
        Some((min, max.saturating_add(unit)))
    }
}
