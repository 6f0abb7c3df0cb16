//! # Grid Alignment
//!
//! Every placed block sits on a multiple of the grid unit. Requested
//! ranges are snapped outward before use, so a range never shrinks and
//! adjacent snapped ranges share an edge without overlapping.

/// Lowest grid line representable as an `i32` for `unit`.
#[inline]
#[must_use]
pub const fn grid_min(unit: i32) -> i32 {
    (i32::MIN.div_euclid(unit) + 1) * unit
}

/// Highest grid line representable as an `i32` for `unit`.
#[inline]
#[must_use]
pub const fn grid_max(unit: i32) -> i32 {
    i32::MAX.div_euclid(unit) * unit
}

#[allow(clippy::cast_possible_truncation)]
const fn clamp_to_grid(x: i64, unit: i32) -> i32 {
    let lo = grid_min(unit) as i64;
    let hi = grid_max(unit) as i64;
    if x < lo {
        lo as i32
    } else if x > hi {
        hi as i32
    } else {
        x as i32
    }
}

/// Rounds `x` down to the nearest multiple of `unit` (toward -inf),
/// clamped to `[grid_min(unit), grid_max(unit)]`.
#[inline]
#[must_use]
pub const fn snap_down(x: i32, unit: i32) -> i32 {
    let unit64 = unit as i64;
    clamp_to_grid((x as i64).div_euclid(unit64) * unit64, unit)
}

/// Rounds `x` up to the nearest multiple of `unit` (toward +inf),
/// clamped to `[grid_min(unit), grid_max(unit)]`.
#[inline]
#[must_use]
pub const fn snap_up(x: i32, unit: i32) -> i32 {
    let x64 = x as i64;
    let unit64 = unit as i64;
    let rem = x64.rem_euclid(unit64);
    if rem == 0 {
        clamp_to_grid(x64, unit)
    } else {
        clamp_to_grid(x64 + (unit64 - rem), unit)
    }
}

/// Floors a world-space coordinate to an integer. Values past the `i32`
/// limits saturate to them and NaN maps to 0.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn floor_to_i32(x: f32) -> i32 {
    x.floor() as i32
}

/// Ceils a world-space coordinate to an integer. Values past the `i32`
/// limits saturate to them and NaN maps to 0.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn ceil_to_i32(x: f32) -> i32 {
    x.ceil() as i32
}

/// A half-open, grid-aligned span of columns `[start, end)`.
///
/// Both ends are multiples of `unit`. Empty when `start >= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSpan {
    /// First column (inclusive).
    pub start: i32,
    /// One past the last column.
    pub end: i32,
    /// Grid unit the span is aligned to.
    pub unit: i32,
}

impl GridSpan {
    /// Snaps an integer range `[min_x, max_x)` outward to the grid.
    ///
    /// An inverted range is treated as empty. Near the `i32` limits the
    /// span stops at the last representable grid line.
    #[must_use]
    pub const fn covering(min_x: i32, max_x: i32, unit: i32) -> Self {
        let start = snap_down(min_x, unit);
        let end = if max_x <= min_x {
            start
        } else {
            snap_up(max_x, unit)
        };
        Self { start, end, unit }
    }

    /// Snaps a world-space range `[min_x, max_x)` outward to the grid.
    /// Ranges beyond the `i32` limits collapse to an empty span there.
    #[must_use]
    pub fn covering_world(min_x: f32, max_x: f32, unit: i32) -> Self {
        Self::covering(floor_to_i32(min_x), ceil_to_i32(max_x), unit)
    }

    /// An empty span.
    #[must_use]
    pub const fn empty(unit: i32) -> Self {
        Self {
            start: 0,
            end: 0,
            unit,
        }
    }

    /// True when the span holds no columns.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of columns in the span.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            ((self.end as i64 - self.start as i64) / self.unit as i64) as usize
        }
    }

    /// True when column `x` lies inside the span.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32) -> bool {
        x >= self.start && x < self.end
    }

    /// Iterates over the column x values in ascending order.
    // Every column lies in [start, end), so it fits back into i32.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn columns(&self) -> impl Iterator<Item = i32> {
        let unit = i64::from(self.unit);
        let start = i64::from(self.start);
        (0..self.len()).map(move |i| (start + i as i64 * unit) as i32)
    }

    /// Columns of `self` that are not in `other`, as at most two spans
    /// (left remainder, right remainder).
    #[must_use]
    pub fn difference(&self, other: &Self) -> [Self; 2] {
        if self.is_empty() {
            return [Self::empty(self.unit), Self::empty(self.unit)];
        }
        if other.is_empty() || other.end <= self.start || other.start >= self.end {
            return [*self, Self::empty(self.unit)];
        }
        let left = Self {
            start: self.start,
            end: other.start.max(self.start).min(self.end),
            unit: self.unit,
        };
        let right = Self {
            start: other.end.max(self.start).min(self.end),
            end: self.end,
            unit: self.unit,
        };
        [left, right]
    }
}
