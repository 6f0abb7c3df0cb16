//! # Placed Blocks
//!
//! Every materialized world entity is one grid cell tagged with a
//! category. The category decides which bucket stores it, which render
//! layer draws it and what it collides with.

/// Render layer the static world is built on.
pub const STATIC_OBJECTS_LAYER: i32 = -100;

/// Layer the avatar and other moving objects live on.
pub const DEFAULT_LAYER: i32 = 0;

/// What kind of world entity a block is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BlockCategory {
    /// Top rows of a ground column; the avatar walks on these.
    SurfaceGround = 0,
    /// Bulk ground fill below the surface rows.
    SubsurfaceGround = 1,
    /// One trunk segment of a tree.
    Trunk = 2,
    /// One foliage cell of a tree.
    Foliage = 3,
}

impl BlockCategory {
    /// All categories, in bucket order.
    pub const ALL: [Self; 4] = [
        Self::SurfaceGround,
        Self::SubsurfaceGround,
        Self::Trunk,
        Self::Foliage,
    ];

    /// Stable index of this category (0-3).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Render layer for blocks of this category.
    #[must_use]
    pub const fn layer(self) -> Layer {
        match self {
            Self::SurfaceGround => Layer::UpperGround,
            Self::SubsurfaceGround => Layer::Ground,
            Self::Trunk => Layer::Trunk,
            Self::Foliage => Layer::Foliage,
        }
    }

    /// Base colour (RGB) before per-block jitter.
    #[must_use]
    pub const fn base_color(self) -> [u8; 3] {
        match self {
            Self::SurfaceGround | Self::SubsurfaceGround => [212, 123, 74],
            Self::Trunk => [100, 50, 20],
            Self::Foliage => [50, 200, 30],
        }
    }

    /// True for the two ground categories.
    #[inline]
    #[must_use]
    pub const fn is_ground(self) -> bool {
        matches!(self, Self::SurfaceGround | Self::SubsurfaceGround)
    }

    /// Short lowercase name, used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SurfaceGround => "upper_ground",
            Self::SubsurfaceGround => "ground",
            Self::Trunk => "stem",
            Self::Foliage => "leaf",
        }
    }
}

/// Render/collision layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Subsurface ground.
    Ground,
    /// Surface ground; solid from above.
    UpperGround,
    /// Tree trunks.
    Trunk,
    /// Foliage; rests on surface ground.
    Foliage,
    /// The avatar.
    Avatar,
}

impl Layer {
    /// Numeric layer id as a renderer sorts them.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Ground | Self::Trunk => STATIC_OBJECTS_LAYER,
            Self::UpperGround => STATIC_OBJECTS_LAYER + 20,
            Self::Foliage => STATIC_OBJECTS_LAYER + 1,
            Self::Avatar => DEFAULT_LAYER,
        }
    }

    /// Whether objects on `self` and `other` collide.
    ///
    /// Only surface ground takes part in collisions: it stops the avatar
    /// from above and catches falling foliage.
    #[must_use]
    pub const fn collides_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::UpperGround, Self::Foliage | Self::Avatar)
                | (Self::Foliage | Self::Avatar, Self::UpperGround)
        )
    }
}

/// One materialized grid cell.
///
/// `x`/`y` are the cell's top-left corner in world units; y grows
/// downward. `anchor_x` is the column that owns the block: its own column
/// for ground, the trunk column for every part of a tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacedBlock {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Owning column, used for range deletion.
    pub anchor_x: i32,
    /// What kind of block this is.
    pub category: BlockCategory,
}

impl PlacedBlock {
    /// Largest per-channel offset applied by [`PlacedBlock::color`].
    pub const COLOR_JITTER: i16 = 12;

    /// Creates a block anchored to its own column.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, category: BlockCategory) -> Self {
        Self {
            x,
            y,
            anchor_x: x,
            category,
        }
    }

    /// Creates a block owned by another column.
    #[inline]
    #[must_use]
    pub const fn anchored(x: i32, y: i32, anchor_x: i32, category: BlockCategory) -> Self {
        Self {
            x,
            y,
            anchor_x,
            category,
        }
    }

    /// Render layer of this block.
    #[inline]
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.category.layer()
    }

    /// Display colour: the category colour with a small deterministic
    /// per-cell offset, so neighbouring blocks read as distinct.
    #[must_use]
    pub fn color(&self) -> [u8; 3] {
        // Cheap integer hash of the cell position.
        #[allow(clippy::cast_sign_loss)]
        let mut h = (self.x as u32).wrapping_mul(0x85eb_ca6b)
            ^ (self.y as u32).wrapping_mul(0xc2b2_ae35);
        h ^= h >> 16;
        h = h.wrapping_mul(0x7feb_352d);
        h ^= h >> 15;

        let mut rgb = self.category.base_color();
        for (i, channel) in rgb.iter_mut().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let offset =
                ((h >> (i * 8)) & 0xff) as i16 % (Self::COLOR_JITTER * 2 + 1) - Self::COLOR_JITTER;
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let value = (i16::from(*channel) + offset).clamp(0, 255) as u8;
            *channel = value;
        }
        rgb
    }
}
