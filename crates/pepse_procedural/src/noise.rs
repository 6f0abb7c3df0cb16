//! # Ground Height Noise
//!
//! One-dimensional gradient noise that gives the ground height for any
//! horizontal coordinate.
//!
//! ## Algorithm
//!
//! 1. Scale `x` into lattice space (`x / noise_scale`).
//! 2. Take lattice points `x0 = trunc(lx)` and `x1 = x0 + 1`.
//! 3. Each lattice point `i` has gradient `sin(seed + i)`.
//! 4. Contribution at a point is `gradient * (lx - i)`.
//! 5. Blend the two contributions with weight `3t² - 2t³`.
//! 6. Scale into world units around a baseline at a fixed fraction of the
//!    viewport height.
//!
//! `x0` truncates toward zero, so every `x` in `(-noise_scale, 0)` samples
//! the lattice cell `[0, 1]` with a negative `t`. The amplitude also differs
//! by sign: non-negative `x` uses `positive_amplitude`, negative `x` uses
//! `negative_amplitude`. Tree placement depends on the exact height curve,
//! so both quirks are part of the contract.
//!
//! ## Determinism Guarantee
//!
//! Given the same `WorldSeed` and configuration, `height_at` returns the
//! same value for the same `x` no matter when or how often it is called.

use crate::config::WorldConfig;

/// World seed for deterministic generation.
///
/// Both the ground height curve and the per-column tree streams derive
/// from this value alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(i32);

impl WorldSeed {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
    /// Final avalanche multiplier.
    const MIX: u64 = 0x517c_c1b7_2722_0a95;

    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: i32) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Stable 64-bit hash of `(column_x, seed)`.
    ///
    /// Pinned algorithm, must not change:
    /// - FNV-1a over the 4 little-endian bytes of `column_x` followed by
    ///   the 4 little-endian bytes of the seed;
    /// - then `h ^= h >> 32; h *= 0x517cc1b727220a95; h ^= h >> 32`
    ///   (wrapping).
    ///
    /// The result seeds the column's `ChaCha8Rng` stream.
    #[must_use]
    pub const fn column_hash(self, column_x: i32) -> u64 {
        let x_bytes = column_x.to_le_bytes();
        let seed_bytes = self.0.to_le_bytes();

        let mut hash = Self::FNV_OFFSET;
        let mut i = 0;
        while i < 4 {
            hash ^= x_bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        let mut i = 0;
        while i < 4 {
            hash ^= seed_bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }

        hash ^= hash >> 32;
        hash = hash.wrapping_mul(Self::MIX);
        hash ^= hash >> 32;
        hash
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(120)
    }
}

/// The ground height function.
///
/// Stateless apart from its constants; O(1) per query, no caching.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseField {
    seed: WorldSeed,
    /// World units per lattice cell.
    scale: f32,
    positive_amplitude: f32,
    negative_amplitude: f32,
    /// Height of the curve where the blended noise is zero.
    baseline: f32,
}

impl NoiseField {
    /// Creates a noise field from a world configuration.
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        let terrain = &config.terrain;
        Self {
            seed: config.world_seed(),
            scale: terrain.noise_scale,
            positive_amplitude: terrain.positive_amplitude,
            negative_amplitude: terrain.negative_amplitude,
            baseline: config.viewport.height * terrain.baseline_fraction,
        }
    }

    /// The seed this field samples.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// The height returned wherever the blended noise is zero.
    #[inline]
    #[must_use]
    pub const fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Amplitude applied at `x`.
    #[inline]
    #[must_use]
    pub fn amplitude_at(&self, x: f32) -> f32 {
        if x >= 0.0 {
            self.positive_amplitude
        } else {
            self.negative_amplitude
        }
    }

    /// Ground height at world coordinate `x`.
    ///
    /// Larger values are lower on screen: y grows downward.
    #[must_use]
    pub fn height_at(&self, x: f32) -> f32 {
        self.blended(x) * self.amplitude_at(x) + self.baseline
    }

    /// Interpolated noise at `x` before amplitude and baseline.
    #[must_use]
    pub fn blended(&self, x: f32) -> f32 {
        let lattice_x = x / self.scale;
        #[allow(clippy::cast_possible_truncation)]
        let x0 = lattice_x as i32;
        let x1 = x0.wrapping_add(1);

        #[allow(clippy::cast_precision_loss)]
        let t = lattice_x - x0 as f32;

        let n0 = self.dot_grid_gradient(x0, lattice_x);
        let n1 = self.dot_grid_gradient(x1, lattice_x);

        (n1 - n0) * (3.0 - t * 2.0) * t * t + n0
    }

    /// Pseudo-gradient at lattice point `ix`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn gradient(&self, ix: i32) -> f32 {
        f64::from(self.seed.value().wrapping_add(ix)).sin() as f32
    }

    #[inline]
    fn dot_grid_gradient(&self, ix: i32, lattice_x: f32) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let dx = lattice_x - ix as f32;
        dx * self.gradient(ix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: i32) -> NoiseField {
        NoiseField::new(&WorldConfig::default().with_seed(seed))
    }

    #[test]
    fn test_determinism() {
        let a = field(120);
        let b = field(120);

        // Interleave orders; results must not depend on call history.
        let xs: Vec<f32> = (-200..200).map(|i| i as f32 * 37.5).collect();
        let forward: Vec<f32> = xs.iter().map(|&x| a.height_at(x)).collect();
        let backward: Vec<f32> = xs.iter().rev().map(|&x| b.height_at(x)).collect();

        for (i, h) in forward.iter().enumerate() {
            assert_eq!(
                h.to_bits(),
                backward[xs.len() - 1 - i].to_bits(),
                "Noise should be deterministic at x={}",
                xs[i]
            );
        }
    }

    #[test]
    fn test_different_seeds_different_results() {
        assert_ne!(field(1).height_at(1500.0), field(2).height_at(1500.0));
    }

    #[test]
    fn test_known_value_mid_cell() {
        // x = 500 sits at t = 0.5 in cell [0, 1]; the blend weight is 0.5,
        // so blended = 0.25 * (sin(120) - sin(121)).
        let h = f64::from(field(120).height_at(500.0));
        let expected = 450.0 + 500.0 * 0.25 * (120f64.sin() - 121f64.sin());
        assert!((h - expected).abs() < 1e-2, "got {h}, expected {expected}");
    }

    #[test]
    fn test_lattice_points_sit_on_baseline() {
        // At integer lattice points the own contribution is zero.
        let f = field(120);
        for i in -5..5 {
            let x = i as f32 * 1000.0;
            assert!((f.height_at(x) - f.baseline()).abs() < 1e-3, "x={x}");
        }
    }

    #[test]
    fn test_asymmetric_amplitude() {
        let f = field(120);
        assert_eq!(f.amplitude_at(50.0), 500.0);
        assert_eq!(f.amplitude_at(0.0), 500.0);
        assert_eq!(f.amplitude_at(-50.0), 15.0);

        for x in [-50.0f32, 50.0] {
            let expected = f.blended(x) * f.amplitude_at(x) + f.baseline();
            assert_eq!(f.height_at(x), expected);
        }
    }

    #[test]
    fn test_negative_side_stays_in_envelope() {
        // With truncation, t runs over (-1, 0] on the negative side and the
        // blend weight reaches 5, so |blended| < 1 + 5 * 3.
        let f = field(120);
        for i in 1..400 {
            let x = -(i as f32) * 25.0;
            let offset = (f.height_at(x) - f.baseline()).abs();
            assert!(offset <= 15.0 * 16.0, "x={x} offset={offset}");
        }
    }

    #[test]
    fn test_continuity() {
        let f = field(42);
        for i in -20..20 {
            let x = i as f32 * 123.0 + 0.5;
            let diff = (f.height_at(x) - f.height_at(x + 0.25)).abs();
            assert!(diff < 1.0, "Noise should be continuous at x={x}: diff = {diff}");
        }
    }

    #[test]
    fn test_column_hash_is_stable() {
        let seed = WorldSeed::new(120);
        assert_eq!(seed.column_hash(300), seed.column_hash(300));
        assert_ne!(seed.column_hash(300), seed.column_hash(330));
        assert_ne!(seed.column_hash(300), WorldSeed::new(121).column_hash(300));
        // Sign must matter.
        assert_ne!(seed.column_hash(30), seed.column_hash(-30));
    }
}
