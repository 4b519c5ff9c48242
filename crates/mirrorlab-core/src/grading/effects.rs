//! Finishing effects — radial vignette and additive grain.
//!
//! The vignette is evaluated per pixel inside the main sweep. Grain runs as a
//! separate pass over the finished buffer and draws its randomness from a
//! [`NoiseSource`], sampled by pixel index so that any partition of the
//! buffer sees the same noise.

use std::hash::{BuildHasher, Hasher};

use glam::Vec2;

use crate::image::PixelBuffer;

/// Radial darkening toward the corners.
///
/// ```text
/// center   = (w/2, h/2)
/// max_dist = |center|
/// factor   = max(0, 1 − |p − center| / max_dist × amount/100)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vignette {
    center: Vec2,
    max_dist: f32,
    strength: f32,
}

impl Vignette {
    /// Build the vignette for a `width × height` buffer.
    ///
    /// Returns `None` when `amount <= 0`; non-positive amounts have no effect.
    pub fn new(width: u32, height: u32, amount: f32) -> Option<Self> {
        if amount <= 0.0 {
            return None;
        }
        let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        Some(Self {
            center,
            max_dist: center.length(),
            strength: amount / 100.0,
        })
    }

    /// Multiplier for the pixel at integer coordinates `(x, y)`.
    #[inline]
    pub fn factor_at(&self, x: u32, y: u32) -> f32 {
        if self.max_dist == 0.0 {
            return 1.0;
        }
        let dist = Vec2::new(x as f32, y as f32).distance(self.center) / self.max_dist;
        (1.0 - dist * self.strength).max(0.0)
    }

    #[inline]
    pub fn apply(&self, rgb: [f32; 3], x: u32, y: u32) -> [f32; 3] {
        let factor = self.factor_at(x, y);
        rgb.map(|c| c * factor)
    }
}

/// Supplies one uniform value in `[0, 1)` per pixel.
pub trait NoiseSource {
    /// Noise for the pixel at linear index `index`.
    fn sample(&self, index: usize) -> f32;
}

/// Stateless hashed noise (SplitMix64 finalizer over `seed` and pixel index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrainNoise {
    seed: u64,
}

impl GrainNoise {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the process's hasher randomness; differs between renders.
    pub fn from_entropy() -> Self {
        let seed = std::collections::hash_map::RandomState::new()
            .build_hasher()
            .finish();
        Self { seed }
    }
}

impl NoiseSource for GrainNoise {
    #[inline]
    fn sample(&self, index: usize) -> f32 {
        let mut z = self
            .seed
            .wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        // Top 24 bits → exact f32 in [0, 1).
        (z >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Add per-pixel noise uniform in `[-amount, amount]` to R, G, and B.
///
/// One draw per pixel is shared by its three color channels. Alpha is left
/// alone. `amount <= 0` returns without touching `noise`.
pub fn apply_grain<N: NoiseSource + ?Sized>(buffer: &mut PixelBuffer, amount: f32, noise: &N) {
    if amount <= 0.0 {
        return;
    }
    for (index, px) in buffer.pixels_mut().iter_mut().enumerate() {
        let offset = (noise.sample(index) - 0.5) * amount * 2.0;
        for c in &mut px[..3] {
            *c = (*c as f32 + offset).round().clamp(0.0, 255.0) as u8;
        }
    }
}
