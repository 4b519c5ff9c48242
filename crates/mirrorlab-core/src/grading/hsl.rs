//! Saturation, vibrance, and hue-banded selective color.
//!
//! The stage round-trips through HSL:
//!
//! ```text
//!   RGB ──→ HSL ──→ s += sat ──→ s += vib×(1−s) ──→ +band(h) ──→ clamp/wrap ──→ RGB
//! ```
//!
//! Hue is handled in turns (`[0, 1)`) internally and in degrees only for
//! band classification.

use crate::adjust::params::HslParams;
use crate::grading::hue_bands;

/// Convert byte-scale RGB to HSL with all components in `[0, 1]`.
///
/// Hue is in turns (multiply by 360 for degrees).
pub fn rgb_to_hsl(rgb: [f32; 3]) -> (f32, f32, f32) {
    let r = rgb[0] / 255.0;
    let g = rgb[1] / 255.0;
    let b = rgb[2] / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert HSL (all in `[0, 1]`, hue in turns) to byte-scale RGB, rounded to
/// whole levels.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let rgb = if s == 0.0 {
        [l, l, l]
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        [
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        ]
    };
    rgb.map(|c| (c * 255.0).round())
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Global saturation/vibrance plus per-band offsets, in slider units.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectiveColor<'a> {
    /// Global saturation offset in percent.
    pub saturation: f32,
    /// Vibrance in percent.
    pub vibrance: f32,
    /// Per-band offsets.
    pub bands: &'a HslParams,
}

impl SelectiveColor<'_> {
    /// Apply the stage to one byte-scale pixel.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let (mut h, mut s, mut l) = rgb_to_hsl(rgb);

        s += self.saturation / 100.0;
        if self.vibrance != 0.0 {
            s += (self.vibrance / 100.0) * (1.0 - s);
        }

        let band = self.bands.band(hue_bands::classify(h * 360.0));
        h += band.hue / 360.0;
        s += band.saturation / 100.0;
        l += band.luminance / 100.0;

        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let h = h.rem_euclid(1.0);

        hsl_to_rgb(h, s, l)
    }
}
