//! Core transform evaluation — applies the full adjustment chain to a single pixel.

use crate::adjust::params::Adjustments;
use crate::grading::curves::CurveLut;
use crate::grading::effects::Vignette;
use crate::grading::hsl::SelectiveColor;
use crate::grading::sliders::{self, TonalRegions, WhiteBalance};

/// Everything the per-pixel chain needs, computed once per render.
#[derive(Debug, Clone)]
pub struct PreparedAdjustments {
    /// Sanitized snapshot the factors were derived from.
    pub adjustments: Adjustments,
    /// Curve tables as `[master, red, green, blue]`.
    pub luts: [CurveLut; 4],
    pub exposure_multiplier: f32,
    pub white_balance: WhiteBalance,
    pub clarity_factor: f32,
    pub tonal: TonalRegions,
    pub contrast_factor: f32,
    /// Whether the HSL stage runs at all.
    pub needs_hsl: bool,
    /// Present only when the vignette has an effect.
    pub vignette: Option<Vignette>,
}

impl PreparedAdjustments {
    /// Precompute factors and curve tables for a `width × height` render.
    ///
    /// Out-of-range sliders are clamped into their declared ranges first.
    pub fn new(adjustments: &Adjustments, width: u32, height: u32) -> Self {
        let adj = adjustments.sanitized();
        Self {
            luts: adj.curve.lookup_tables(),
            exposure_multiplier: sliders::exposure_multiplier(adj.exposure),
            white_balance: WhiteBalance::new(adj.temperature, adj.tint),
            clarity_factor: adj.clarity / 100.0,
            tonal: TonalRegions {
                highlights: adj.highlights,
                shadows: adj.shadows,
                whites: adj.whites,
                blacks: adj.blacks,
            },
            contrast_factor: sliders::contrast_factor(adj.contrast),
            needs_hsl: adj.needs_hsl(),
            vignette: Vignette::new(width, height, adj.vignette),
            adjustments: adj,
        }
    }

    fn selective_color(&self) -> SelectiveColor<'_> {
        SelectiveColor {
            saturation: self.adjustments.saturation,
            vibrance: self.adjustments.vibrance,
            bands: &self.adjustments.hsl,
        }
    }
}

/// The core function.
///
/// Applies the complete adjustment chain to a single byte-scale RGB pixel at
/// `(x, y)`:
/// 1. Exposure
/// 2. White balance
/// 3. Clarity
/// 4. Highlights / shadows / whites / blacks
/// 5. Contrast, then clamp to `[0, 255]`
/// 6. Master curve, then red/green/blue curves
/// 7. Saturation, vibrance, and hue-band offsets
/// 8. Vignette
///
/// The result is not clamped; the caller clamps while writing bytes.
pub fn evaluate_pixel(rgb: [f32; 3], x: u32, y: u32, prepared: &PreparedAdjustments) -> [f32; 3] {
    let mut rgb = sliders::apply_exposure(rgb, prepared.exposure_multiplier);
    rgb = prepared.white_balance.apply(rgb);
    rgb = sliders::apply_clarity(rgb, prepared.clarity_factor);
    rgb = prepared.tonal.apply(rgb);
    rgb = sliders::apply_contrast(rgb, prepared.contrast_factor);
    rgb = sliders::clamp_rgb(rgb);

    let [master, red, green, blue] = &prepared.luts;
    rgb = rgb.map(|c| master.map(c));
    rgb = [red.map(rgb[0]), green.map(rgb[1]), blue.map(rgb[2])];

    if prepared.needs_hsl {
        rgb = prepared.selective_color().apply(rgb);
    }

    if let Some(vignette) = &prepared.vignette {
        rgb = vignette.apply(rgb, x, y);
    }

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::curves::{CurveChannel, Point};

    fn prepare(adj: &Adjustments) -> PreparedAdjustments {
        PreparedAdjustments::new(adj, 4, 4)
    }

    #[test]
    fn test_default_prepares_identity_factors() {
        let p = prepare(&Adjustments::default());
        assert_eq!(p.exposure_multiplier, 1.0);
        assert_eq!(p.white_balance.gains, [1.0, 1.0, 1.0]);
        assert!((p.contrast_factor - 1.0).abs() < 1e-6);
        assert!(!p.needs_hsl);
        assert!(p.vignette.is_none());
    }

    #[test]
    fn test_identity_pixel_is_within_one_level() {
        let p = prepare(&Adjustments::default());
        for v in [0.0, 1.0, 64.0, 128.0, 200.0, 255.0] {
            let out = evaluate_pixel([v, v, v], 1, 1, &p);
            for c in out {
                assert!((c - v).abs() <= 1.0, "{v} -> {c}");
            }
        }
    }

    #[test]
    fn test_master_curve_applies_before_channel_curve() {
        // Master inverts; red inverts again → red is restored, green/blue inverted.
        let inverted = vec![Point::new(0.0, 1.0), Point::new(1.0, 0.0)];
        let adj = Adjustments {
            curve: Adjustments::default()
                .curve
                .with_channel(CurveChannel::Master, inverted.clone())
                .with_channel(CurveChannel::Red, inverted),
            ..Default::default()
        };
        let out = evaluate_pixel([255.0, 255.0, 255.0], 0, 0, &prepare(&adj));
        assert_eq!(out, [255.0, 0.0, 0.0]);
    }

    #[test]
    fn test_contrast_runs_before_clamp() {
        let adj = Adjustments {
            exposure: 2.0,
            contrast: -100.0,
            ..Default::default()
        };
        // 100 × 4 = 400 → contrast pulls toward 128 before the clamp.
        let out = evaluate_pixel([100.0, 100.0, 100.0], 0, 0, &prepare(&adj));
        let factor = sliders::contrast_factor(-100.0);
        let expected = (factor * (400.0 - 128.0) + 128.0).clamp(0.0, 255.0).floor();
        assert!((out[0] - expected).abs() <= 1.0);
    }

    #[test]
    fn test_out_of_range_contrast_is_clamped() {
        let adj = Adjustments {
            contrast: 259.0,
            ..Default::default()
        };
        let out = evaluate_pixel([10.0, 128.0, 250.0], 0, 0, &prepare(&adj));
        assert!(out.iter().all(|c| c.is_finite()));
    }
}
