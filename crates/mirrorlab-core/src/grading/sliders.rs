//! Slider-based tone adjustments (exposure, white balance, clarity,
//! tonal regions, contrast).
//!
//! All stages work on RGB in byte scale (`0..=255` nominal) and may push
//! values outside that range; the pipeline clamps after contrast.

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Mid-gray pivot (byte scale) for clarity and contrast.
const PIVOT: f32 = 128.0;

/// Normalized Rec. 709 luminance of a byte-scale pixel. Not clamped.
#[inline]
pub fn luminance(rgb: [f32; 3]) -> f32 {
    (LUMA_REC709[0] * rgb[0] + LUMA_REC709[1] * rgb[1] + LUMA_REC709[2] * rgb[2]) / 255.0
}

/// Linear gain for an exposure in stops: `2^stops`.
pub fn exposure_multiplier(stops: f32) -> f32 {
    2.0_f32.powf(stops)
}

/// Scale every channel by `multiplier`.
#[inline]
pub fn apply_exposure(rgb: [f32; 3], multiplier: f32) -> [f32; 3] {
    rgb.map(|c| c * multiplier)
}

/// Per-channel white balance gains.
///
/// ```text
/// r = 1 + temperature/100
/// g = 1 + tint/100
/// b = 1 − temperature/100
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteBalance {
    pub gains: [f32; 3],
}

impl WhiteBalance {
    pub fn new(temperature: f32, tint: f32) -> Self {
        Self {
            gains: [
                1.0 + temperature / 100.0,
                1.0 + tint / 100.0,
                1.0 - temperature / 100.0,
            ],
        }
    }

    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        [
            rgb[0] * self.gains[0],
            rgb[1] * self.gains[1],
            rgb[2] * self.gains[2],
        ]
    }
}

/// Midtone contrast approximation without spatial analysis.
///
/// Pixels near mid luminance get the strongest push away from the pivot:
///
/// ```text
/// weight = 1 − |l − 0.5| × 2
/// boost  = 1 + factor × weight × 0.5
/// out    = (in − 128) × boost + 128
/// ```
///
/// `factor = 0.0` is identity.
pub fn apply_clarity(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    if factor == 0.0 {
        return rgb;
    }
    let l = luminance(rgb);
    let weight = 1.0 - (l - 0.5).abs() * 2.0;
    let boost = 1.0 + factor * weight * 0.5;
    rgb.map(|c| (c - PIVOT) * boost + PIVOT)
}

/// Highlights/shadows/whites/blacks region weighting, in percent.
///
/// Weights come from the normalized luminance `l` of the incoming pixel:
///
/// ```text
/// highlights: × (1 + h/100 × max(0, l)²)
/// shadows:    × (1 + s/100 × max(0, 1 − l)²)
/// whites:     + w/100 × max(0, l)⁴ × 255
/// blacks:     + b/100 × max(0, 1 − l)⁴ × 255
/// ```
///
/// Stages whose slider is zero are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TonalRegions {
    pub highlights: f32,
    pub shadows: f32,
    pub whites: f32,
    pub blacks: f32,
}

impl TonalRegions {
    pub fn is_identity(&self) -> bool {
        self.highlights == 0.0 && self.shadows == 0.0 && self.whites == 0.0 && self.blacks == 0.0
    }

    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return rgb;
        }

        let lum = luminance(rgb);
        let bright = lum.max(0.0);
        let dark = (1.0 - lum).max(0.0);
        let mut out = rgb;

        if self.highlights != 0.0 {
            let factor = 1.0 + (self.highlights / 100.0) * bright.powi(2);
            out = out.map(|c| c * factor);
        }
        if self.shadows != 0.0 {
            let factor = 1.0 + (self.shadows / 100.0) * dark.powi(2);
            out = out.map(|c| c * factor);
        }
        if self.whites != 0.0 {
            let lift = (self.whites / 100.0) * bright.powi(4) * 255.0;
            out = out.map(|c| c + lift);
        }
        if self.blacks != 0.0 {
            let lift = (self.blacks / 100.0) * dark.powi(4) * 255.0;
            out = out.map(|c| c + lift);
        }
        out
    }
}

/// Contrast factor for a slider value in `[-100, 100]`.
///
/// ```text
/// factor = 259 × (c + 255) / (255 × (259 − c))
/// ```
///
/// The slider is clamped first, so the pole at `c = 259` is unreachable.
pub fn contrast_factor(contrast: f32) -> f32 {
    let c = contrast.clamp(-100.0, 100.0);
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Scale each channel's distance from the pivot by `factor`.
#[inline]
pub fn apply_contrast(rgb: [f32; 3], factor: f32) -> [f32; 3] {
    rgb.map(|c| factor * (c - PIVOT) + PIVOT)
}

/// Clamp every channel into `[0, 255]`.
#[inline]
pub fn clamp_rgb(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|c| c.clamp(0.0, 255.0))
}
