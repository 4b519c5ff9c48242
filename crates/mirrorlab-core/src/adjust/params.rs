//! Central parameter snapshot that defines the entire adjustment.
//!
//! `Adjustments` is the single source of truth for an edit. Every edit
//! produces a new snapshot; the pipeline only ever reads one.

use serde::{Deserialize, Serialize};

use crate::adjust::edit::ScalarField;
pub use crate::grading::hue_bands::HslBand;
use crate::grading::curves::CurveState;

/// Hue/saturation/luminance offsets for one hue band.
///
/// `hue` is in degrees, `saturation` and `luminance` in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HslBandParams {
    pub hue: f32,
    pub saturation: f32,
    pub luminance: f32,
}

impl HslBandParams {
    pub fn is_zero(&self) -> bool {
        self.hue == 0.0 && self.saturation == 0.0 && self.luminance == 0.0
    }
}

/// Selective-color offsets for all eight hue bands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HslParams {
    pub red: HslBandParams,
    pub orange: HslBandParams,
    pub yellow: HslBandParams,
    pub green: HslBandParams,
    pub aqua: HslBandParams,
    pub blue: HslBandParams,
    pub purple: HslBandParams,
    pub magenta: HslBandParams,
}

impl HslParams {
    pub fn band(&self, band: HslBand) -> &HslBandParams {
        match band {
            HslBand::Red => &self.red,
            HslBand::Orange => &self.orange,
            HslBand::Yellow => &self.yellow,
            HslBand::Green => &self.green,
            HslBand::Aqua => &self.aqua,
            HslBand::Blue => &self.blue,
            HslBand::Purple => &self.purple,
            HslBand::Magenta => &self.magenta,
        }
    }

    pub fn band_mut(&mut self, band: HslBand) -> &mut HslBandParams {
        match band {
            HslBand::Red => &mut self.red,
            HslBand::Orange => &mut self.orange,
            HslBand::Yellow => &mut self.yellow,
            HslBand::Green => &mut self.green,
            HslBand::Aqua => &mut self.aqua,
            HslBand::Blue => &mut self.blue,
            HslBand::Purple => &mut self.purple,
            HslBand::Magenta => &mut self.magenta,
        }
    }

    /// True when every band is all zeros.
    pub fn is_zero(&self) -> bool {
        HslBand::ALL.iter().all(|&b| self.band(b).is_zero())
    }
}

/// Identifies a color-grading tonal region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGradingRegion {
    Shadows,
    Highlights,
}

/// Hue/saturation offset for one color-grading region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorGradingTone {
    pub hue: f32,
    pub saturation: f32,
}

/// Split-toning style offsets for shadows and highlights.
///
/// Stored, edited, and persisted with the snapshot. The pixel pipeline does
/// not read these yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorGradingParams {
    pub shadows: ColorGradingTone,
    pub highlights: ColorGradingTone,
}

impl ColorGradingParams {
    pub fn region(&self, region: ColorGradingRegion) -> &ColorGradingTone {
        match region {
            ColorGradingRegion::Shadows => &self.shadows,
            ColorGradingRegion::Highlights => &self.highlights,
        }
    }

    pub fn region_mut(&mut self, region: ColorGradingRegion) -> &mut ColorGradingTone {
        match region {
            ColorGradingRegion::Shadows => &mut self.shadows,
            ColorGradingRegion::Highlights => &mut self.highlights,
        }
    }
}

/// Every edit writes here. The render sweep reads the full struct.
///
/// Missing fields deserialize to their identity value, so presets written
/// before a field existed still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Adjustments {
    /// Exposure in stops, `[-4, 4]`. 0.0 = neutral.
    pub exposure: f32,
    /// Contrast, `[-100, 100]`.
    pub contrast: f32,
    /// Highlight gain, `[-100, 100]`.
    pub highlights: f32,
    /// Shadow gain, `[-100, 100]`.
    pub shadows: f32,
    /// White point lift, `[-100, 100]`.
    pub whites: f32,
    /// Black point lift, `[-100, 100]`.
    pub blacks: f32,
    /// Warm/cool balance, `[-100, 100]`.
    pub temperature: f32,
    /// Green/magenta balance, `[-100, 100]`.
    pub tint: f32,
    /// Saturation boost weighted toward muted pixels, `[-100, 100]`.
    pub vibrance: f32,
    /// Global saturation offset, `[-100, 100]`.
    pub saturation: f32,
    /// Midtone contrast, `[-100, 100]`.
    pub clarity: f32,
    /// Radial darkening, `[0, 100]`.
    pub vignette: f32,
    /// Additive luminance noise, `[0, 100]`.
    pub grain: f32,
    /// Selective-color offsets per hue band.
    pub hsl: HslParams,
    /// Split-toning offsets (not rendered).
    pub color_grading: ColorGradingParams,
    /// Tone curve control points.
    pub curve: CurveState,
}

impl Default for Adjustments {
    /// Produces an identity (no-op) adjustment — image passes through unchanged.
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            temperature: 0.0,
            tint: 0.0,
            vibrance: 0.0,
            saturation: 0.0,
            clarity: 0.0,
            vignette: 0.0,
            grain: 0.0,
            hsl: HslParams::default(),
            color_grading: ColorGradingParams::default(),
            curve: CurveState::default(),
        }
    }
}

impl Adjustments {
    pub fn scalar(&self, field: ScalarField) -> f32 {
        match field {
            ScalarField::Exposure => self.exposure,
            ScalarField::Contrast => self.contrast,
            ScalarField::Highlights => self.highlights,
            ScalarField::Shadows => self.shadows,
            ScalarField::Whites => self.whites,
            ScalarField::Blacks => self.blacks,
            ScalarField::Temperature => self.temperature,
            ScalarField::Tint => self.tint,
            ScalarField::Vibrance => self.vibrance,
            ScalarField::Saturation => self.saturation,
            ScalarField::Clarity => self.clarity,
            ScalarField::Vignette => self.vignette,
            ScalarField::Grain => self.grain,
        }
    }

    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut f32 {
        match field {
            ScalarField::Exposure => &mut self.exposure,
            ScalarField::Contrast => &mut self.contrast,
            ScalarField::Highlights => &mut self.highlights,
            ScalarField::Shadows => &mut self.shadows,
            ScalarField::Whites => &mut self.whites,
            ScalarField::Blacks => &mut self.blacks,
            ScalarField::Temperature => &mut self.temperature,
            ScalarField::Tint => &mut self.tint,
            ScalarField::Vibrance => &mut self.vibrance,
            ScalarField::Saturation => &mut self.saturation,
            ScalarField::Clarity => &mut self.clarity,
            ScalarField::Vignette => &mut self.vignette,
            ScalarField::Grain => &mut self.grain,
        }
    }

    /// A copy with every scalar clamped into its declared range.
    ///
    /// Band offsets and curve points are left as-is; the stages that read
    /// them clamp their own results.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for field in ScalarField::ALL {
            let (min, max) = field.range();
            let value = out.scalar_mut(field);
            *value = value.clamp(min, max);
        }
        out
    }

    /// Whether the saturation/vibrance/selective-color stage has any work.
    pub fn needs_hsl(&self) -> bool {
        self.saturation != 0.0 || self.vibrance != 0.0 || !self.hsl.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_needs_no_hsl_stage() {
        assert!(!Adjustments::default().needs_hsl());
    }

    #[test]
    fn test_single_band_offset_enables_hsl_stage() {
        let mut adj = Adjustments::default();
        adj.hsl.band_mut(HslBand::Aqua).luminance = -5.0;
        assert!(adj.needs_hsl());
    }

    #[test]
    fn test_sanitized_clamps_every_scalar() {
        let adj = Adjustments {
            exposure: 9.0,
            contrast: 259.0,
            vignette: -20.0,
            grain: 150.0,
            ..Default::default()
        };
        let clean = adj.sanitized();
        assert_eq!(clean.exposure, 4.0);
        assert_eq!(clean.contrast, 100.0);
        assert_eq!(clean.vignette, 0.0);
        assert_eq!(clean.grain, 100.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Adjustments::default()).unwrap();
        assert!(json.get("colorGrading").is_some());
        assert!(json["hsl"].get("magenta").is_some());
        assert!(json["curve"].get("master").is_some());
    }

    #[test]
    fn test_missing_fields_default_to_identity() {
        let adj: Adjustments = serde_json::from_str(r#"{"contrast": 10}"#).unwrap();
        assert_eq!(adj.contrast, 10.0);
        assert_eq!(adj.curve, CurveState::default());
        assert_eq!(adj.color_grading, ColorGradingParams::default());
    }
}
