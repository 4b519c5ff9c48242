//! Closed set of edits a collaborator can make to an adjustment snapshot.
//!
//! Every edit kind is a variant of [`AdjustmentEdit`]; applying one is an
//! exhaustive match, so adding a variant without handling it fails to build.

use serde::{Deserialize, Serialize};

use crate::adjust::params::{Adjustments, ColorGradingRegion, HslBand, HslBandParams};
use crate::grading::curves::{CurveChannel, CurveState, Point};

/// Names one scalar slider of [`Adjustments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarField {
    Exposure,
    Contrast,
    Highlights,
    Shadows,
    Whites,
    Blacks,
    Temperature,
    Tint,
    Vibrance,
    Saturation,
    Clarity,
    Vignette,
    Grain,
}

impl ScalarField {
    pub const ALL: [Self; 13] = [
        Self::Exposure,
        Self::Contrast,
        Self::Highlights,
        Self::Shadows,
        Self::Whites,
        Self::Blacks,
        Self::Temperature,
        Self::Tint,
        Self::Vibrance,
        Self::Saturation,
        Self::Clarity,
        Self::Vignette,
        Self::Grain,
    ];

    /// Declared `(min, max)` for the slider.
    pub const fn range(&self) -> (f32, f32) {
        match self {
            Self::Exposure => (-4.0, 4.0),
            Self::Vignette | Self::Grain => (0.0, 100.0),
            Self::Contrast
            | Self::Highlights
            | Self::Shadows
            | Self::Whites
            | Self::Blacks
            | Self::Temperature
            | Self::Tint
            | Self::Vibrance
            | Self::Saturation
            | Self::Clarity => (-100.0, 100.0),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exposure => "Exposure",
            Self::Contrast => "Contrast",
            Self::Highlights => "Highlights",
            Self::Shadows => "Shadows",
            Self::Whites => "Whites",
            Self::Blacks => "Blacks",
            Self::Temperature => "Temperature",
            Self::Tint => "Tint",
            Self::Vibrance => "Vibrance",
            Self::Saturation => "Saturation",
            Self::Clarity => "Clarity",
            Self::Vignette => "Vignette",
            Self::Grain => "Grain",
        }
    }
}

/// One component of a hue band's offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslComponent {
    Hue,
    Saturation,
    Luminance,
}

/// A single user edit. Applying it yields a new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AdjustmentEdit {
    /// Set one slider. The value is clamped into the slider's range.
    Scalar { field: ScalarField, value: f32 },
    /// Replace all offsets of one hue band.
    Hsl { band: HslBand, params: HslBandParams },
    /// Set one offset of one hue band.
    HslComponent {
        band: HslBand,
        component: HslComponent,
        value: f32,
    },
    /// Set a color-grading region. `None` keeps the current value.
    ColorGrading {
        region: ColorGradingRegion,
        hue: Option<f32>,
        saturation: Option<f32>,
    },
    /// Replace one curve channel's points (re-sorted by x).
    Curve {
        channel: CurveChannel,
        points: Vec<Point>,
    },
    /// Replace every curve channel.
    Curves(CurveState),
    /// Replace the whole snapshot with a preset's.
    ApplyPreset(Adjustments),
    /// Back to identity.
    Reset,
}

impl AdjustmentEdit {
    /// Produce the snapshot that results from applying this edit to `current`.
    pub fn apply(&self, current: &Adjustments) -> Adjustments {
        match self {
            Self::Scalar { field, value } => {
                let mut next = current.clone();
                let (min, max) = field.range();
                *next.scalar_mut(*field) = value.clamp(min, max);
                next
            }
            Self::Hsl { band, params } => {
                let mut next = current.clone();
                *next.hsl.band_mut(*band) = *params;
                next
            }
            Self::HslComponent {
                band,
                component,
                value,
            } => {
                let mut next = current.clone();
                let target = next.hsl.band_mut(*band);
                match component {
                    HslComponent::Hue => target.hue = *value,
                    HslComponent::Saturation => target.saturation = *value,
                    HslComponent::Luminance => target.luminance = *value,
                }
                next
            }
            Self::ColorGrading {
                region,
                hue,
                saturation,
            } => {
                let mut next = current.clone();
                let tone = next.color_grading.region_mut(*region);
                if let Some(hue) = hue {
                    tone.hue = *hue;
                }
                if let Some(saturation) = saturation {
                    tone.saturation = *saturation;
                }
                next
            }
            Self::Curve { channel, points } => Adjustments {
                curve: current.curve.with_channel(*channel, points.clone()),
                ..current.clone()
            },
            Self::Curves(curve) => Adjustments {
                curve: curve.clone().sorted(),
                ..current.clone()
            },
            Self::ApplyPreset(adjustments) => Adjustments {
                curve: adjustments.curve.clone().sorted(),
                ..adjustments.clone()
            },
            Self::Reset => Adjustments::default(),
        }
    }
}
