//! Hue band classification for selective-color adjustment.
//!
//! The hue circle is split into eight fixed, half-open bands. Red straddles
//! the 0°/360° seam:
//!
//! ```text
//!   red      [330, 360) ∪ [0, 15)
//!   orange   [15, 45)
//!   yellow   [45, 75)
//!   green    [75, 155)
//!   aqua     [155, 185)
//!   blue     [185, 255)
//!   purple   [255, 285)
//!   magenta  [285, 330)
//! ```

use serde::{Deserialize, Serialize};

/// One of the eight selective-color hue bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HslBand {
    Red,
    Orange,
    Yellow,
    Green,
    Aqua,
    Blue,
    Purple,
    Magenta,
}

impl HslBand {
    pub const ALL: [Self; 8] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Aqua,
        Self::Blue,
        Self::Purple,
        Self::Magenta,
    ];

    /// Human-readable label for UI lists.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Aqua => "Aqua",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Magenta => "Magenta",
        }
    }
}

/// Classify a hue angle in degrees. Angles outside `[0, 360)` are wrapped.
pub fn classify(hue_degrees: f32) -> HslBand {
    let hue = hue_degrees.rem_euclid(360.0);
    match hue {
        h if h >= 330.0 || h < 15.0 => HslBand::Red,
        h if h < 45.0 => HslBand::Orange,
        h if h < 75.0 => HslBand::Yellow,
        h if h < 155.0 => HslBand::Green,
        h if h < 185.0 => HslBand::Aqua,
        h if h < 255.0 => HslBand::Blue,
        h if h < 285.0 => HslBand::Purple,
        _ => HslBand::Magenta,
    }
}
