//! Grading stages — tone curves, hue bands, sliders, HSL, and effects.

pub mod curve_edit;
pub mod curves;
pub mod effects;
pub mod hsl;
pub mod hue_bands;
pub mod sliders;
