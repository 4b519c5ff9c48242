//! MirrorLab Core — domain layer for non-destructive image adjustment.
//!
//! This crate contains the tone/color pipeline, the tone-curve model,
//! hue-band classification, and the preset record. No async runtime,
//! filesystem, or UI dependencies.

pub mod adjust;
pub mod error;
pub mod grading;
pub mod image;
pub mod presets;
pub mod transform;

// Re-exports for convenience.
pub use adjust::edit::{AdjustmentEdit, ScalarField};
pub use adjust::params::{Adjustments, ColorGradingParams, HslBand, HslBandParams, HslParams};
pub use error::CoreError;
pub use grading::curves::{CurveChannel, CurveLut, CurveState, Point};
pub use image::PixelBuffer;
pub use presets::Preset;
pub use transform::render::{render, render_with_noise};
