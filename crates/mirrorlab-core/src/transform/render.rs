//! Full-buffer rendering: one sweep over the source, then optional grain.

use tracing::trace;

use crate::adjust::params::Adjustments;
use crate::grading::effects::{self, GrainNoise, NoiseSource};
use crate::image::PixelBuffer;
use crate::transform::evaluate::{PreparedAdjustments, evaluate_pixel};

/// Render `source` with `adjustments`, seeding grain from process entropy.
///
/// Pure apart from the grain draw: with `grain = 0` the output is a function
/// of the inputs alone.
pub fn render(source: &PixelBuffer, adjustments: &Adjustments) -> PixelBuffer {
    render_with_noise(source, adjustments, &GrainNoise::from_entropy())
}

/// Render with a caller-supplied grain source.
///
/// The noise source is consulted only when `grain > 0`.
pub fn render_with_noise<N: NoiseSource + ?Sized>(
    source: &PixelBuffer,
    adjustments: &Adjustments,
    noise: &N,
) -> PixelBuffer {
    let width = source.width();
    let height = source.height();
    let prepared = PreparedAdjustments::new(adjustments, width, height);

    trace!(
        width,
        height,
        needs_hsl = prepared.needs_hsl,
        vignette = prepared.vignette.is_some(),
        "rendering adjustment sweep"
    );

    let mut output = PixelBuffer::new(width, height);
    let row = width.max(1) as usize;

    for (index, (src, dst)) in source
        .pixels()
        .iter()
        .zip(output.pixels_mut().iter_mut())
        .enumerate()
    {
        let x = (index % row) as u32;
        let y = (index / row) as u32;
        let rgb = [src[0] as f32, src[1] as f32, src[2] as f32];
        let out = evaluate_pixel(rgb, x, y, &prepared);
        *dst = [to_byte(out[0]), to_byte(out[1]), to_byte(out[2]), src[3]];
    }

    effects::apply_grain(&mut output, prepared.adjustments.grain, noise);
    output
}

#[inline]
fn to_byte(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
