//! Transform pipeline — per-pixel evaluation and full-buffer rendering.

pub mod evaluate;
pub mod render;
