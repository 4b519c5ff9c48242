//! Pixel buffer representation for the adjustment pipeline.
//!
//! Buffers are RGBA 8-bit, unpremultiplied alpha, row-major. The byte length
//! is always `width × height × 4`; constructors reject anything else.

use crate::error::{CoreError, Result};

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// An RGBA8 image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Create a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let data = rgba.repeat(count);
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap interleaved RGBA bytes.
    ///
    /// Fails when `data.len()` does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.data.len() / CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Pixels as `[R, G, B, A]` quads.
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.data)
    }

    /// Mutable pixels as `[R, G, B, A]` quads.
    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(&mut self.data)
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels().get(idx).copied()
    }

    /// Whether both buffers have the same width and height.
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl From<&image::DynamicImage> for PixelBuffer {
    fn from(img: &image::DynamicImage) -> Self {
        Self::from(img.to_rgba8())
    }
}

impl TryFrom<PixelBuffer> for image::RgbaImage {
    type Error = CoreError;

    fn try_from(buffer: PixelBuffer) -> Result<Self> {
        let (width, height) = (buffer.width, buffer.height);
        let actual = buffer.data.len();
        image::RgbaImage::from_raw(width, height, buffer.data).ok_or(CoreError::BufferSize {
            width,
            height,
            expected: byte_len(width, height),
            actual,
        })
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
