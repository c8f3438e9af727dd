//! Core buffer types for the export pipeline.
//!
//! Two value types flow through the pipeline: [`PixelBuffer`] holds the RGB
//! samples the editor produces, and [`IndexBuffer`] holds the 4-bit palette
//! indices the quantizer derives from them. Both are plain row-major buffers
//! with validating constructors, so downstream stages can rely on their
//! length and range invariants instead of re-checking them.

use thiserror::Error;

/// Errors raised when constructing or restoring a buffer.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match `width * height * 3`.
    #[error("invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    PixelLengthMismatch { expected: usize, actual: usize },

    /// Index data length doesn't match `width * height`.
    #[error("invalid index data: expected {expected} samples (width * height), got {actual}")]
    IndexLengthMismatch { expected: usize, actual: usize },

    /// An index value doesn't fit in a nibble.
    #[error("index value {value} at sample {position} exceeds the 4-bit range (0-15)")]
    IndexOutOfRange { position: usize, value: u8 },
}

/// An RGB image with 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer, validating dimensions and data length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::EmptyDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(BufferError::PixelLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a PixelBuffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an `image::RgbImage` for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the RGB sample at the given coordinates.
    ///
    /// Coordinates must be within bounds; this indexes the raw buffer.
    #[inline]
    pub fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * self.width + x) * 3) as usize;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

/// A buffer of 4-bit palette indices, one per pixel.
///
/// Produced by quantization and consumed by the RLE codec. Every value is a
/// nibble (0-15); the constructor enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Palette indices in row-major order, one nibble per byte.
    /// Length is width * height.
    pub indices: Vec<u8>,
}

impl IndexBuffer {
    /// Create a new IndexBuffer, validating dimensions, length, and range.
    pub fn new(width: u32, height: u32, indices: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::EmptyDimensions { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if indices.len() != expected {
            return Err(BufferError::IndexLengthMismatch {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(position) = indices.iter().position(|&v| v > 0x0F) {
            return Err(BufferError::IndexOutOfRange {
                position,
                value: indices[position],
            });
        }
        Ok(Self {
            width,
            height,
            indices,
        })
    }

    /// Get the index at the given coordinates.
    ///
    /// Coordinates must be within bounds; this indexes the raw buffer.
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y * self.width + x) as usize]
    }

    /// Get the total number of samples.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}
