//! Decoding uploaded images into the pipeline's pixel buffer.
//!
//! The editor accepts PNG and JPEG uploads; everything downstream works on
//! a plain RGB [`PixelBuffer`], so decoding is the only place the `image`
//! crate's formats appear. Alpha is discarded since the export format has no
//! transparency and the quantizer only reads the color channels.

use crate::buffer::PixelBuffer;
use thiserror::Error;

/// Errors raised while decoding an uploaded image.
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    /// The bytes are not a recognizable PNG or JPEG.
    #[error("invalid or unsupported image format: {0}")]
    InvalidFormat(String),

    /// The image decoded to zero pixels.
    #[error("image has no pixels")]
    EmptyImage,
}

/// Decode PNG or JPEG bytes into a [`PixelBuffer`].
///
/// # Errors
///
/// Returns [`ImageDecodeError::InvalidFormat`] when the bytes can't be
/// decoded, and [`ImageDecodeError::EmptyImage`] for a degenerate zero-sized
/// image.
///
/// # Example
///
/// ```ignore
/// use grisaille_core::decode::decode_image;
///
/// let bytes = std::fs::read("photo.png").unwrap();
/// let buffer = decode_image(&bytes).unwrap();
/// println!("decoded {}x{}", buffer.width, buffer.height);
/// ```
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, ImageDecodeError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ImageDecodeError::InvalidFormat(e.to_string()))?;

    let rgb = img.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(ImageDecodeError::EmptyImage);
    }

    Ok(PixelBuffer::from_rgb_image(rgb))
}
