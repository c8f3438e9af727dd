//! The export pipeline: pixels in, artifact bytes out.
//!
//! Composes the quantizer and the RLE codec into the two operations the
//! editor's export panel performs: producing the downloadable binary and
//! showing a live byte-count estimate while the user tweaks the palette.

use crate::buffer::PixelBuffer;
use crate::quantize::{quantize, PaletteConfig, QuantizeError};
use crate::rle::{self, EncodeError};
use thiserror::Error;

/// Errors raised by the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Quantization rejected the configuration or buffer.
    #[error(transparent)]
    Quantize(#[from] QuantizeError),

    /// Encoding rejected the tile width.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Quantize and RLE-encode an image into the export artifact.
///
/// The caller must record the buffer's dimensions and the tile width
/// separately; the artifact carries neither.
///
/// # Example
///
/// ```
/// use grisaille_core::buffer::PixelBuffer;
/// use grisaille_core::export::export_image;
/// use grisaille_core::quantize::PaletteConfig;
/// use grisaille_core::rle::DEFAULT_TILE_WIDTH;
///
/// let image = PixelBuffer::new(4, 1, vec![0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255]).unwrap();
/// let bytes = export_image(&image, &PaletteConfig::default(), DEFAULT_TILE_WIDTH).unwrap();
/// assert_eq!(bytes, vec![0x10, 0x1F]);
/// ```
pub fn export_image(
    buffer: &PixelBuffer,
    config: &PaletteConfig,
    tile_width: u32,
) -> Result<Vec<u8>, ExportError> {
    let indices = quantize(buffer, config)?;
    Ok(rle::encode(&indices, tile_width)?)
}

/// Estimate the artifact's byte count without materializing it.
///
/// Exactly equals `export_image(..).len()` for the same inputs; used for the
/// live size badge while the user adjusts levels and inversion.
pub fn estimate_size(
    buffer: &PixelBuffer,
    config: &PaletteConfig,
    tile_width: u32,
) -> Result<usize, ExportError> {
    let indices = quantize(buffer, config)?;
    Ok(rle::encoded_len(&indices, tile_width)?)
}
