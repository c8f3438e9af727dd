//! Grisaille Core - grayscale export pipeline
//!
//! This crate provides the algorithmic core of the Grisaille editor: palette
//! quantization of RGB buffers into 4-bit grayscale indices, the tiled
//! run-length codec that turns those indices into the device's flat binary
//! artifact, and the rotation geometry used to auto-crop free-angle
//! rotations.
//!
//! Everything here is a pure function over value types: no canvas, no
//! ambient palette state. The browser-facing surface lives in the companion
//! `grisaille-wasm` crate.

pub mod buffer;
pub mod decode;
pub mod export;
pub mod history;
pub mod palette;
pub mod quantize;
pub mod rle;
pub mod transform;

pub use buffer::{BufferError, IndexBuffer, PixelBuffer};
pub use export::{estimate_size, export_image, ExportError};
pub use quantize::{quantize, PaletteConfig, QuantizeError};
pub use rle::DEFAULT_TILE_WIDTH;
pub use transform::{inscribed_rect, rotate_and_crop, rotated_bounds};

#[cfg(test)]
mod tests {
    use super::*;

    /// The full editor flow: decode nothing (synthetic buffer), rotate with
    /// auto-crop, quantize, encode, and decode the artifact back.
    #[test]
    fn test_pipeline_end_to_end() {
        let image = PixelBuffer::new(64, 48, {
            let mut pixels = Vec::with_capacity(64 * 48 * 3);
            for y in 0..48u32 {
                for x in 0..64u32 {
                    let v = ((x * 4 + y * 2) % 256) as u8;
                    pixels.extend_from_slice(&[v, v, v]);
                }
            }
            pixels
        })
        .unwrap();

        let rotated = rotate_and_crop(&image, 15.0);
        let (iw, ih) = inscribed_rect(64, 48, 15.0);
        assert_eq!((rotated.width, rotated.height), (iw, ih));

        let config = PaletteConfig::new(8, false);
        let artifact = export_image(&rotated, &config, DEFAULT_TILE_WIDTH).unwrap();
        assert_eq!(
            artifact.len(),
            estimate_size(&rotated, &config, DEFAULT_TILE_WIDTH).unwrap()
        );

        let decoded = rle::decode(&artifact, rotated.width, rotated.height, DEFAULT_TILE_WIDTH)
            .unwrap();
        assert_eq!(decoded, quantize(&rotated, &config).unwrap());
    }
}
