//! Image decoding WASM bindings.
//!
//! Decodes PNG/JPEG uploads into the pipeline's RGB buffer. The editor can
//! also source pixels straight from a canvas `ImageData`, which is what
//! [`from_rgba`] strips down to RGB.

use crate::types::{err_to_js, JsPixelBuffer};
use grisaille_core::decode::decode_image as core_decode_image;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into an RGB pixel buffer.
///
/// # Arguments
///
/// * `bytes` - File contents as a `Uint8Array`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    let buffer = core_decode_image(bytes).map_err(err_to_js)?;
    Ok(JsPixelBuffer::from_buffer(buffer))
}

/// Build a pixel buffer from canvas RGBA data, dropping the alpha channel.
///
/// `ImageData.data` is RGBA; the pipeline works on RGB. The data length must
/// be `width * height * 4`.
#[wasm_bindgen]
pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    let expected = (width as usize) * (height as usize) * 4;
    if rgba.len() != expected {
        return Err(JsValue::from_str(&format!(
            "invalid RGBA data: expected {} bytes (width * height * 4), got {}",
            expected,
            rgba.len()
        )));
    }

    let mut pixels = Vec::with_capacity(expected / 4 * 3);
    for px in rgba.chunks_exact(4) {
        pixels.extend_from_slice(&px[..3]);
    }

    Ok(JsPixelBuffer::new(width, height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_strips_alpha() {
        let rgba = vec![10, 20, 30, 255, 40, 50, 60, 128];
        let image = from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(image.pixels(), vec![10, 20, 30, 40, 50, 60]);
    }

}
