//! RLE codec WASM bindings.
//!
//! This module exposes the tiled run-length codec to JavaScript: encoding an
//! index buffer into the downloadable artifact, decoding an artifact back,
//! and the cheap size estimate the export panel shows live.

use crate::types::{err_to_js, JsIndexBuffer};
use grisaille_core::rle;
use wasm_bindgen::prelude::*;

/// Encode an index buffer into the flat RLE artifact.
///
/// # Arguments
///
/// * `indices` - Quantized index buffer
/// * `tile_width` - Tile width in columns (the device format uses 320)
///
/// # Returns
///
/// The artifact bytes as a `Uint8Array`. The caller must record the buffer's
/// dimensions and tile width separately; the format carries neither.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = encode_rle(indices, 320);
/// const blob = new Blob([bytes], { type: 'application/octet-stream' });
/// ```
#[wasm_bindgen]
pub fn encode_rle(indices: &JsIndexBuffer, tile_width: u32) -> Result<Vec<u8>, JsValue> {
    let buffer = indices.to_buffer().map_err(err_to_js)?;
    rle::encode(&buffer, tile_width).map_err(err_to_js)
}

/// Decode an RLE artifact back into an index buffer.
///
/// Decoding is strict: the stream must expand to exactly `width * height`
/// samples, runs may not cross tile boundaries, and trailing bytes are an
/// error.
///
/// # Arguments
///
/// * `bytes` - Artifact bytes
/// * `width` - Original buffer width in pixels
/// * `height` - Original buffer height in pixels
/// * `tile_width` - Tile width the artifact was encoded with
#[wasm_bindgen]
pub fn decode_rle(
    bytes: &[u8],
    width: u32,
    height: u32,
    tile_width: u32,
) -> Result<JsIndexBuffer, JsValue> {
    let buffer = rle::decode(bytes, width, height, tile_width).map_err(err_to_js)?;
    Ok(JsIndexBuffer::from_buffer(buffer))
}

/// Count the bytes `encode_rle` would produce, without producing them.
#[wasm_bindgen]
pub fn encoded_size(indices: &JsIndexBuffer, tile_width: u32) -> Result<usize, JsValue> {
    let buffer = indices.to_buffer().map_err(err_to_js)?;
    rle::encoded_len(&buffer, tile_width).map_err(err_to_js)
}

/// The tile width used by the device format.
#[wasm_bindgen]
pub fn default_tile_width() -> u32 {
    rle::DEFAULT_TILE_WIDTH
}
