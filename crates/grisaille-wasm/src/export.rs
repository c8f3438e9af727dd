//! Export pipeline WASM bindings.
//!
//! One-call bindings for the export panel: produce the downloadable artifact
//! and the live size estimate without shuttling the intermediate index
//! buffer through JavaScript.

use crate::quantize::PaletteConfig;
use crate::types::{err_to_js, JsPixelBuffer};
use grisaille_core::export;
use wasm_bindgen::prelude::*;

/// Quantize and encode an image into the export artifact.
///
/// # Arguments
///
/// * `image` - Source RGB buffer
/// * `config` - Palette configuration
/// * `tile_width` - Tile width in columns (the device format uses 320)
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = export_image(image, config, default_tile_width());
/// const blob = new Blob([bytes], { type: 'application/octet-stream' });
/// ```
#[wasm_bindgen]
pub fn export_image(
    image: &JsPixelBuffer,
    config: &PaletteConfig,
    tile_width: u32,
) -> Result<Vec<u8>, JsValue> {
    let buffer = image.to_buffer().map_err(err_to_js)?;
    export::export_image(&buffer, config.inner(), tile_width).map_err(err_to_js)
}

/// Estimate the artifact's byte count without materializing it.
///
/// Equals `export_image(..).length` for the same inputs; cheap enough to run
/// on every palette slider change.
#[wasm_bindgen]
pub fn estimate_size(
    image: &JsPixelBuffer,
    config: &PaletteConfig,
    tile_width: u32,
) -> Result<usize, JsValue> {
    let buffer = image.to_buffer().map_err(err_to_js)?;
    export::estimate_size(&buffer, config.inner(), tile_width).map_err(err_to_js)
}
