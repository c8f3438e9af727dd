//! Grisaille WASM - WebAssembly bindings for the Grisaille export pipeline
//!
//! This crate exposes the grisaille-core functionality to the browser-based
//! editor: image decoding, palette quantization, the RLE export codec, and
//! the rotation geometry behind the rotate dialog.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for pixel and index buffers
//! - `decode` - PNG/JPEG decoding and canvas RGBA ingestion
//! - `quantize` - Palette configuration and quantization
//! - `codec` - RLE encode/decode and size accounting
//! - `transform` - Rotation bounds, inscribed rectangle, rotate-and-crop
//! - `export` - One-call quantize-and-encode for the download button
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, quantize, PaletteConfig } from '@grisaille/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const indices = quantize(image, new PaletteConfig());
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod decode;
mod export;
mod quantize;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_rle, default_tile_width, encode_rle, encoded_size};
pub use decode::{decode_image, from_rgba};
pub use export::{estimate_size, export_image};
pub use quantize::{quantize, PaletteConfig};
pub use transform::{inscribed_rect, rotate_and_crop, rotated_bounds};
pub use types::{JsIndexBuffer, JsPixelBuffer};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}


/// WASM-specific smoke tests that require a browser environment.
///
/// These run with `wasm-pack test`; the bulk of the behavior is covered by
/// the per-module tests and by grisaille-core.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_full_pipeline() {
        let image = JsPixelBuffer::new(4, 1, vec![255u8; 12]);
        let config = PaletteConfig::new();
        let indices = quantize(&image, &config).unwrap();
        let bytes = encode_rle(&indices, default_tile_width()).unwrap();
        assert_eq!(bytes, vec![0x3F]);
    }

    #[wasm_bindgen_test]
    fn test_geometry_bindings() {
        assert_eq!(rotated_bounds(100, 50, 90.0), vec![50, 100]);
        assert_eq!(inscribed_rect(100, 100, 45.0), vec![70, 70]);
    }
}
