//! Palette quantization WASM bindings.
//!
//! This module provides JavaScript bindings for the palette configuration
//! and the quantizer, so the editor's level slider and invert checkbox drive
//! the same code the export pipeline runs.

use crate::types::{err_to_js, JsIndexBuffer, JsPixelBuffer};
use grisaille_core::quantize::quantize as core_quantize;
use wasm_bindgen::prelude::*;

/// Palette configuration wrapper for JavaScript.
#[wasm_bindgen]
pub struct PaletteConfig {
    inner: grisaille_core::PaletteConfig,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PaletteConfig {
    /// Create a palette configuration with the defaults (16 levels, no invert)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: grisaille_core::PaletteConfig::default(),
        }
    }

    /// Get the number of grayscale levels
    #[wasm_bindgen(getter)]
    pub fn levels(&self) -> u8 {
        self.inner.levels
    }

    /// Set the number of grayscale levels (validated on use, 2-16)
    #[wasm_bindgen(setter)]
    pub fn set_levels(&mut self, value: u8) {
        self.inner.levels = value;
    }

    /// Get the invert flag
    #[wasm_bindgen(getter)]
    pub fn invert(&self) -> bool {
        self.inner.invert
    }

    /// Set the invert flag
    #[wasm_bindgen(setter)]
    pub fn set_invert(&mut self, value: bool) {
        self.inner.invert = value;
    }

    /// Serialize to a plain JavaScript object (for session persistence)
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(err_to_js)
    }

    /// Restore from a plain JavaScript object
    pub fn from_js(value: JsValue) -> Result<PaletteConfig, JsValue> {
        let inner = serde_wasm_bindgen::from_value(value).map_err(err_to_js)?;
        Ok(Self { inner })
    }
}

impl PaletteConfig {
    pub(crate) fn inner(&self) -> &grisaille_core::PaletteConfig {
        &self.inner
    }
}

/// Quantize an RGB buffer into 4-bit palette indices.
///
/// # Arguments
///
/// * `image` - Source RGB buffer
/// * `config` - Palette configuration (levels 2-16, invert)
///
/// # Returns
///
/// A `JsIndexBuffer` of nibbles, or an error if the configuration or buffer
/// is invalid.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const config = new PaletteConfig();
/// config.levels = 4;
/// const indices = quantize(image, config);
/// ```
#[wasm_bindgen]
pub fn quantize(image: &JsPixelBuffer, config: &PaletteConfig) -> Result<JsIndexBuffer, JsValue> {
    let buffer = image.to_buffer().map_err(err_to_js)?;
    let indices = core_quantize(&buffer, config.inner()).map_err(err_to_js)?;
    Ok(JsIndexBuffer::from_buffer(indices))
}


/// WASM-specific tests that require JsValue.
///
/// These exercise the error path of bindings returning `Result<_, JsValue>`,
/// which only works on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_quantize_invalid_levels_errors() {
        let image = JsPixelBuffer::new(1, 1, vec![0, 0, 0]);
        let mut config = PaletteConfig::new();
        config.set_levels(1);
        assert!(quantize(&image, &config).is_err());
    }

    #[wasm_bindgen_test]
    fn test_quantize_mismatched_buffer_errors() {
        let image = JsPixelBuffer::new(10, 10, vec![0u8; 6]);
        assert!(quantize(&image, &PaletteConfig::new()).is_err());
    }
}
