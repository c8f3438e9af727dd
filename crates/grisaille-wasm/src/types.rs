//! WASM-compatible wrapper types for pipeline buffers.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Grisaille buffers, handling conversion between Rust and JavaScript data
//! representations.

use grisaille_core::buffer::{BufferError, IndexBuffer, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGB pixel buffer wrapper for JavaScript.
///
/// Pixel data lives in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`. The constructor does not validate; validation happens when
/// the buffer enters a core operation, so a length mismatch surfaces as a
/// descriptive error rather than a panic.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and RGB pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as a Uint8Array (copies out of WASM memory).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Wrap a core buffer coming out of a pipeline operation.
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Convert to a validated core buffer for a pipeline operation.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, BufferError> {
        PixelBuffer::new(self.width, self.height, self.pixels.clone())
    }
}

/// A 4-bit index buffer wrapper for JavaScript.
///
/// Holds the quantizer's output between quantization and encoding so the
/// indices don't round-trip through JavaScript typed arrays unnecessarily.
#[wasm_bindgen]
pub struct JsIndexBuffer {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

#[wasm_bindgen]
impl JsIndexBuffer {
    /// Create a new JsIndexBuffer from dimensions and nibble values.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, indices: Vec<u8>) -> JsIndexBuffer {
        JsIndexBuffer {
            width,
            height,
            indices,
        }
    }

    /// Get the buffer width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the buffer height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the palette indices as a Uint8Array, one nibble per byte.
    pub fn indices(&self) -> Vec<u8> {
        self.indices.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsIndexBuffer {
    /// Wrap a core index buffer coming out of the quantizer or decoder.
    pub(crate) fn from_buffer(buffer: IndexBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            indices: buffer.indices,
        }
    }

    /// Convert to a validated core buffer for the codec.
    pub(crate) fn to_buffer(&self) -> Result<IndexBuffer, BufferError> {
        IndexBuffer::new(self.width, self.height, self.indices.clone())
    }
}

/// Convert a core error into a JsValue error message.
pub(crate) fn err_to_js<E: std::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}
