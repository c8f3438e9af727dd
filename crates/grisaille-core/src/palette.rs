//! The 16-entry grayscale palette and preview mapping.
//!
//! The target device renders each nibble through a fixed RGB565 grayscale
//! ramp; the editor's preview pane shows the same quantization by mapping
//! each nibble back to an 8-bit gray. Both mappings live here so the preview
//! and the device agree on what an index looks like.

use crate::buffer::{IndexBuffer, PixelBuffer};

/// The device's 16-entry grayscale ramp in RGB565, index 0 = black.
pub const GRAYSCALE_RGB565: [u16; 16] = [
    0x0000, 0x1082, 0x2104, 0x3186, 0x4228, 0x52AA, 0x632C, 0x73AE, 0x8C51, 0x9CD3, 0xAD55,
    0xBDD7, 0xCE79, 0xDE7B, 0xEF7D, 0xFFFF,
];

/// Look up the RGB565 color the device displays for a nibble.
///
/// Only the low 4 bits of `nibble` are used.
#[inline]
pub fn nibble_to_rgb565(nibble: u8) -> u16 {
    GRAYSCALE_RGB565[(nibble & 0x0F) as usize]
}

/// Map a nibble to the 8-bit gray the preview pane displays.
///
/// `round(nibble / 15 * 255)`, so 0 maps to black and 15 to white.
#[inline]
pub fn nibble_to_gray(nibble: u8) -> u8 {
    ((nibble & 0x0F) as f64 / 15.0 * 255.0).round() as u8
}

/// Render an index buffer as a grayscale RGB preview.
///
/// Each nibble becomes one gray pixel via [`nibble_to_gray`]. This is the
/// image the editor shows next to the original, and what the artifact will
/// look like on the device (modulo RGB565 truncation).
pub fn render_preview(indices: &IndexBuffer) -> PixelBuffer {
    let mut pixels = Vec::with_capacity(indices.indices.len() * 3);
    for &nibble in &indices.indices {
        let gray = nibble_to_gray(nibble);
        pixels.push(gray);
        pixels.push(gray);
        pixels.push(gray);
    }
    PixelBuffer {
        width: indices.width,
        height: indices.height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(GRAYSCALE_RGB565[0], 0x0000);
        assert_eq!(GRAYSCALE_RGB565[15], 0xFFFF);
    }

    #[test]
    fn test_ramp_is_monotonic() {
        for pair in GRAYSCALE_RGB565.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_rgb565_lookup_masks_high_bits() {
        assert_eq!(nibble_to_rgb565(0x15), GRAYSCALE_RGB565[5]);
        assert_eq!(nibble_to_rgb565(0xFF), 0xFFFF);
    }

    #[test]
    fn test_gray_endpoints() {
        assert_eq!(nibble_to_gray(0), 0);
        assert_eq!(nibble_to_gray(15), 255);
    }

    #[test]
    fn test_gray_midpoint() {
        // round(8 / 15 * 255) = round(136.0) = 136
        assert_eq!(nibble_to_gray(8), 136);
        // round(7 / 15 * 255) = round(119.0) = 119
        assert_eq!(nibble_to_gray(7), 119);
    }

    #[test]
    fn test_render_preview() {
        let indices = IndexBuffer::new(2, 1, vec![0, 15]).unwrap();
        let preview = render_preview(&indices);
        assert_eq!(preview.width, 2);
        assert_eq!(preview.height, 1);
        assert_eq!(preview.pixels, vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_preview_round_trips_through_quantizer() {
        // Previewing then re-quantizing at 16 levels reproduces the indices:
        // the gray mapping is the inverse of the level rescale
        use crate::quantize::{quantize, PaletteConfig};

        let indices = IndexBuffer::new(4, 4, (0..16).collect()).unwrap();
        let preview = render_preview(&indices);
        let requantized = quantize(&preview, &PaletteConfig::new(16, false)).unwrap();
        assert_eq!(requantized.indices, indices.indices);
    }
}
