//! WASM bindings for rotation geometry and raster transforms.
//!
//! The rotate dialog calls the two geometry functions on every slider move
//! to preview the crop overlay, and `rotate_and_crop` once on confirm.

use crate::types::{err_to_js, JsPixelBuffer};
use grisaille_core::transform::{
    rotate_and_crop as core_rotate_and_crop, inscribed_rect as core_inscribed_rect,
    rotated_bounds as core_rotated_bounds,
};
use wasm_bindgen::prelude::*;

/// Compute the bounding box of a rectangle rotated about its center.
///
/// Returns `[width, height]` of the minimal axis-aligned box containing the
/// rotated rectangle. Exact at multiples of 90 degrees.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const [bw, bh] = rotated_bounds(320, 240, 30);
/// ```
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = core_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Compute the largest axis-aligned rectangle inside a rotated rectangle.
///
/// Returns `[width, height]` of the crop that discards the blank corners a
/// free-angle rotation exposes.
#[wasm_bindgen]
pub fn inscribed_rect(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = core_inscribed_rect(width, height, angle_degrees);
    vec![w, h]
}

/// Rotate an image and crop away the blank corners.
///
/// Renders the rotation into the expanded bounding box with bilinear
/// sampling, then crops the centered inscribed rectangle. This is what the
/// rotate dialog's confirm button applies.
#[wasm_bindgen]
pub fn rotate_and_crop(image: &JsPixelBuffer, angle_degrees: f64) -> Result<JsPixelBuffer, JsValue> {
    let buffer = image.to_buffer().map_err(err_to_js)?;
    Ok(JsPixelBuffer::from_buffer(core_rotate_and_crop(
        &buffer,
        angle_degrees,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_bounds_identity() {
        assert_eq!(rotated_bounds(320, 240, 0.0), vec![320, 240]);
    }

    #[test]
    fn test_rotated_bounds_swap() {
        assert_eq!(rotated_bounds(320, 240, 90.0), vec![240, 320]);
    }

    #[test]
    fn test_inscribed_square_at_45() {
        assert_eq!(inscribed_rect(100, 100, 45.0), vec![70, 70]);
    }

    #[test]
    fn test_rotate_and_crop_dimensions() {
        let image = JsPixelBuffer::new(60, 40, vec![120u8; 60 * 40 * 3]);
        let result = rotate_and_crop(&image, 20.0).unwrap();
        let expected = inscribed_rect(60, 40, 20.0);
        assert_eq!(vec![result.width(), result.height()], expected);
    }

}
