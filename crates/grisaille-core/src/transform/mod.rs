//! Image transformation operations: free-angle rotation and cropping.
//!
//! In the editing flow a rotation request produces three things: the expanded
//! bounding box the rotation is rendered into, the rendered rotation itself,
//! and the inscribed-rectangle crop that discards the blank corners. The
//! [`rotate_and_crop`] composition runs all three, which is what the rotate
//! dialog's confirm button applies.
//!
//! Angles are in degrees, positive = counter-clockwise. Crop coordinates are
//! pixels with the origin at the top-left corner.

mod crop;
mod rotation;

pub use crop::{apply_crop, crop_center};
pub use rotation::{apply_rotation, inscribed_rect, rotated_bounds};

use crate::buffer::PixelBuffer;

/// Rotate an image and crop away the blank corners.
///
/// The image is rotated about its center into the full bounding box, then
/// cropped to the centered inscribed rectangle of the *source* dimensions at
/// that angle. A near-zero angle returns a clone of the source.
///
/// # Example
///
/// ```
/// use grisaille_core::buffer::PixelBuffer;
/// use grisaille_core::transform::rotate_and_crop;
///
/// let image = PixelBuffer::new(100, 100, vec![200u8; 100 * 100 * 3]).unwrap();
/// let rotated = rotate_and_crop(&image, 45.0);
/// assert_eq!((rotated.width, rotated.height), (70, 70));
/// ```
pub fn rotate_and_crop(image: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    let rotated = apply_rotation(image, angle_degrees);
    let (crop_w, crop_h) = inscribed_rect(image.width, image.height, angle_degrees);
    crop_center(&rotated, crop_w.max(1), crop_h.max(1))
}
