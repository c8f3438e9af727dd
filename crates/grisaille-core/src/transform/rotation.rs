//! Free-angle rotation: bounding geometry and raster resampling.
//!
//! Two pieces of geometry drive the rotate dialog. [`rotated_bounds`] gives
//! the axis-aligned box that contains the source rectangle once rotated about
//! its center, i.e. the canvas the rotation is rendered into. [`inscribed_rect`]
//! gives the largest axis-aligned rectangle that fits entirely inside the
//! rotated source, which is the crop that discards the blank corners a
//! free-angle rotation exposes.
//!
//! [`apply_rotation`] renders the rotation itself by inverse mapping: for
//! each output pixel, the source position that lands there is computed and
//! sampled bilinearly.
//!
//! Angles are in degrees throughout, positive = counter-clockwise. Both
//! geometry functions accept any real angle; rectangles are symmetric, so the
//! result only depends on the angle modulo 180 degrees.

use crate::buffer::PixelBuffer;

/// Tolerance for snapping angles to the exact 0/90/180/270 fast paths.
const ANGLE_EPSILON: f64 = 0.001;

/// Background color for output pixels no source position maps to.
const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Compute the bounding box of a rectangle rotated about its center.
///
/// The box is `(|W cos| + |H sin|, |W sin| + |H cos|)`, with exact fast paths
/// at multiples of 90 degrees so that `rotated_bounds(w, h, 0.0) == (w, h)`
/// and `rotated_bounds(w, h, 90.0) == (h, w)` hold without floating-point
/// drift.
///
/// # Example
///
/// ```
/// use grisaille_core::transform::rotated_bounds;
///
/// assert_eq!(rotated_bounds(100, 50, 90.0), (50, 100));
/// assert_eq!(rotated_bounds(100, 50, 0.0), (100, 50));
/// ```
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle = angle_degrees.rem_euclid(360.0);

    // Fast paths: exact multiples of 90 degrees (and near-misses from slider
    // rounding) keep integer dimensions exact
    if angle < ANGLE_EPSILON || (360.0 - angle) < ANGLE_EPSILON {
        return (width, height);
    }
    if (angle - 90.0).abs() < ANGLE_EPSILON || (angle - 270.0).abs() < ANGLE_EPSILON {
        return (height, width);
    }
    if (angle - 180.0).abs() < ANGLE_EPSILON {
        return (width, height);
    }

    let rad = angle.to_radians();
    let cos = rad.cos().abs();
    let sin = rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let bw = (w * cos + h * sin).round() as u32;
    let bh = (w * sin + h * cos).round() as u32;

    (bw.max(1), bh.max(1))
}

/// Compute the largest axis-aligned rectangle inside a rotated rectangle.
///
/// Used to auto-crop after a free-angle rotation so the result has no blank
/// corners. The angle is normalized into `[0, 90]` degrees by symmetry, then
/// one of two regimes applies:
///
/// - *Thin rectangle* (`short <= 2 sin cos long`): the inscribed rectangle is
///   pinned by the short side alone, half of it split across the two
///   trigonometric factors.
/// - Otherwise the inscribed rectangle touches all four sides of the rotated
///   source: `wr = (W cos - H sin) / (cos^2 - sin^2)`, and symmetrically for
///   `hr`.
///
/// At 45 degrees `cos^2 - sin^2` vanishes; that angle always satisfies the
/// thin-rectangle condition (`2 sin cos == 1` and `short <= long` by
/// definition), and an explicit denominator guard routes borderline float
/// rounding there too, so the division by zero is unreachable.
///
/// Both outputs are floored. `inscribed_rect(w, h, 0.0)` returns the source
/// dimensions unchanged.
///
/// # Example
///
/// ```
/// use grisaille_core::transform::inscribed_rect;
///
/// // A square rotated 45 degrees inscribes side/sqrt(2)
/// assert_eq!(inscribed_rect(100, 100, 45.0), (70, 70));
/// ```
pub fn inscribed_rect(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Reflect into [0, 90]; the inscribed rectangle repeats every 180 degrees
    // and mirrors across 90
    let angle = angle_degrees.rem_euclid(180.0);
    let angle = if angle > 90.0 { 180.0 - angle } else { angle };

    if angle < ANGLE_EPSILON {
        return (width, height);
    }
    if (90.0 - angle) < ANGLE_EPSILON {
        return (height, width);
    }

    let rad = angle.to_radians();
    let sin = rad.sin().abs();
    let cos = rad.cos().abs();

    let w = width as f64;
    let h = height as f64;
    let width_is_longer = w >= h;
    let (long, short) = if width_is_longer { (w, h) } else { (h, w) };

    let denom = cos * cos - sin * sin;
    let (iw, ih) = if short <= 2.0 * sin * cos * long || denom.abs() < f64::EPSILON {
        let x = 0.5 * short;
        if width_is_longer {
            (x / sin, x / cos)
        } else {
            (x / cos, x / sin)
        }
    } else {
        ((w * cos - h * sin) / denom, (h * cos - w * sin) / denom)
    };

    (iw.abs().floor() as u32, ih.abs().floor() as u32)
}

/// Rotate an image about its center into an expanded canvas.
///
/// The output has the dimensions of [`rotated_bounds`]; pixels no source
/// position maps to are filled with white, matching the editor's canvas
/// background. Sampling is bilinear.
///
/// A near-zero angle returns a clone of the source.
pub fn apply_rotation(image: &PixelBuffer, angle_degrees: f64) -> PixelBuffer {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized < ANGLE_EPSILON || (360.0 - normalized) < ANGLE_EPSILON {
        return image.clone();
    }

    let (src_w, src_h) = (image.width as f64, image.height as f64);
    let (dst_w, dst_h) = rotated_bounds(image.width, image.height, angle_degrees);

    // Negate so a positive angle rotates counter-clockwise on screen
    let rad = -angle_degrees.to_radians();
    let cos = rad.cos();
    let sin = rad.sin();

    let src_cx = src_w / 2.0;
    let src_cy = src_h / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 3) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 - dst_cx;
            let dy = dst_y as f64 - dst_cy;

            // Inverse rotation gives the source position for this output pixel
            let src_x = dx * cos - dy * sin + src_cx;
            let src_y = dx * sin + dy * cos + src_cy;

            let pixel = sample_bilinear(image, src_x, src_y);

            let dst_idx = ((dst_y * dst_w + dst_x) * 3) as usize;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    PixelBuffer {
        width: dst_w,
        height: dst_h,
        pixels: output,
    }
}

/// Sample a source position with bilinear interpolation.
///
/// Positions outside the source resolve to the white background; positions
/// within half a pixel of the border fall back to nearest-neighbor so the
/// edge doesn't bleed background into the image.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        if x >= -0.5 && x < w as f64 - 0.5 && y >= -0.5 && y < h as f64 - 0.5 {
            let px = x.round().clamp(0.0, (w - 1) as f64) as u32;
            let py = y.round().clamp(0.0, (h - 1) as f64) as u32;
            return image.rgb_at(px, py);
        }
        return BACKGROUND;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = image.rgb_at(x0, y0);
    let p10 = image.rgb_at(x1, y0);
    let p01 = image.rgb_at(x0, y1);
    let p11 = image.rgb_at(x1, y1);

    let mut result = [0u8; 3];
    for c in 0..3 {
        let v = p00[c] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[c] as f64 * fx * (1.0 - fy)
            + p01[c] as f64 * (1.0 - fx) * fy
            + p11[c] as f64 * fx * fy;
        result[c] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================
