//! Grayscale palette quantization.
//!
//! Maps RGB samples to N-level grayscale indices, then rescales the result
//! to the 4-bit range the export format stores. The per-sample chain is:
//!
//! ```text
//! intensity = round((r + g + b) / 3)              // 0..=255
//! level     = round(intensity / 255 * (levels-1)) // 0..=levels-1
//! level     = (levels-1) - level                  // if invert
//! nibble    = round(level / (levels-1) * 15)      // 0..=15
//! ```
//!
//! Rounding is round-half-away-from-zero (`f64::round`); every intermediate
//! value is non-negative so ties always round up. `levels` is restricted to
//! 2..=16: the rescale divides by `levels - 1`, so a single-level palette is
//! rejected up front rather than dividing by zero.

use crate::buffer::{IndexBuffer, PixelBuffer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted palette size.
pub const MIN_LEVELS: u8 = 2;

/// Largest accepted palette size.
pub const MAX_LEVELS: u8 = 16;

/// Errors raised by quantization.
#[derive(Debug, Error)]
pub enum QuantizeError {
    /// The palette level count is outside the accepted range.
    #[error("palette levels must be between 2 and 16, got {0}")]
    InvalidLevels(u8),

    /// The pixel buffer's data length doesn't match its dimensions.
    #[error("invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    PixelLengthMismatch { expected: usize, actual: usize },
}

/// Palette configuration for quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Number of grayscale levels (2-16 inclusive).
    pub levels: u8,
    /// Invert the palette (dark becomes light and vice versa).
    pub invert: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            levels: MAX_LEVELS,
            invert: false,
        }
    }
}

impl PaletteConfig {
    /// Create a new palette configuration.
    pub fn new(levels: u8, invert: bool) -> Self {
        Self { levels, invert }
    }

    /// Check that `levels` is within the accepted 2..=16 range.
    pub fn validate(&self) -> Result<(), QuantizeError> {
        if self.levels < MIN_LEVELS || self.levels > MAX_LEVELS {
            return Err(QuantizeError::InvalidLevels(self.levels));
        }
        Ok(())
    }
}

/// Quantize an RGB buffer into 4-bit palette indices.
///
/// The configuration is validated before any samples are processed, so a bad
/// `levels` value never produces partial output. The function is pure: the
/// same buffer and configuration always yield the same index buffer.
///
/// # Errors
///
/// Returns an error if `config.levels` is outside 2..=16, or if the buffer's
/// pixel data doesn't match its stated dimensions.
///
/// # Example
///
/// ```
/// use grisaille_core::buffer::PixelBuffer;
/// use grisaille_core::quantize::{quantize, PaletteConfig};
///
/// let white = PixelBuffer::new(2, 1, vec![255u8; 6]).unwrap();
/// let indices = quantize(&white, &PaletteConfig::default()).unwrap();
/// assert_eq!(indices.indices, vec![15, 15]);
/// ```
pub fn quantize(buffer: &PixelBuffer, config: &PaletteConfig) -> Result<IndexBuffer, QuantizeError> {
    config.validate()?;

    let expected = (buffer.width as usize) * (buffer.height as usize) * 3;
    if buffer.pixels.len() != expected {
        return Err(QuantizeError::PixelLengthMismatch {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let mut indices = Vec::with_capacity(buffer.pixel_count() as usize);
    for rgb in buffer.pixels.chunks_exact(3) {
        indices.push(quantize_sample(
            rgb[0],
            rgb[1],
            rgb[2],
            config.levels,
            config.invert,
        ));
    }

    Ok(IndexBuffer {
        width: buffer.width,
        height: buffer.height,
        indices,
    })
}

/// Quantize a single RGB sample to a nibble.
///
/// `levels` must already be validated to 2..=16.
#[inline]
fn quantize_sample(r: u8, g: u8, b: u8, levels: u8, invert: bool) -> u8 {
    let steps = (levels - 1) as f64;
    let intensity = ((r as f64 + g as f64 + b as f64) / 3.0).round();
    let mut level = (intensity / 255.0 * steps).round();
    if invert {
        level = steps - level;
    }
    (level / steps * 15.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_buffer(width: u32, height: u32, rgb: [u8; 3]) -> PixelBuffer {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * 3) as usize)
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_black_quantizes_to_zero() {
        let buf = uniform_buffer(4, 4, [0, 0, 0]);
        for levels in MIN_LEVELS..=MAX_LEVELS {
            let config = PaletteConfig::new(levels, false);
            let indices = quantize(&buf, &config).unwrap();
            assert!(indices.indices.iter().all(|&v| v == 0), "levels {}", levels);
        }
    }

    #[test]
    fn test_white_quantizes_to_fifteen() {
        let buf = uniform_buffer(4, 4, [255, 255, 255]);
        for levels in MIN_LEVELS..=MAX_LEVELS {
            let config = PaletteConfig::new(levels, false);
            let indices = quantize(&buf, &config).unwrap();
            assert!(
                indices.indices.iter().all(|&v| v == 15),
                "levels {}",
                levels
            );
        }
    }

    #[test]
    fn test_two_level_threshold() {
        // At levels=2, intensity 127 rounds down to level 0 and 128 rounds up.
        // 127/255 = 0.498..., 128/255 = 0.502...
        let dark = uniform_buffer(1, 1, [127, 127, 127]);
        let light = uniform_buffer(1, 1, [128, 128, 128]);
        let config = PaletteConfig::new(2, false);
        assert_eq!(quantize(&dark, &config).unwrap().indices, vec![0]);
        assert_eq!(quantize(&light, &config).unwrap().indices, vec![15]);
    }

    #[test]
    fn test_intensity_averages_channels() {
        // (255 + 0 + 0) / 3 = 85; at levels=16: round(85/255*15) = 5
        let buf = uniform_buffer(1, 1, [255, 0, 0]);
        let config = PaletteConfig::new(16, false);
        assert_eq!(quantize(&buf, &config).unwrap().indices, vec![5]);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        // intensity = round((10+11+10)/3) = round(10.333) = 10
        // at levels=16: round(10/255*15) = round(0.588) = 1
        let buf = uniform_buffer(1, 1, [10, 11, 10]);
        let config = PaletteConfig::new(16, false);
        assert_eq!(quantize(&buf, &config).unwrap().indices, vec![1]);

        // intensity 8 sits below the half step: round(8/255*15) = round(0.47) = 0
        let buf = uniform_buffer(1, 1, [8, 8, 8]);
        assert_eq!(quantize(&buf, &config).unwrap().indices, vec![0]);
    }

    #[test]
    fn test_invert_flips_black_and_white() {
        let black = uniform_buffer(2, 2, [0, 0, 0]);
        let config = PaletteConfig::new(16, true);
        let indices = quantize(&black, &config).unwrap();
        assert!(indices.indices.iter().all(|&v| v == 15));

        let white = uniform_buffer(2, 2, [255, 255, 255]);
        let indices = quantize(&white, &config).unwrap();
        assert!(indices.indices.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_invert_symmetry_at_exact_levels() {
        // The nibble rescale is exact when (levels - 1) divides 15, so the
        // inverted output is the mirror of the plain output.
        let buf = {
            let pixels: Vec<u8> = (0..(8 * 8 * 3)).map(|i| (i * 7 % 256) as u8).collect();
            PixelBuffer::new(8, 8, pixels).unwrap()
        };
        for levels in [2u8, 4, 6, 16] {
            let plain = quantize(&buf, &PaletteConfig::new(levels, false)).unwrap();
            let flipped = quantize(&buf, &PaletteConfig::new(levels, true)).unwrap();
            for (a, b) in plain.indices.iter().zip(flipped.indices.iter()) {
                assert_eq!(*b, 15 - *a, "levels {}", levels);
            }
        }
    }

    #[test]
    fn test_rejects_invalid_levels() {
        let buf = uniform_buffer(1, 1, [0, 0, 0]);
        for levels in [0u8, 1, 17, 255] {
            let result = quantize(&buf, &PaletteConfig::new(levels, false));
            assert!(
                matches!(result, Err(QuantizeError::InvalidLevels(l)) if l == levels),
                "levels {}",
                levels
            );
        }
    }

    #[test]
    fn test_rejects_mismatched_buffer() {
        // Fields are public, so a buffer can be assembled inconsistently;
        // quantize re-checks the length before producing anything.
        let buf = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![0u8; 299],
        };
        let result = quantize(&buf, &PaletteConfig::default());
        assert!(matches!(
            result,
            Err(QuantizeError::PixelLengthMismatch {
                expected: 300,
                actual: 299
            })
        ));
    }

    #[test]
    fn test_deterministic() {
        let buf = {
            let pixels: Vec<u8> = (0..(16 * 16 * 3)).map(|i| (i * 31 % 256) as u8).collect();
            PixelBuffer::new(16, 16, pixels).unwrap()
        };
        let config = PaletteConfig::new(5, true);
        let a = quantize(&buf, &config).unwrap();
        let b = quantize(&buf, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_default() {
        let config = PaletteConfig::default();
        assert_eq!(config.levels, 16);
        assert!(!config.invert);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = PaletteConfig::new(4, true);
        let json = serde_json::to_string(&config).unwrap();
        let back: PaletteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
