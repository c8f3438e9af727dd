//! Tiled scanline run-length codec for the export artifact.
//!
//! The artifact is a flat byte sequence with no header. Each byte packs one
//! run:
//!
//! ```text
//! bit 7..4 : run_length - 1   (run_length in 1..16)
//! bit 3..0 : palette index    (0..15)
//! ```
//!
//! Rows are encoded top to bottom; within a row, samples are grouped into
//! tiles of at most [`DEFAULT_TILE_WIDTH`] columns (the last tile may be
//! narrower). A run never crosses a tile or row boundary even when the values
//! on both sides match: each tile decodes independently, which is what lets
//! the viewer seek to an arbitrary row without expanding the whole stream.
//!
//! The format carries no dimensions or magic number; `width`, `height`, and
//! the tile width travel out-of-band.

use crate::buffer::IndexBuffer;
use thiserror::Error;

/// Tile width used by the export format and the target device's renderer.
pub const DEFAULT_TILE_WIDTH: u32 = 320;

/// Errors raised while encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Tile width of zero would make every row an infinite loop.
    #[error("tile width must be at least 1")]
    ZeroTileWidth,

    /// Width or height is zero.
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyDimensions { width: u32, height: u32 },

    /// The index data length doesn't match the buffer's dimensions.
    #[error("invalid index data: expected {expected} samples (width * height), got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Errors raised while decoding a byte stream.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Tile width of zero would make every row an infinite loop.
    #[error("tile width must be at least 1")]
    ZeroTileWidth,

    /// Width or height is zero.
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    EmptyDimensions { width: u32, height: u32 },

    /// The stream ended before `width * height` samples were reconstructed.
    #[error("encoded stream truncated: expected {expected} samples, decoded {actual}")]
    Truncated { expected: usize, actual: usize },

    /// A run would extend past the end of its tile.
    #[error("run crosses a tile boundary in row {row}, tile {tile}")]
    TileOverrun { row: u32, tile: u32 },

    /// Bytes remain after the final sample was reconstructed.
    #[error("{remaining} trailing bytes after the final sample")]
    TrailingBytes { remaining: usize },
}

/// Encode an index buffer into the flat RLE byte stream.
///
/// Each row is split into tiles of at most `tile_width` columns and each tile
/// is run-length encoded independently, with runs capped at 16 samples. Every
/// tile emits at least one byte.
///
/// # Errors
///
/// Returns [`EncodeError::ZeroTileWidth`] if `tile_width` is 0.
///
/// # Example
///
/// ```
/// use grisaille_core::buffer::IndexBuffer;
/// use grisaille_core::rle::{encode, DEFAULT_TILE_WIDTH};
///
/// let indices = IndexBuffer::new(4, 1, vec![0, 0, 15, 15]).unwrap();
/// let bytes = encode(&indices, DEFAULT_TILE_WIDTH).unwrap();
/// assert_eq!(bytes, vec![0x10, 0x1F]); // two runs of length 2
/// ```
pub fn encode(indices: &IndexBuffer, tile_width: u32) -> Result<Vec<u8>, EncodeError> {
    check_encode_input(indices, tile_width)?;

    let width = indices.width as usize;
    let tile = tile_width as usize;
    let mut out = Vec::new();

    for row in indices.indices.chunks_exact(width) {
        for chunk in row.chunks(tile) {
            let mut cur = chunk[0] & 0x0F;
            let mut run = 1u8;
            for &raw in &chunk[1..] {
                let v = raw & 0x0F;
                if v == cur && run < 16 {
                    run += 1;
                } else {
                    out.push(((run - 1) << 4) | cur);
                    cur = v;
                    run = 1;
                }
            }
            out.push(((run - 1) << 4) | cur);
        }
    }

    Ok(out)
}

/// Count the bytes [`encode`] would emit, without materializing them.
///
/// The artifact's byte count equals its run count, so the editor can show a
/// live size estimate by counting transitions. This is kept in lockstep with
/// [`encode`]: for every valid buffer, `encoded_len(x, t) == encode(x, t).len()`.
pub fn encoded_len(indices: &IndexBuffer, tile_width: u32) -> Result<usize, EncodeError> {
    check_encode_input(indices, tile_width)?;

    let width = indices.width as usize;
    let tile = tile_width as usize;
    let mut count = 0usize;

    for row in indices.indices.chunks_exact(width) {
        for chunk in row.chunks(tile) {
            let mut cur = chunk[0] & 0x0F;
            let mut run = 1u8;
            for &raw in &chunk[1..] {
                let v = raw & 0x0F;
                if v == cur && run < 16 {
                    run += 1;
                } else {
                    count += 1;
                    cur = v;
                    run = 1;
                }
            }
            count += 1;
        }
    }

    Ok(count)
}

/// Validate the inputs shared by [`encode`] and [`encoded_len`].
///
/// The buffer's own constructor enforces these, but the fields are public,
/// so a hand-assembled buffer is re-checked before the row iteration.
fn check_encode_input(indices: &IndexBuffer, tile_width: u32) -> Result<(), EncodeError> {
    if tile_width == 0 {
        return Err(EncodeError::ZeroTileWidth);
    }
    if indices.width == 0 || indices.height == 0 {
        return Err(EncodeError::EmptyDimensions {
            width: indices.width,
            height: indices.height,
        });
    }
    let expected = (indices.width as usize) * (indices.height as usize);
    if indices.indices.len() != expected {
        return Err(EncodeError::LengthMismatch {
            expected,
            actual: indices.indices.len(),
        });
    }
    Ok(())
}

/// Decode an RLE byte stream back into an index buffer.
///
/// Reconstruction is strict: the stream must expand to exactly
/// `width * height` samples, no run may cross its tile's column range, and no
/// bytes may remain once the final sample is placed. The device's renderer
/// clamps runs at the tile edge when drawing; here a malformed stream is
/// reported rather than silently repaired.
///
/// # Errors
///
/// See [`DecodeError`] for the malformed-stream conditions.
pub fn decode(
    bytes: &[u8],
    width: u32,
    height: u32,
    tile_width: u32,
) -> Result<IndexBuffer, DecodeError> {
    if tile_width == 0 {
        return Err(DecodeError::ZeroTileWidth);
    }
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyDimensions { width, height });
    }

    let w = width as usize;
    let tile = tile_width as usize;
    let expected = w * height as usize;
    let mut indices = Vec::with_capacity(expected);
    let mut iter = bytes.iter();

    for row in 0..height {
        for (tile_idx, tile_start) in (0..w).step_by(tile).enumerate() {
            let tile_end = (tile_start + tile).min(w);
            let mut filled = tile_start;
            while filled < tile_end {
                let byte = match iter.next() {
                    Some(&b) => b,
                    None => {
                        return Err(DecodeError::Truncated {
                            expected,
                            actual: indices.len(),
                        })
                    }
                };
                let run = ((byte >> 4) & 0x0F) as usize + 1;
                let value = byte & 0x0F;
                if filled + run > tile_end {
                    return Err(DecodeError::TileOverrun {
                        row,
                        tile: tile_idx as u32,
                    });
                }
                indices.resize(indices.len() + run, value);
                filled += run;
            }
        }
    }

    let remaining = iter.len();
    if remaining > 0 {
        return Err(DecodeError::TrailingBytes { remaining });
    }

    Ok(IndexBuffer {
        width,
        height,
        indices,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn index_buffer_strategy() -> impl Strategy<Value = IndexBuffer> {
        (1u32..=24, 1u32..=24)
            .prop_flat_map(|(w, h)| {
                (
                    Just(w),
                    Just(h),
                    prop::collection::vec(0u8..=15, (w * h) as usize),
                )
            })
            .prop_map(|(w, h, indices)| IndexBuffer::new(w, h, indices).unwrap())
    }

    proptest! {
        /// Property: decode(encode(x)) == x for any buffer and tile width.
        #[test]
        fn prop_round_trip(
            idx in index_buffer_strategy(),
            tile_width in 1u32..=400,
        ) {
            let bytes = encode(&idx, tile_width).unwrap();
            let back = decode(&bytes, idx.width, idx.height, tile_width).unwrap();
            prop_assert_eq!(back, idx);
        }

        /// Property: the size estimate equals the actual encoded length.
        #[test]
        fn prop_encoded_len_matches(
            idx in index_buffer_strategy(),
            tile_width in 1u32..=400,
        ) {
            let bytes = encode(&idx, tile_width).unwrap();
            let len = encoded_len(&idx, tile_width).unwrap();
            prop_assert_eq!(len, bytes.len());
        }

        /// Property: every byte's expanded run stays within 1..=16 and its
        /// value within the nibble range.
        #[test]
        fn prop_run_bounds(
            idx in index_buffer_strategy(),
            tile_width in 1u32..=400,
        ) {
            let bytes = encode(&idx, tile_width).unwrap();
            for b in bytes {
                let run = (b >> 4) as usize + 1;
                prop_assert!((1..=16).contains(&run));
                prop_assert!(b & 0x0F <= 15);
            }
        }

        /// Property: a tile boundary always forces a run break, so each row
        /// contributes at least ceil(width / tile_width) bytes.
        #[test]
        fn prop_tile_locality(
            idx in index_buffer_strategy(),
            tile_width in 1u32..=32,
        ) {
            let bytes = encode(&idx, tile_width).unwrap();
            let tiles_per_row = (idx.width as usize).div_ceil(tile_width as usize);
            prop_assert!(bytes.len() >= tiles_per_row * idx.height as usize);
        }

        /// Property: truncating a non-empty stream always fails decode.
        #[test]
        fn prop_truncation_detected(
            idx in index_buffer_strategy(),
            tile_width in 1u32..=64,
        ) {
            let mut bytes = encode(&idx, tile_width).unwrap();
            bytes.pop();
            let result = decode(&bytes, idx.width, idx.height, tile_width);
            prop_assert!(result.is_err());
        }
    }
}
