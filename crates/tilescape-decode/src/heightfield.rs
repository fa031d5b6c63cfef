//! Terrain-RGB height field decoding.
//!
//! Terrain-RGB packs elevation into the red, green, and blue channels of an
//! image tile. Each pixel decodes to a height in meters via a fixed affine
//! formula with 0.1 m resolution and a floor of -10000 m; the alpha channel
//! is ignored.

use crate::error::{DecodeError, DecodeResult};

/// Elevation floor of the Terrain-RGB encoding, in meters.
const HEIGHT_OFFSET: f64 = -10000.0;
/// Resolution of the Terrain-RGB encoding, in meters per step.
const HEIGHT_SCALE: f64 = 0.1;

/// Decode one Terrain-RGB pixel to a height in meters.
#[must_use]
pub fn decode_height(r: u8, g: u8, b: u8) -> f64 {
    let packed = f64::from(r) * 65536.0 + f64::from(g) * 256.0 + f64::from(b);
    HEIGHT_OFFSET + packed * HEIGHT_SCALE
}

/// A square grid of elevation samples decoded from one tile image.
///
/// Samples are stored row-major, matching the pixel order of the source
/// image: row 0 is the top (northern) edge of the tile.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    samples: Vec<f32>,
    side: usize,
}

impl HeightField {
    /// Decode a raw RGBA pixel buffer into a height field.
    ///
    /// The grid side is derived from the buffer: `side = sqrt(len / 4)`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedTileImage`] if the buffer length is
    /// not a multiple of 4, is empty, or does not describe a square pixel
    /// grid.
    pub fn from_rgba(buffer: &[u8]) -> DecodeResult<Self> {
        if !buffer.len().is_multiple_of(4) {
            return Err(DecodeError::MalformedTileImage {
                detail: format!("buffer length {} is not a multiple of 4", buffer.len()),
            });
        }

        let pixels = buffer.len() / 4;
        if pixels == 0 {
            return Err(DecodeError::MalformedTileImage {
                detail: "empty pixel buffer".to_string(),
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let side = (pixels as f64).sqrt().round() as usize;
        if side * side != pixels {
            return Err(DecodeError::MalformedTileImage {
                detail: format!("{pixels} pixels do not form a square grid"),
            });
        }

        #[allow(clippy::cast_possible_truncation)]
        let samples = buffer
            .chunks_exact(4)
            .map(|px| decode_height(px[0], px[1], px[2]) as f32)
            .collect();

        Ok(Self { samples, side })
    }

    /// Side length of the square grid.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// All samples in row-major order.
    #[must_use]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at a grid position. Row 0 is the top edge of the tile.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.side && col < self.side);
        self.samples[row * self.side + col]
    }
}
