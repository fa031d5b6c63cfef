//! Tile image decoding.
//!
//! Elevation and imagery tiles arrive as PNG; both are decoded to raw RGBA
//! here. The same RGBA buffer feeds the Terrain-RGB height decoder and, for
//! imagery tiles, GPU texture upload.

use crate::error::{DecodeError, DecodeResult};

/// Decoded RGBA pixel data for one tile image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTexture {
    /// RGBA pixel data (4 bytes per pixel), row-major from the top-left.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TileTexture {
    /// Check that the pixel data matches the stated dimensions.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.len() == (self.width as usize) * (self.height as usize) * 4
    }
}

/// Decode a PNG tile image to RGBA pixels.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedTileImage`] if the bytes are not a valid
/// PNG image.
pub fn decode_png_rgba(bytes: &[u8]) -> DecodeResult<TileTexture> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| DecodeError::MalformedTileImage {
            detail: e.to_string(),
        })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TileTexture {
        data: rgba.into_raw(),
        width,
        height,
    })
}
