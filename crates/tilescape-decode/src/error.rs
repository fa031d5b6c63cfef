//! Error types for decoding operations.

use std::fmt;

/// Errors raised while resolving geographic input to a tile address.
///
/// Both variants are caller errors: they reject the whole session before any
/// tile is fetched, and retrying with the same input will not succeed.
#[derive(Debug, Clone, PartialEq)]
pub enum TileError {
    /// Zoom level outside the supported range.
    InvalidZoom { zoom: u8 },
    /// Latitude or longitude outside the valid geographic range.
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom level {zoom} exceeds supported maximum")
            }
            Self::InvalidCoordinate {
                latitude,
                longitude,
            } => {
                write!(f, "coordinate ({latitude}, {longitude}) is out of range")
            }
        }
    }
}

impl std::error::Error for TileError {}

/// Errors that can occur while decoding a single tile.
///
/// These are scoped to one tile: a malformed tile skips its own placement
/// but must not prevent sibling tiles from completing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Pixel buffer is not a square grid of RGBA pixels.
    MalformedTileImage { detail: String },
    /// Height field is too small to form any mesh cell.
    DegenerateHeightField { side: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTileImage { detail } => {
                write!(f, "malformed tile image: {detail}")
            }
            Self::DegenerateHeightField { side } => {
                write!(f, "height field of side {side} cannot form a mesh")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
