//! Decode Terrain-RGB elevation tiles into displacement meshes.
//!
//! This crate provides pure synchronous functions for the terrain tile
//! pipeline: resolving geographic coordinates to tile addresses, generating
//! spiral neighbor orderings, decoding elevation-encoded RGBA buffers into
//! height fields, and synthesizing textured displacement meshes from them.
//! All functions are designed to be called from any threading context - the
//! library user controls parallelism.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **User-controlled parallelism**: Client decides how to parallelize
//! - **No I/O**: Fetching tile images is the caller's concern

mod error;
pub mod heightfield;
pub mod mesh;
pub mod place;
pub mod spiral;
pub mod texture;
pub mod tile;

pub use error::{DecodeError, DecodeResult, TileError};
pub use heightfield::HeightField;
pub use mesh::{TerrainMesh, synthesize};
pub use place::world_position;
pub use spiral::{SpiralOffset, spiral_offsets};
pub use texture::{TileTexture, decode_png_rgba};
pub use tile::{GeoCoordinate, MAX_ZOOM, TileAddress};
