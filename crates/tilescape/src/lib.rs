//! High-level async client for fetching and decoding terrain elevation tiles.
//!
//! This crate drives the terrain tile pipeline end to end: it plans a spiral
//! of tile addresses around a geographic origin, fetches Terrain-RGB
//! elevation tiles (and optionally separate imagery tiles) over HTTP, and
//! assembles each into a placed displacement mesh ready for a scene
//! consumer.
//!
//! # Design principles
//!
//! - **Web-compatible**: Works on desktop and WASM via reqwest
//! - **Runtime-agnostic**: Returns `impl Future`, works with any executor
//! - **Sync decoding**: Decode functions are synchronous; client parallelizes
//! - **Partial failure**: One bad tile never sinks its siblings
//!
//! # Example
//!
//! ```ignore
//! use tilescape::{Client, Session, SessionConfig, TileSource};
//! use tilescape_decode::GeoCoordinate;
//!
//! let session = Session::new(&SessionConfig {
//!     origin: GeoCoordinate::new(40.0, -105.0)?,
//!     zoom: 15,
//!     tile_count: 16,
//!     tile_world_size: 512.0,
//! })?;
//!
//! let client = Client::new(TileSource::mapbox("<token>"));
//! for plan in session.plans() {
//!     let placed = client.load_tile(plan, session.tile_world_size()).await?;
//!     // hand `placed` to the scene consumer
//! }
//! ```

pub mod cache;
mod client;
mod error;
mod session;
pub mod types;

pub use cache::{Cache, MemoryCache, NoCache};
pub use client::Client;
pub use error::{Error, Result};
pub use session::{Session, SessionConfig};
pub use types::{PlacedMesh, TilePlan, TileSource};

// Re-export decode types for convenience.
pub use tilescape_decode::{
    GeoCoordinate, HeightField, SpiralOffset, TerrainMesh, TileAddress, TileTexture,
};
