//! High-level types for the terrain tile pipeline.

use glam::Vec3;
use tilescape_decode::{SpiralOffset, TerrainMesh, TileAddress, TileTexture};

/// Configuration for a raster tile API.
///
/// The elevation tileset supplies Terrain-RGB pixels for height decoding.
/// The imagery tileset supplies the mesh's visual texture; by default it is
/// the same tileset, which renders the raw elevation encoding (the original
/// behavior), but it can point at a styled basemap instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    /// Base URL of the tile API, without a trailing slash.
    pub api_base: String,
    /// Access token appended to every tile request.
    pub access_token: String,
    /// Tileset id for Terrain-RGB elevation tiles.
    pub elevation_tileset: String,
    /// Tileset id for the mesh's visual texture.
    pub imagery_tileset: String,
}

impl TileSource {
    /// Mapbox Terrain-RGB source, texturing meshes with the elevation tiles
    /// themselves.
    #[must_use]
    pub fn mapbox(access_token: impl Into<String>) -> Self {
        let tileset = "mapbox.terrain-rgb".to_string();
        Self {
            api_base: "https://api.mapbox.com/v4".to_string(),
            access_token: access_token.into(),
            elevation_tileset: tileset.clone(),
            imagery_tileset: tileset,
        }
    }

    /// Use a different tileset for the mesh's visual texture.
    #[must_use]
    pub fn with_imagery_tileset(mut self, tileset: impl Into<String>) -> Self {
        self.imagery_tileset = tileset.into();
        self
    }

    /// Whether elevation and imagery come from the same tileset (one fetch
    /// per tile instead of two).
    #[must_use]
    pub fn shared_tileset(&self) -> bool {
        self.elevation_tileset == self.imagery_tileset
    }

    /// URL of one tile image within a tileset.
    #[must_use]
    pub fn tile_url(&self, tileset: &str, address: TileAddress) -> String {
        format!(
            "{}/{}/{}/{}/{}.pngraw?access_token={}",
            self.api_base, tileset, address.z, address.x, address.y, self.access_token
        )
    }
}

/// One unit of work in a session: a spiral offset and the tile address it
/// resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlan {
    /// Offset from the session's center tile.
    pub offset: SpiralOffset,
    /// Address of the tile to fetch.
    pub address: TileAddress,
}

/// A synthesized terrain mesh positioned in world space.
///
/// Created once per successfully decoded tile and handed to the scene
/// consumer, which takes ownership for rendering. Never mutated after
/// creation.
#[derive(Debug, Clone)]
pub struct PlacedMesh {
    /// Address of the source tile.
    pub address: TileAddress,
    /// Spiral offset this mesh was generated for.
    pub source_offset: SpiralOffset,
    /// The displacement mesh in tile-local space.
    pub mesh: TerrainMesh,
    /// Visual texture to bind to the mesh.
    pub texture: TileTexture,
    /// World-space position of the mesh's local origin.
    pub world_position: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapbox_tile_url() {
        let source = TileSource::mapbox("tok123");
        let address = TileAddress {
            x: 6826,
            y: 12405,
            z: 15,
        };
        assert_eq!(
            source.tile_url(&source.elevation_tileset, address),
            "https://api.mapbox.com/v4/mapbox.terrain-rgb/15/6826/12405.pngraw?access_token=tok123"
        );
    }

    #[test]
    fn test_shared_tileset_default() {
        let source = TileSource::mapbox("tok");
        assert!(source.shared_tileset());

        let split = source.with_imagery_tileset("mapbox.satellite");
        assert!(!split.shared_tileset());
        assert_eq!(split.imagery_tileset, "mapbox.satellite");
    }
}
