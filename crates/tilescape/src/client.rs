//! HTTP client for fetching and assembling terrain tiles.
//!
//! The client downloads tile images, decodes them, and assembles each spiral
//! plan entry into a [`PlacedMesh`]. Fetching is the only async stage; all
//! decoding is synchronous and bounded-time.

use std::sync::Arc;

use tilescape_decode::{HeightField, TileAddress, TileTexture};

use crate::cache::{Cache, NoCache};
use crate::error::{Error, Result};
use crate::types::{PlacedMesh, TilePlan, TileSource};

/// HTTP client for fetching terrain tiles.
///
/// Runtime-agnostic: every method returns a plain future, and the caller
/// decides how tiles are parallelized. Each tile load is independent; a
/// failure in one has no effect on any other.
pub struct Client<C: Cache = NoCache> {
    http: reqwest::Client,
    cache: Arc<C>,
    source: TileSource,
}

impl Client<NoCache> {
    /// Create a client with no caching.
    #[must_use]
    pub fn new(source: TileSource) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: Arc::new(NoCache),
            source,
        }
    }
}

impl<C: Cache> Client<C> {
    /// Create a client with a custom cache.
    #[must_use]
    pub fn with_cache(source: TileSource, cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: Arc::new(cache),
            source,
        }
    }

    /// Create a client with a custom HTTP client and cache.
    #[must_use]
    pub fn with_http_and_cache(http: reqwest::Client, source: TileSource, cache: C) -> Self {
        Self {
            http,
            cache: Arc::new(cache),
            source,
        }
    }

    /// The tile source this client fetches from.
    #[must_use]
    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// Fetch the raw PNG bytes of one tile from a tileset.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or returns a non-success
    /// status.
    pub async fn fetch_tile_bytes(&self, tileset: &str, address: TileAddress) -> Result<Vec<u8>> {
        let url = self.source.tile_url(tileset, address);
        self.fetch_bytes(&url).await
    }

    /// Fetch one tile and decode it to RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the bytes are not a valid PNG.
    pub async fn fetch_tile_texture(
        &self,
        tileset: &str,
        address: TileAddress,
    ) -> Result<TileTexture> {
        let bytes = self.fetch_tile_bytes(tileset, address).await?;
        Ok(tilescape_decode::decode_png_rgba(&bytes)?)
    }

    /// Fetch, decode, synthesize, and place one tile of a session plan.
    ///
    /// The elevation tile is decoded into a height field and displaced into
    /// a mesh; the visual texture comes from the imagery tileset, which is a
    /// second fetch only when it differs from the elevation tileset.
    ///
    /// # Errors
    ///
    /// Returns an error scoped to this tile; sibling plan entries are
    /// unaffected.
    pub async fn load_tile(&self, plan: TilePlan, tile_world_size: f32) -> Result<PlacedMesh> {
        let elevation = self
            .fetch_tile_texture(&self.source.elevation_tileset, plan.address)
            .await?;

        let field = HeightField::from_rgba(&elevation.data)?;
        let mesh = tilescape_decode::synthesize(&field, tile_world_size)?;

        let texture = if self.source.shared_tileset() {
            elevation
        } else {
            self.fetch_tile_texture(&self.source.imagery_tileset, plan.address)
                .await?
        };

        let world_position = tilescape_decode::world_position(plan.offset, tile_world_size);

        tracing::debug!(
            x = plan.address.x,
            y = plan.address.y,
            z = plan.address.z,
            side = field.side(),
            "tile assembled"
        );

        Ok(PlacedMesh {
            address: plan.address,
            source_offset: plan.offset,
            mesh,
            texture,
            world_position,
        })
    }

    /// Fetch raw bytes from a URL, using the cache if possible.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(data) = self.cache.get(url).await? {
            tracing::debug!(url, "cache hit");
            return Ok(data);
        }

        tracing::debug!(url, "fetching");

        let response = self.http.get(url).send().await.map_err(|e| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|e| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let data = data.to_vec();

        self.cache.put(url, data.clone()).await?;

        Ok(data)
    }
}
