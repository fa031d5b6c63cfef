//! Launch parameter parsing for the viewer.

use bevy::prelude::*;
use clap::Parser;

/// Default fallback latitude (Boulder, Colorado).
const DEFAULT_LAT: f64 = 40.0;
/// Default fallback longitude.
const DEFAULT_LON: f64 = -105.0;

/// Command-line parameters for the viewer.
#[derive(Resource, Debug, Parser)]
#[command(name = "tilescape-viewer", about = "3D terrain viewer around your location")]
pub struct LaunchParams {
    /// Fallback latitude in degrees, used when geolocation is unavailable.
    #[arg(long, default_value_t = DEFAULT_LAT, allow_negative_numbers = true)]
    pub lat: f64,

    /// Fallback longitude in degrees, used when geolocation is unavailable.
    #[arg(long, default_value_t = DEFAULT_LON, allow_negative_numbers = true)]
    pub lon: f64,

    /// Tile zoom level.
    #[arg(long, default_value_t = 15)]
    pub zoom: u8,

    /// Number of tiles to load, spiraling out from the center.
    #[arg(long, default_value_t = 16)]
    pub tiles: usize,

    /// World-space edge length of one tile mesh.
    #[arg(long, default_value_t = 512.0)]
    pub tile_size: f32,

    /// Tile API access token.
    #[arg(long, env = "TILESCAPE_TOKEN")]
    pub token: String,

    /// Tileset to texture meshes with; defaults to the elevation tileset.
    #[arg(long)]
    pub imagery_tileset: Option<String>,

    /// Skip geolocation and use the fallback coordinate directly.
    #[arg(long)]
    pub no_geolocate: bool,

    /// Render tile meshes as wireframes.
    #[arg(long)]
    pub wireframe: bool,
}

impl LaunchParams {
    /// Parse parameters from the process arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
