//! 3D terrain viewer around your location using Bevy.
//!
//! Resolves a geographic origin (device geolocation with a CLI fallback),
//! fetches a spiral of Terrain-RGB elevation tiles, and renders the decoded
//! displacement meshes with an orbit camera.

mod async_runtime;
mod camera;
mod geolocate;
mod launch_params;
mod loader;
mod mesh;
mod ui;

use bevy::prelude::*;

use camera::OrbitCameraPlugin;
use geolocate::GeolocatePlugin;
use launch_params::LaunchParams;
use loader::TerrainLoaderPlugin;
use ui::DebugUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            OrbitCameraPlugin,
            GeolocatePlugin,
            TerrainLoaderPlugin,
            DebugUiPlugin,
        ));
    }
}

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let params = LaunchParams::parse_args();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "tilescape-viewer".to_string(),
            resolution: (1280, 720).into(),
            ..Default::default()
        }),
        ..Default::default()
    }));

    // Tokio runtime for reqwest-backed background tasks.
    app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());

    app.insert_resource(params).add_plugins(AppPlugin).run();
}
