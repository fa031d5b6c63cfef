//! Async terrain loading and scene insertion.
//!
//! Once the origin is resolved, plans a session, spawns one background task
//! per tile (fetch, decode, synthesize, place), and inserts completed meshes
//! into the scene as they arrive over a channel. Tiles are independent
//! units: a failed tile is logged and skipped, and the rest of the mosaic
//! still completes (the terrain may have holes).

use std::sync::Arc;

use bevy::ecs::message::MessageWriter;
use bevy::pbr::wireframe::{Wireframe, WireframePlugin};
use bevy::prelude::*;
use tilescape::{Client, Error, MemoryCache, PlacedMesh, Session, SessionConfig, TileSource};

use crate::async_runtime::TaskSpawner;
use crate::camera::OrbitCamera;
use crate::geolocate::OriginState;
use crate::launch_params::LaunchParams;
use crate::mesh::{TerrainTileMarker, convert_mesh, convert_texture};

/// Plugin for loading and placing terrain tiles.
pub struct TerrainLoaderPlugin;

impl Plugin for TerrainLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(WireframePlugin::default())
            .init_resource::<TerrainState>()
            .init_resource::<TileChannels>()
            .add_systems(Update, (start_session, insert_completed_tiles));
    }
}

/// State of the terrain build.
#[derive(Resource, Default)]
pub struct TerrainState {
    /// The planned session, once the origin is known.
    pub session: Option<Session>,
    /// Tiles placed in the scene.
    pub loaded: usize,
    /// Tiles that failed and were skipped.
    pub failed: usize,
}

impl TerrainState {
    /// Tiles still being fetched or decoded.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.plans().len() - self.loaded - self.failed)
    }
}

/// Channel delivering per-tile results from background tasks.
///
/// This is the pipeline's only synchronization point: completions arrive in
/// any order and are drained on the main thread.
#[derive(Resource)]
struct TileChannels {
    tile_rx: async_channel::Receiver<Result<PlacedMesh, Error>>,
    tile_tx: async_channel::Sender<Result<PlacedMesh, Error>>,
}

impl Default for TileChannels {
    fn default() -> Self {
        let (tile_tx, tile_rx) = async_channel::unbounded();
        Self { tile_rx, tile_tx }
    }
}

/// Plan the session and spawn one load task per tile.
#[allow(clippy::needless_pass_by_value)]
fn start_session(
    origin: Res<OriginState>,
    params: Res<LaunchParams>,
    mut state: ResMut<TerrainState>,
    channels: Res<TileChannels>,
    spawner: TaskSpawner,
    mut camera_query: Query<&mut OrbitCamera>,
    mut exit: MessageWriter<AppExit>,
) {
    if state.session.is_some() {
        return;
    }
    let Some(origin) = origin.resolved() else {
        return;
    };

    let session = match Session::new(&SessionConfig {
        origin,
        zoom: params.zoom,
        tile_count: params.tiles,
        tile_world_size: params.tile_size,
    }) {
        Ok(session) => session,
        Err(e) => {
            // No valid center tile; the whole session is unbuildable.
            tracing::error!(error = %e, "failed to plan session");
            exit.write(AppExit::error());
            return;
        }
    };

    let mut source = TileSource::mapbox(params.token.clone());
    if let Some(tileset) = &params.imagery_tileset {
        source = source.with_imagery_tileset(tileset.clone());
    }
    let client = Arc::new(Client::with_cache(source, MemoryCache::new()));

    let tile_world_size = session.tile_world_size();
    for plan in session.plans().iter().copied() {
        let client = Arc::clone(&client);
        let tx = channels.tile_tx.clone();
        spawner.spawn(async move {
            let result = client.load_tile(plan, tile_world_size).await;
            let _ = tx.send(result).await;
        });
    }

    // Frame the initial view on the center tile's placement.
    if let Ok(mut orbit) = camera_query.single_mut() {
        orbit.focus = session.framing_position();
        orbit.distance = tile_world_size * 2.0;
    }

    tracing::info!(tiles = session.plans().len(), "started loading terrain");
    state.session = Some(session);
}

/// Drain completed tiles into the scene.
#[allow(clippy::needless_pass_by_value)]
fn insert_completed_tiles(
    mut commands: Commands,
    mut state: ResMut<TerrainState>,
    channels: Res<TileChannels>,
    params: Res<LaunchParams>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    while let Ok(result) = channels.tile_rx.try_recv() {
        match result {
            Ok(placed) => {
                let mesh = meshes.add(convert_mesh(&placed.mesh));
                let texture = images.add(convert_texture(&placed.texture));
                let material = materials.add(StandardMaterial {
                    base_color_texture: Some(texture),
                    unlit: true,
                    cull_mode: None,
                    ..Default::default()
                });

                let mut entity = commands.spawn((
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform::from_translation(placed.world_position),
                    TerrainTileMarker {
                        address: placed.address,
                        offset: placed.source_offset,
                    },
                ));
                if params.wireframe {
                    entity.insert(Wireframe);
                }

                state.loaded += 1;
                tracing::info!(
                    x = placed.address.x,
                    y = placed.address.y,
                    z = placed.address.z,
                    dx = placed.source_offset.dx,
                    dy = placed.source_offset.dy,
                    "tile placed"
                );
            }
            Err(e) => {
                // Scoped to one tile; siblings keep loading.
                state.failed += 1;
                tracing::warn!(error = %e, "tile failed, skipping");
            }
        }
    }
}
