//! Geographic origin resolution.
//!
//! Tries IP-based geolocation first; if the service is unreachable or
//! returns an unusable coordinate, falls back to the coordinate supplied on
//! the command line. The terrain pipeline itself never guesses a location -
//! it is only invoked once an origin has been resolved here.

use bevy::prelude::*;
use serde::Deserialize;
use tilescape::GeoCoordinate;

use crate::async_runtime::TaskSpawner;
use crate::launch_params::LaunchParams;

/// Plugin for resolving the session origin.
pub struct GeolocatePlugin;

impl Plugin for GeolocatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OriginState>()
            .add_systems(Startup, start_geolocate)
            .add_systems(Update, poll_geolocate);
    }
}

/// Geolocation endpoint returning `{"lat": .., "lon": ..}` for the caller's IP.
const GEOLOCATE_URL: &str = "http://ip-api.com/json?fields=lat,lon";

/// State of origin resolution.
#[derive(Resource)]
pub struct OriginState {
    /// The resolved origin, once available.
    resolved: Option<GeoCoordinate>,
    result_rx: async_channel::Receiver<Result<GeoCoordinate, String>>,
    result_tx: async_channel::Sender<Result<GeoCoordinate, String>>,
}

impl Default for OriginState {
    fn default() -> Self {
        let (result_tx, result_rx) = async_channel::bounded(1);
        Self {
            resolved: None,
            result_rx,
            result_tx,
        }
    }
}

impl OriginState {
    /// The resolved origin coordinate, if resolution has finished.
    pub fn resolved(&self) -> Option<GeoCoordinate> {
        self.resolved
    }
}

/// Kick off geolocation, or resolve immediately from the fallback.
#[allow(clippy::needless_pass_by_value)]
fn start_geolocate(
    params: Res<LaunchParams>,
    mut state: ResMut<OriginState>,
    spawner: TaskSpawner,
) {
    if params.no_geolocate {
        state.resolved = Some(fallback_coordinate(&params));
        tracing::info!(lat = params.lat, lon = params.lon, "using fallback origin");
        return;
    }

    let tx = state.result_tx.clone();
    spawner.spawn(async move {
        let result = fetch_location().await;
        let _ = tx.send(result).await;
    });
    tracing::info!("started geolocation");
}

/// Resolve the origin from the geolocation result, or the fallback on error.
#[allow(clippy::needless_pass_by_value)]
fn poll_geolocate(params: Res<LaunchParams>, mut state: ResMut<OriginState>) {
    if state.resolved.is_some() {
        return;
    }

    let Ok(result) = state.result_rx.try_recv() else {
        return;
    };

    match result {
        Ok(origin) => {
            tracing::info!(
                lat = origin.latitude(),
                lon = origin.longitude(),
                "geolocation resolved"
            );
            state.resolved = Some(origin);
        }
        Err(message) => {
            tracing::warn!(%message, "location unavailable, using fallback origin");
            state.resolved = Some(fallback_coordinate(&params));
        }
    }
}

/// The caller-supplied fallback coordinate.
///
/// Falls back to the compiled-in default if the CLI values are somehow out
/// of range; clap cannot range-check floats for us.
fn fallback_coordinate(params: &LaunchParams) -> GeoCoordinate {
    GeoCoordinate::new(params.lat, params.lon).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "fallback coordinate out of range, using default");
        GeoCoordinate::new(40.0, -105.0).expect("default coordinate is valid")
    })
}

/// Fetch the device's approximate coordinate from the geolocation service.
async fn fetch_location() -> Result<GeoCoordinate, String> {
    #[derive(Debug, Deserialize)]
    struct Response {
        lat: f64,
        lon: f64,
    }

    let response = reqwest::get(GEOLOCATE_URL)
        .await
        .map_err(|e| format!("geolocation request failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("geolocation HTTP {}", response.status()));
    }

    let data: Response = response
        .json()
        .await
        .map_err(|e| format!("failed to parse geolocation response: {e}"))?;

    GeoCoordinate::new(data.lat, data.lon)
        .map_err(|e| format!("geolocation returned invalid coordinate: {e}"))
}
