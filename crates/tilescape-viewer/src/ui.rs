//! Debug UI overlay.
//!
//! Shows FPS, the session's center tile, and tile load progress.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::loader::TerrainState;

/// Plugin for the debug UI overlay.
pub struct DebugUiPlugin;

impl Plugin for DebugUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(EguiPrimaryContextPass, debug_ui_system);
    }
}

/// Render the debug UI overlay.
#[allow(clippy::needless_pass_by_value)]
fn debug_ui_system(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
    state: Res<TerrainState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(bevy::diagnostic::Diagnostic::smoothed)
        .unwrap_or(0.0);

    egui::Window::new("Terrain")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.0}"));

            match &state.session {
                Some(session) => {
                    let center = session.center();
                    ui.label(format!(
                        "Center tile: {}/{}/{}",
                        center.z, center.x, center.y
                    ));
                    ui.label(format!(
                        "Tiles: {} placed, {} failed, {} pending",
                        state.loaded,
                        state.failed,
                        state.pending()
                    ));
                }
                None => {
                    ui.label("Resolving location...");
                }
            }

            ui.separator();
            ui.label("Controls:");
            ui.label("  Left drag - Orbit");
            ui.label("  Scroll - Zoom");
        });

    Ok(())
}
