//! Orbit camera for inspecting the terrain mosaic.
//!
//! The terrain lies in the world XY plane with +Z up; the camera orbits a
//! focus point with left-drag rotation and scroll-wheel zoom, and is framed
//! on the center tile once the session is planned.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Minimum orbit distance in world units.
const MIN_DISTANCE: f32 = 10.0;
/// Maximum orbit distance in world units.
const MAX_DISTANCE: f32 = 100_000.0;

/// Plugin for orbit camera controls.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_rotate, orbit_zoom, sync_transform).chain());
    }
}

/// Settings for orbit camera motion.
#[derive(Resource)]
pub struct OrbitSettings {
    /// Radians of rotation per pixel of mouse drag.
    pub rotate_sensitivity: f32,
    /// Zoom factor per scroll line.
    pub zoom_sensitivity: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 1.1,
        }
    }
}

/// Orbit state for the camera entity.
#[derive(Component)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at.
    pub focus: Vec3,
    /// Distance from the focus.
    pub distance: f32,
    /// Rotation around the world +Z axis, in radians.
    pub yaw: f32,
    /// Elevation above the XY plane, in radians.
    pub pitch: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 1500.0,
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.6,
        }
    }
}

/// Spawn the viewer camera.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: bevy::camera::ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 1_000_000.0,
            ..Default::default()
        }),
        Transform::default(),
        OrbitCamera::default(),
    ));
}

/// Rotate the orbit with left-drag, unless the pointer is over the UI.
#[allow(clippy::needless_pass_by_value)]
fn orbit_rotate(
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<OrbitSettings>,
    mut contexts: EguiContexts,
    mut query: Query<&mut OrbitCamera>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if !mouse.pressed(MouseButton::Left) || delta == Vec2::ZERO {
        return;
    }

    let egui_wants_pointer = contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.is_pointer_over_area());
    if egui_wants_pointer {
        return;
    }

    for mut orbit in &mut query {
        orbit.yaw -= delta.x * settings.rotate_sensitivity;
        // Keep the camera above the terrain plane and short of the zenith.
        orbit.pitch = (orbit.pitch + delta.y * settings.rotate_sensitivity)
            .clamp(0.05, std::f32::consts::FRAC_PI_2 - 0.05);
    }
}

/// Zoom the orbit with the scroll wheel.
#[allow(clippy::needless_pass_by_value)]
fn orbit_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    settings: Res<OrbitSettings>,
    mut query: Query<&mut OrbitCamera>,
) {
    for event in scroll_events.read() {
        // Normalize scroll value: web reports pixels, native reports lines.
        let scroll = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 120.0,
        };
        if scroll == 0.0 {
            continue;
        }

        let factor = settings.zoom_sensitivity.powf(-scroll);
        for mut orbit in &mut query {
            orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }
}

/// Place the camera transform from its orbit state.
fn sync_transform(mut query: Query<(&OrbitCamera, &mut Transform)>) {
    for (orbit, mut transform) in &mut query {
        let offset = Vec3::new(
            orbit.pitch.cos() * orbit.yaw.cos(),
            orbit.pitch.cos() * orbit.yaw.sin(),
            orbit.pitch.sin(),
        ) * orbit.distance;

        *transform = Transform::from_translation(orbit.focus + offset)
            .looking_at(orbit.focus, Vec3::Z);
    }
}
