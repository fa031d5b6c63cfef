//! World-space placement of synthesized tile meshes.

use glam::Vec3;

use crate::spiral::SpiralOffset;

/// World-space position of a tile mesh at a spiral offset.
///
/// Tile rows grow southward while the rendering world's +Y axis points
/// north, so `dy` is negated; columns grow eastward and map directly onto
/// +X. The terrain plane sits at world Z = 0, with elevation carried by the
/// mesh's own vertices.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn world_position(offset: SpiralOffset, tile_world_size: f32) -> Vec3 {
    Vec3::new(
        offset.dx as f32 * tile_world_size,
        -(offset.dy as f32) * tile_world_size,
        0.0,
    )
}
