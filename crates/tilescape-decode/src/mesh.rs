//! Displacement mesh synthesis.
//!
//! Turns a decoded height field into a regular grid mesh in tile-local
//! space, built as a single immutable value: vertices, UVs, and triangle
//! indices are fully formed before the mesh is returned, and nothing mutates
//! it afterward.

use glam::{Vec2, Vec3};

use crate::error::{DecodeError, DecodeResult};
use crate::heightfield::HeightField;

/// A terrain mesh in tile-local space, ready for rendering.
///
/// The grid is centered at the local origin in the XY plane and spans
/// exactly `tile_world_size` along both axes, with +X east, +Y north, and
/// vertex Z displaced by the height samples. Triangles are wound
/// counter-clockwise so surface normals point along +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    /// Vertex positions, row-major from the tile's top-left corner.
    pub positions: Vec<Vec3>,
    /// Per-vertex texture coordinates; `(0,0)` top-left, `(1,1)` bottom-right.
    pub uvs: Vec<Vec2>,
    /// Triangle list indices, three per face.
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangular faces.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Synthesize a displacement mesh from a height field.
///
/// An `N`x`N` field produces `N*N` vertices and `2*(N-1)^2` triangles, with
/// in-plane spacing `tile_world_size / (N - 1)`.
///
/// # Errors
///
/// Returns [`DecodeError::DegenerateHeightField`] if the field side is
/// smaller than 2 (no grid cell can be formed).
pub fn synthesize(field: &HeightField, tile_world_size: f32) -> DecodeResult<TerrainMesh> {
    let n = field.side();
    if n < 2 {
        return Err(DecodeError::DegenerateHeightField { side: n });
    }

    #[allow(clippy::cast_precision_loss)]
    let span = (n - 1) as f32;
    let spacing = tile_world_size / span;
    let half = tile_world_size / 2.0;

    let mut positions = Vec::with_capacity(n * n);
    let mut uvs = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let (c, r) = (col as f32, row as f32);
            // Row 0 is the tile's northern edge, so it sits at +Y.
            positions.push(Vec3::new(
                c * spacing - half,
                half - r * spacing,
                field.get(row, col),
            ));
            uvs.push(Vec2::new(c / span, r / span));
        }
    }

    let mut indices = Vec::with_capacity(6 * (n - 1) * (n - 1));
    for row in 0..n - 1 {
        for col in 0..n - 1 {
            #[allow(clippy::cast_possible_truncation)]
            let a = (row * n + col) as u32;
            let b = a + 1;
            #[allow(clippy::cast_possible_truncation)]
            let c = a + n as u32;
            let d = c + 1;
            // Both triangles split along the b-c diagonal, wound CCW as
            // seen from +Z.
            indices.extend([a, c, b, b, c, d]);
        }
    }

    Ok(TerrainMesh {
        positions,
        uvs,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_field(side: usize, value: u8) -> HeightField {
        HeightField::from_rgba(&vec![value; side * side * 4]).unwrap()
    }

    #[test]
    fn test_counts_for_4x4() {
        let mesh = synthesize(&uniform_field(4, 0), 100.0).unwrap();
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.triangle_count(), 18);
        assert_eq!(mesh.uvs.len(), 16);
    }

    #[test]
    fn test_heights_carried_through() {
        // Distinct blue channel per pixel of a 2x2 tile.
        let mut buffer = Vec::new();
        for b in [10u8, 20, 30, 40] {
            buffer.extend_from_slice(&[0, 0, b, 255]);
        }
        let field = HeightField::from_rgba(&buffer).unwrap();
        let mesh = synthesize(&field, 2.0).unwrap();

        for (i, position) in mesh.positions.iter().enumerate() {
            assert_eq!(position.z, field.samples()[i]);
        }
    }

    #[test]
    fn test_grid_spans_tile_size() {
        let mesh = synthesize(&uniform_field(5, 0), 100.0).unwrap();

        // Top-left vertex.
        assert_eq!(mesh.positions[0].x, -50.0);
        assert_eq!(mesh.positions[0].y, 50.0);
        // Bottom-right vertex.
        let last = mesh.positions.last().unwrap();
        assert_eq!(last.x, 50.0);
        assert_eq!(last.y, -50.0);
    }

    #[test]
    fn test_uv_corners() {
        let mesh = synthesize(&uniform_field(3, 0), 1.0).unwrap();
        assert_eq!(mesh.uvs[0], Vec2::new(0.0, 0.0));
        assert_eq!(*mesh.uvs.last().unwrap(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_winding_faces_up() {
        let mesh = synthesize(&uniform_field(2, 0), 1.0).unwrap();
        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                .map(|i| mesh.positions[i as usize]);
            let normal = (b - a).cross(c - a);
            assert!(normal.z > 0.0, "triangle {triangle:?} winds downward");
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = synthesize(&uniform_field(6, 0), 10.0).unwrap();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_degenerate_field_rejected() {
        let field = uniform_field(1, 0);
        assert!(matches!(
            synthesize(&field, 1.0),
            Err(DecodeError::DegenerateHeightField { side: 1 })
        ));
    }
}
