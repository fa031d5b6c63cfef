//! Conversion of pipeline meshes to Bevy assets.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use tilescape::{SpiralOffset, TerrainMesh, TileAddress, TileTexture};

/// Convert a terrain mesh to a Bevy mesh.
///
/// Positions are tile-local; the entity's `Transform` carries the world
/// placement. Materials are unlit, so no normals are generated.
pub fn convert_mesh(terrain: &TerrainMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = terrain.positions.iter().map(|p| p.to_array()).collect();
    let uvs: Vec<[f32; 2]> = terrain.uvs.iter().map(|uv| uv.to_array()).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(terrain.indices.clone()));
    mesh
}

/// Create a Bevy image from a decoded tile texture.
pub fn convert_texture(texture: &TileTexture) -> Image {
    use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

    Image::new(
        Extent3d {
            width: texture.width,
            height: texture.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        texture.data.clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}

/// Component marking an entity as a placed terrain tile.
#[derive(Component)]
pub struct TerrainTileMarker {
    /// Address of the source tile.
    #[allow(dead_code)]
    pub address: TileAddress,
    /// Spiral offset the tile was placed at.
    #[allow(dead_code)]
    pub offset: SpiralOffset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilescape::HeightField;

    fn sample_mesh() -> TerrainMesh {
        let field = HeightField::from_rgba(&[7u8; 4 * 9]).unwrap();
        tilescape_decode::synthesize(&field, 100.0).unwrap()
    }

    #[test]
    fn test_convert_mesh_attributes() {
        let terrain = sample_mesh();
        let mesh = convert_mesh(&terrain);

        assert_eq!(mesh.count_vertices(), terrain.vertex_count());
        match mesh.indices() {
            Some(Indices::U32(indices)) => assert_eq!(indices.len(), terrain.indices.len()),
            other => panic!("unexpected indices: {other:?}"),
        }
    }

    #[test]
    fn test_convert_texture_dimensions() {
        let texture = TileTexture {
            data: vec![0; 4 * 4 * 4],
            width: 4,
            height: 4,
        };
        let image = convert_texture(&texture);
        assert_eq!(image.texture_descriptor.size.width, 4);
        assert_eq!(image.texture_descriptor.size.height, 4);
    }
}
