use bevy::prelude::*;
use bevy::render::mesh::{MeshVertexAttribute, VertexAttributeValues};
use bevy::render::render_resource::VertexFormat;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

/// Quad corner in `[-1, 1]^2`, expanded to a screen-aligned sprite in the vertex shader.
pub const ATTRIBUTE_CORNER: MeshVertexAttribute =
    MeshVertexAttribute::new("SpriteCorner", 988_540_917, VertexFormat::Float32x2);

/// Per-point scalar, fall speed for rain.
pub const ATTRIBUTE_POINT_PARAM: MeshVertexAttribute =
    MeshVertexAttribute::new("SpriteParam", 988_540_918, VertexFormat::Float32);

const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// One point before expansion into its sprite quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpritePoint {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
    pub param: f32,
}

impl SpritePoint {
    pub fn colored(position: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            color: [color[0], color[1], color[2], 1.0],
            uv: [0.0, 0.0],
            param: 0.0,
        }
    }
}

/// Create a triangle list with 6 vertices per point. Every vertex of a quad
/// carries the point centre; the shader offsets it by the corner attribute.
pub fn create_point_sprite_mesh(points: &[SpritePoint]) -> Mesh {
    let vertex_count = points.len() * 6;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut colors = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut corners = Vec::with_capacity(vertex_count);
    let mut params = Vec::with_capacity(vertex_count);

    for point in points {
        for corner in QUAD_CORNERS {
            positions.push(point.position);
            colors.push(point.color);
            uvs.push(point.uv);
            corners.push(corner);
            params.push(point.param);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(ATTRIBUTE_CORNER, corners);
    mesh.insert_attribute(ATTRIBUTE_POINT_PARAM, params);
    mesh
}

/// Build sprite points from a packed position/colour buffer.
pub fn points_from_buffer(positions: &[[f32; 3]], colors: &[[f32; 3]]) -> Vec<SpritePoint> {
    positions
        .iter()
        .zip(colors)
        .map(|(position, color)| SpritePoint::colored(*position, *color))
        .collect()
}

/// Re-emit every vertex of a textured surface as a point carrying its UV.
/// Returns `None` when the mesh lacks positions or texture coordinates.
pub fn points_from_surface(mesh: &Mesh) -> Option<Vec<SpritePoint>> {
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let Some(VertexAttributeValues::Float32x2(uvs)) = mesh.attribute(Mesh::ATTRIBUTE_UV_0) else {
        return None;
    };

    Some(
        positions
            .iter()
            .zip(uvs)
            .map(|(position, uv)| SpritePoint {
                position: *position,
                color: [1.0; 4],
                uv: *uv,
                param: 0.0,
            })
            .collect(),
    )
}
