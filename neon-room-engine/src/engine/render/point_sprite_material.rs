/// Point sprite material shared by the garden, effects and textured imports
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use constants::effects::{FIREFLY_GLOW_DISTANCE, PULSE_MAX_RADIUS};

use crate::engine::mesh::point_sprite_mesh::{ATTRIBUTE_CORNER, ATTRIBUTE_POINT_PARAM};

const SHADER_PATH: &str = "shaders/point_sprite.wgsl";

/// Branch selector read by the shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSpriteKind {
    Garden = 0,
    Firefly = 1,
    Rain = 2,
    Textured = 3,
}

#[derive(Debug, Clone, Copy, ShaderType)]
#[repr(C)]
pub struct PointSpriteUniform {
    pub kind: u32,
    /// Garden: attenuated size factor. Textured: pixels at unit depth. Unused by effects.
    pub size: f32,
    pub opacity: f32,
    pub time: f32,
    pub flash: f32,
    pub pulse_radius: f32,
    pub glow_distance: f32,
    pub _padding: f32,
    pub camera_position: Vec4,
}

impl PointSpriteUniform {
    fn new(kind: PointSpriteKind, size: f32, opacity: f32) -> Self {
        Self {
            kind: kind as u32,
            size,
            opacity,
            time: 0.0,
            flash: 0.0,
            // Ring stays off until a pulse writes a smaller radius
            pulse_radius: PULSE_MAX_RADIUS,
            glow_distance: FIREFLY_GLOW_DISTANCE,
            _padding: 0.0,
            camera_position: Vec4::ZERO,
        }
    }
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct PointSpriteMaterial {
    #[uniform(0)]
    pub params: PointSpriteUniform,

    #[texture(1)]
    #[sampler(2)]
    pub texture: Option<Handle<Image>>,

    pub alpha_mode: AlphaMode,
}

impl PointSpriteMaterial {
    /// Vertex-coloured procedural points blended additively.
    pub fn garden(size: f32, opacity: f32) -> Self {
        Self {
            params: PointSpriteUniform::new(PointSpriteKind::Garden, size, opacity),
            texture: None,
            alpha_mode: AlphaMode::Add,
        }
    }

    pub fn firefly() -> Self {
        Self {
            params: PointSpriteUniform::new(PointSpriteKind::Firefly, 0.0, 0.8),
            texture: None,
            alpha_mode: AlphaMode::Add,
        }
    }

    pub fn rain() -> Self {
        Self {
            params: PointSpriteUniform::new(PointSpriteKind::Rain, 0.0, 0.8),
            texture: None,
            alpha_mode: AlphaMode::Add,
        }
    }

    /// Texture-sampling points for an imported surface. `size` is the on-screen
    /// diameter in pixels at unit view depth.
    pub fn textured(texture: Handle<Image>, size: f32) -> Self {
        Self {
            params: PointSpriteUniform::new(PointSpriteKind::Textured, size, 1.0),
            texture: Some(texture),
            alpha_mode: AlphaMode::Blend,
        }
    }

    pub fn kind(&self) -> u32 {
        self.params.kind
    }
}

impl Material for PointSpriteMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(1),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(2),
            ATTRIBUTE_CORNER.at_shader_location(3),
            ATTRIBUTE_POINT_PARAM.at_shader_location(4),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Quads face the camera, winding depends on projection.
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_ring_starts_idle() {
        let materials = [
            PointSpriteMaterial::garden(0.03, 0.3),
            PointSpriteMaterial::firefly(),
            PointSpriteMaterial::rain(),
            PointSpriteMaterial::textured(Handle::default(), 40.0),
        ];
        for material in materials {
            assert_eq!(material.params.pulse_radius, PULSE_MAX_RADIUS, "kind {}", material.kind());
        }
    }
}
