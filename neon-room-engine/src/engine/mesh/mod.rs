//! Mesh generation for point sprite rendering primitives.
//!
//! Points are expanded into screen-aligned quads in the vertex shader, so each
//! point is stored as six vertices sharing one centre.

/// Point sprite mesh construction from generated buffers and imported surfaces.
///
/// Creates triangle-based geometry where each point expands to a quad via vertex shader.
pub mod point_sprite_mesh;
