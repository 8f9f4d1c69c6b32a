//! Rendering configuration for the neon room.
//!
//! Point sprites are drawn through a single Bevy [`Material`] whose vertex
//! stage expands each point into a camera-facing quad. Post-processing is the
//! camera's HDR bloom, tuned per scene.

/// Bloom strength resource and its application to the room camera.
pub mod bloom;

/// Point sprite material covering procedural garden points, fireflies, rain and textured imports.
///
/// ## Material Bindings (@group(2))
/// - `0`: `PointSpriteUniform` (kind, size, opacity, time, flash, pulse radius, camera)
/// - `1`/`2`: optional surface texture and sampler
pub mod point_sprite_material;
