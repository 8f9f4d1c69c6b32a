//! The neon room every scene plays inside.
//!
//! Builds the five emissive grid walls and the room lighting once at startup;
//! scenes never touch these entities.

/// Ambient and breathing point light.
pub mod lighting;

/// Grid-lined walls from the configured room dimensions.
pub mod room;
