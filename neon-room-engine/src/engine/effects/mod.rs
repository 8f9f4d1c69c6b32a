//! Dynamic effects that bring the room to life.
//!
//! Each effect keeps its live material handle in a resource owned by the scene
//! that spawned it; per-frame systems push time, flash and camera state into
//! those materials.

/// Camera-reactive ambient firefly swarm of the garden scene.
pub mod fireflies;

/// Expanding energy ring that occasionally sweeps the garden.
pub mod energy_pulse;

/// Lightning flash state, strike counting and randomised strike delays.
pub mod lightning;

/// Falling rain field of the storm scenes.
pub mod rain;
