//! Shared tunables for the neon garden room workspace.
//!
//! Values here are consumed both by the offline generator crate and by the
//! engine, so they stay free of any engine types.

/// Room geometry, lighting, camera and tracking defaults.
pub mod room;

/// Procedural garden tuning and model placement tables.
pub mod garden;

/// Rain, firefly, lightning and energy-pulse tuning.
pub mod effects;

/// Storm scene presets.
pub mod storm;
