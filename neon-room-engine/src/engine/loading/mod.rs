//! Startup loading and runtime model import.
//!
//! Startup waits for the room settings, then builds the room. At runtime the
//! model cache fetches imported models once per URL and the spawner turns
//! cached models into scene entities.

/// glTF-backed model source built on the asset server.
pub mod gltf_source;

/// Process-wide model cache and the model source seam.
///
/// Loads each URL at most once per session and memoises point conversions.
pub mod model_cache;

/// Instantiates cached models as animated scenes or textured point clouds.
pub mod model_spawner;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Camera, wall and light construction once settings are available.
pub mod room_builder;

/// Room settings file loading with fallback to defaults.
pub mod settings_loader;
