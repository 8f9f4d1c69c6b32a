//! Diagnostics systems shared by every scene.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to the host page via RPC and updates native UI overlays.
pub mod fps_tracking;
