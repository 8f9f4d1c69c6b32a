//! Animation playback for imported models.

/// Ping-pong clip mixers registered per spawned model and cleared on every scene switch.
pub mod mixers;
