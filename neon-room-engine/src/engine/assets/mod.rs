//! Configuration assets loaded through the asset server.
//!
//! Room settings ship as JSON beside the other assets and are deserialised
//! through `bevy_common_assets`, so a host can restyle the room without a
//! rebuild.

/// Room, visual, camera, motion, tracking, audio and garden settings.
pub mod room_settings;
