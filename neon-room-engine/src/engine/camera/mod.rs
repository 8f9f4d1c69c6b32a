//! Off-axis room camera driven by the viewer's head position.
//!
//! The camera sits where the viewer's eyes are estimated to be, scaled by the
//! parallax factor, and always looks at the centre of the room's depth so the
//! screen behaves like a window into the room.

/// Room camera spawn and per-frame head-tracked placement.
pub mod head_tracked_camera;
