//! JSON-RPC 2.0 bridge to the page hosting the room.
//!
//! The room runs in an iframe. The page owns the scene buttons, placement
//! sliders, webcam face landmarker and microphone analyser, and talks to the
//! engine over `postMessage`. Landmark frames and spectrum bins arrive as
//! notifications every frame and are stored for the tracking systems; scene and
//! placement commands may arrive either as requests (answered with the same id)
//! or as fire-and-forget notifications.
//!
//! ```text
//! page ── face_landmarks / audio_spectrum ──> LatestLandmarks / AudioSpectrum
//! page ── switch_scene {scene} ─────────────> SwitchSceneEvent
//! page ── set_object_transform {...} ───────> PlacementEdit
//! page <── scene_changed / scene_load_failed ─ scene controller
//! page <── fps_update ──────────────────────── fps tracking (every 0.5 s)
//! ```
//!
//! ## Requests
//! - `switch_scene {scene}`: replace the active scene (1-4)
//! - `get_scene`: active scene number, 0 before the first load
//! - `get_fps`: smoothed frame rate
//! - `set_object_transform {x?, y?, z?, rot_y?, scale?}`: edit the placement target
//! - `copy_config`: return the target's transform and broadcast it as `placement_config`
//!
//! ## Notifications from the page
//! - `face_landmarks {landmarks: [{x, y}, ...]}`
//! - `audio_spectrum {bins: [u8]}`
//! - `collaborator_error {kind, feature?, id?, detail?}`: disables the affected feature
//!
//! ## Errors
//! - `-32700`: message is not JSON (answered with `id: null`)
//! - `-32600`: JSON that is not a 2.0 request object
//! - `-32601`: unknown method
//! - `-32602`: bad params, e.g. a scene outside 1-4
//! - `-32603`: nothing to report, e.g. `copy_config` without a placement target

/// Message types, the plugin that pumps them and the method handlers.
pub mod web_rpc;
