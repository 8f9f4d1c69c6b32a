//! Developer tools for tuning the installation.
//!
//! ## Placement Tool
//!
//! The most recently spawned model root becomes the placement target. The host
//! page's sliders edit its transform live through `set_object_transform`, and
//! `copy_config` returns the values to paste into the placement tables.
//!
//! ```text
//! set_object_transform RPC
//!   └─> PlacementEdit event
//!       └─> apply_placement_edits()
//!           └─> Transform of PlacementTarget
//! ```
//!
//! Native builds show the target's transform in an overlay toggled with `H`.

/// Placement target tracking, live transform edits and the native overlay.
pub mod placement;
