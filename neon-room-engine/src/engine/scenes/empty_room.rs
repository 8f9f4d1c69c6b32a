use bevy::prelude::*;

use super::handle::SceneHandle;

/// Nothing to spawn; the room itself is always present.
pub fn load(handle: &mut SceneHandle) {
    info!("Scene {}: empty neon room", handle.id.number());
}
