//! Scene lifecycle for the four installation scenes.
//!
//! A scene owns the entities it spawned, the scheduler tokens of the tasks it
//! started and the models it is still waiting on. Transitions always unload
//! the outgoing scene completely before the incoming scene starts loading.
//!
//! ## Scenes
//!
//! | # | Scene | Contents |
//! |---|-------|----------|
//! | 1 | Empty room | nothing beyond the neon room |
//! | 2 | Garden | hybrid procedural garden with imported models, fireflies |
//! | 3 | Flower storm | animated flower centrepiece, rain, lightning, storm bloom |
//! | 4 | Space storm | animated space centrepiece, rain, lightning, storm bloom |

use bevy::prelude::*;
use constants::storm::{FLOWER_STORM, SPACE_STORM, StormPreset};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Scene state machine, transition protocol and per-frame scene loading.
pub mod controller;

/// Empty room scene.
pub mod empty_room;

/// Hybrid garden scene with firefly swarm.
pub mod garden;

/// Ownership record of the active scene.
pub mod handle;

/// Cancellable timers and per-frame tasks owned by scenes.
pub mod scheduler;

/// Storm scenes parametrised by their centrepiece preset.
pub mod storm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    EmptyRoom,
    Garden,
    FlowerStorm,
    SpaceStorm,
}

/// What a scene does, with the storm scenes sharing one implementation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneKind {
    EmptyRoom,
    Garden,
    Storm(StormPreset),
}

impl SceneId {
    pub const ALL: [SceneId; 4] = [
        SceneId::EmptyRoom,
        SceneId::Garden,
        SceneId::FlowerStorm,
        SceneId::SpaceStorm,
    ];

    /// Scene for its 1-based button number.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(SceneId::EmptyRoom),
            2 => Some(SceneId::Garden),
            3 => Some(SceneId::FlowerStorm),
            4 => Some(SceneId::SpaceStorm),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            SceneId::EmptyRoom => 1,
            SceneId::Garden => 2,
            SceneId::FlowerStorm => 3,
            SceneId::SpaceStorm => 4,
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            SceneId::EmptyRoom => SceneKind::EmptyRoom,
            SceneId::Garden => SceneKind::Garden,
            SceneId::FlowerStorm => SceneKind::Storm(FLOWER_STORM),
            SceneId::SpaceStorm => SceneKind::Storm(SPACE_STORM),
        }
    }

    /// Next scene in the 1 → 2 → 3 → 4 → 1 cycle.
    pub fn next(&self) -> Self {
        next_in_cycle(self.number())
    }
}

/// Scene after `current` in the cycle, where 0 means no scene is loaded yet.
pub fn next_in_cycle(current: u8) -> SceneId {
    let next = (current % constants::room::SCENE_COUNT) + 1;
    SceneId::from_number(next).unwrap_or(SceneId::EmptyRoom)
}

/// Top-level entity spawned and owned by a scene.
#[derive(Component)]
pub struct SceneObject;

/// Randomness for scene content and effects. Seeded from entropy at startup.
#[derive(Resource)]
pub struct SceneRng(pub ChaCha8Rng);

impl Default for SceneRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}
