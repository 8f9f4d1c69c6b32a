use bevy::core_pipeline::bloom::Bloom;
use bevy::prelude::*;

use crate::engine::camera::head_tracked_camera::RoomCamera;

/// Bloom intensity per unit of configured strength.
const INTENSITY_PER_STRENGTH: f32 = 0.15;

/// Configured bloom strength. Storm scenes raise `strength` and restore
/// `baseline` on unload.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RoomBloom {
    pub baseline: f32,
    pub strength: f32,
}

impl RoomBloom {
    pub fn new(baseline: f32) -> Self {
        Self {
            baseline,
            strength: baseline,
        }
    }

    pub fn reset(&mut self) {
        self.strength = self.baseline;
    }

    pub fn intensity(&self) -> f32 {
        self.strength * INTENSITY_PER_STRENGTH
    }
}

impl Default for RoomBloom {
    fn default() -> Self {
        Self::new(constants::room::BLOOM_STRENGTH)
    }
}

pub fn apply_room_bloom(room_bloom: Res<RoomBloom>, mut cameras: Query<&mut Bloom, With<RoomCamera>>) {
    if !room_bloom.is_changed() {
        return;
    }
    for mut bloom in &mut cameras {
        bloom.intensity = room_bloom.intensity();
    }
}
