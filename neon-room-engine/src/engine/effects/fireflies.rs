use bevy::prelude::*;
use constants::effects::*;
use rand::Rng;

use crate::engine::camera::head_tracked_camera::RoomCamera;
use crate::engine::mesh::point_sprite_mesh::SpritePoint;
use crate::engine::render::point_sprite_material::PointSpriteMaterial;

/// Material of the live firefly swarm, if the garden scene has one.
#[derive(Resource, Debug, Default)]
pub struct FireflySwarm {
    pub material: Option<Handle<PointSpriteMaterial>>,
    pub time: f32,
}

/// Warm gold points spread through the room volume.
pub fn generate_fireflies(count: usize, rng: &mut impl Rng) -> Vec<SpritePoint> {
    (0..count)
        .map(|_| {
            let position = [
                (rng.gen_range(0.0..1.0) - 0.5) * FIREFLY_SPREAD_X,
                FIREFLY_MIN_Y + rng.gen_range(0.0..1.0) * FIREFLY_SPREAD_Y,
                (rng.gen_range(0.0..1.0) - 0.5) * FIREFLY_SPREAD_Z,
            ];
            let color = [1.0, 0.8 + rng.gen_range(0.0..1.0) * 0.2, 0.2];
            SpritePoint::colored(position, color)
        })
        .collect()
}

/// Advance drift time and feed the camera position used for proximity glow.
pub fn update_fireflies(
    mut swarm: ResMut<FireflySwarm>,
    cameras: Query<&Transform, With<RoomCamera>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
) {
    swarm.time += EFFECT_TIME_STEP;

    let Some(handle) = swarm.material.as_ref() else {
        return;
    };
    let Some(material) = materials.get_mut(handle) else {
        return;
    };

    material.params.time = swarm.time;
    if let Ok(camera) = cameras.single() {
        material.params.camera_position = camera.translation.extend(1.0);
    }
}
