use bevy::prelude::*;
use constants::effects::*;
use rand::Rng;

use super::lightning::LightningFlash;
use crate::engine::mesh::point_sprite_mesh::SpritePoint;
use crate::engine::render::point_sprite_material::PointSpriteMaterial;

/// Rain material of the active storm scene and its shader clock.
#[derive(Resource, Debug, Default)]
pub struct RainState {
    pub material: Option<Handle<PointSpriteMaterial>>,
    pub time: f32,
}

impl RainState {
    pub fn start(&mut self, material: Handle<PointSpriteMaterial>) {
        self.material = Some(material);
        self.time = 0.0;
    }

    pub fn clear(&mut self) {
        self.material = None;
    }

    /// One frame of the storm scene's rain task.
    pub fn advance(&mut self) {
        self.time += EFFECT_TIME_STEP;
    }
}

/// Drops spread across the ceiling, each with its own fall speed in `param`.
pub fn generate_rain(count: usize, rng: &mut impl Rng) -> Vec<SpritePoint> {
    (0..count)
        .map(|_| SpritePoint {
            position: [
                (rng.gen_range(0.0..1.0) - 0.5) * RAIN_SPREAD_X,
                RAIN_MIN_Y + rng.gen_range(0.0..1.0) * RAIN_SPREAD_Y,
                (rng.gen_range(0.0..1.0) - 0.5) * RAIN_SPREAD_Z,
            ],
            color: [0.0, 1.0, 1.0, 1.0],
            uv: [0.0, 0.0],
            param: RAIN_MIN_SPEED + rng.gen_range(0.0..1.0) * RAIN_SPEED_RANGE,
        })
        .collect()
}

pub fn update_rain_material(
    rain: Res<RainState>,
    lightning: Res<LightningFlash>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
) {
    let Some(handle) = rain.material.as_ref() else {
        return;
    };
    if let Some(material) = materials.get_mut(handle) {
        material.params.time = rain.time;
        material.params.flash = lightning.intensity;
    }
}
