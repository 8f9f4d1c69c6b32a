use bevy::prelude::*;
use constants::effects::*;
use rand::Rng;

use crate::engine::render::point_sprite_material::PointSpriteMaterial;
use crate::engine::scenes::SceneId;
use crate::engine::scenes::controller::SceneController;
use crate::engine::scenes::SceneRng;

/// Points whose material follows the expanding pulse ring.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PulseReceiver;

/// Expanding ring. Starts at zero so the garden greets the viewer with one pulse.
#[derive(Resource, Debug, Default)]
pub struct EnergyPulse {
    pub radius: f32,
    pub pulses: u32,
}

impl EnergyPulse {
    pub fn trigger(&mut self) {
        self.radius = 0.0;
        self.pulses += 1;
        info!("Energy pulse triggered");
    }

    /// Grow the ring, returns whether it moved.
    pub fn advance(&mut self) -> bool {
        if self.radius >= PULSE_MAX_RADIUS {
            return false;
        }
        self.radius += PULSE_SPEED;
        true
    }
}

/// Grow the ring and, while the garden is settled, roll for a new pulse.
/// There is no minimum or maximum interval between pulses.
pub fn update_energy_pulse(
    mut pulse: ResMut<EnergyPulse>,
    controller: Res<SceneController>,
    mut rng: ResMut<SceneRng>,
    receivers: Query<&MeshMaterial3d<PointSpriteMaterial>, With<PulseReceiver>>,
    mut materials: ResMut<Assets<PointSpriteMaterial>>,
) {
    if pulse.advance() {
        for material in &receivers {
            if let Some(material) = materials.get_mut(&material.0) {
                material.params.pulse_radius = pulse.radius;
            }
        }
    }

    let in_garden =
        controller.current() == Some(SceneId::Garden) && !controller.is_transitioning();
    if in_garden && rng.0.gen_bool(PULSE_CHANCE_PER_FRAME) {
        pulse.trigger();
    }
}
