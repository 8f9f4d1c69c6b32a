use bevy::prelude::*;
use constants::room::*;

/// Ambient brightness per unit of configured ambient intensity.
const AMBIENT_BRIGHTNESS_SCALE: f32 = 320.0;

/// Point light whose intensity oscillates around `base`.
#[derive(Component, Debug, Clone, Copy)]
pub struct BreathingLight {
    pub base: f32,
}

/// Intensity at `t` seconds.
pub fn breath_intensity(base: f32, t: f32) -> f32 {
    base * (1.0 + LIGHT_BREATH_AMPLITUDE * (t * LIGHT_BREATH_RATE).sin())
}

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_LIGHT_BRIGHTNESS * AMBIENT_BRIGHTNESS_SCALE,
        ..default()
    });

    commands.spawn((
        PointLight {
            color: Color::WHITE,
            intensity: POINT_LIGHT_INTENSITY,
            range: POINT_LIGHT_RANGE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(POINT_LIGHT_POSITION)),
        BreathingLight {
            base: POINT_LIGHT_INTENSITY,
        },
        Name::new("Room light"),
    ));
}

pub fn breathe_point_light(time: Res<Time>, mut lights: Query<(&mut PointLight, &BreathingLight)>) {
    let t = time.elapsed_secs();
    for (mut light, breathing) in &mut lights {
        light.intensity = breath_intensity(breathing.base, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breath_stays_within_ten_percent() {
        let base = POINT_LIGHT_INTENSITY;
        for step in 0..200 {
            let value = breath_intensity(base, step as f32 * 0.05);
            assert!(value >= base * 0.9 - 1.0 && value <= base * 1.1 + 1.0);
        }
        assert_eq!(breath_intensity(2.0, 0.0), 2.0);
    }
}
