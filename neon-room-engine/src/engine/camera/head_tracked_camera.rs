use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::room::INITIAL_EYE_POSITION;

use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::render::bloom::RoomBloom;

#[derive(Component)]
pub struct RoomCamera;

/// Smoothed eye position in room units, updated from face landmarks.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct EyePosition(pub Vec3);

impl Default for EyePosition {
    fn default() -> Self {
        Self(Vec3::from_array(INITIAL_EYE_POSITION))
    }
}

/// Point the camera always looks at.
pub fn room_focus(settings: &RoomSettings) -> Vec3 {
    Vec3::new(0.0, 0.0, -settings.room.depth / 2.0)
}

pub fn spawn_room_camera(commands: &mut Commands, settings: &RoomSettings, bloom: &RoomBloom) {
    let transform = Transform::from_xyz(0.0, 0.0, settings.camera.initial_z)
        .looking_at(room_focus(settings), Vec3::Y);

    commands.spawn((
        Camera3d::default(),
        Camera {
            hdr: true,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Tonemapping::None,
        Bloom {
            intensity: bloom.intensity(),
            ..Bloom::NATURAL
        },
        Projection::Perspective(PerspectiveProjection {
            fov: settings.camera.fov.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        DistanceFog {
            color: Color::BLACK,
            falloff: FogFalloff::Exponential {
                density: settings.visuals.fog_density,
            },
            ..default()
        },
        transform,
        RoomCamera,
        Name::new("Room camera"),
    ));
}

/// Camera translation for an eye estimate, or `None` when motion is off.
pub fn parallax_offset(eye: Vec3, settings: &RoomSettings) -> Option<Vec2> {
    if !settings.motion.enabled {
        return None;
    }
    let factor = settings.motion.parallax_factor;
    Some(Vec2::new(eye.x * factor, eye.y * factor))
}

pub fn update_room_camera(
    eye: Res<EyePosition>,
    settings: Res<RoomSettings>,
    mut cameras: Query<&mut Transform, With<RoomCamera>>,
) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    if let Some(offset) = parallax_offset(eye.0, &settings) {
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }
    transform.look_at(room_focus(&settings), Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallax_scales_eye_position() {
        let settings = RoomSettings::default();
        let offset = parallax_offset(Vec3::new(8.0, -4.0, 60.0), &settings);
        assert_eq!(offset, Some(Vec2::new(2.0, -1.0)));
    }

    #[test]
    fn test_motion_disabled_pins_camera() {
        let mut settings = RoomSettings::default();
        settings.motion.enabled = false;
        assert_eq!(parallax_offset(Vec3::new(8.0, -4.0, 60.0), &settings), None);
    }

    #[test]
    fn test_focus_is_room_depth_centre() {
        let settings = RoomSettings::default();
        assert_eq!(room_focus(&settings), Vec3::new(0.0, 0.0, -35.0));
    }
}
