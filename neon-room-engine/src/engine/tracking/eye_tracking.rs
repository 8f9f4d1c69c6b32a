use bevy::prelude::*;
use constants::room::{LEFT_EYE_LANDMARK, RIGHT_EYE_LANDMARK};

use super::CollaboratorStatus;
use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::camera::head_tracked_camera::EyePosition;

/// Most recent face landmark frame in normalised image coordinates.
/// Taken by the next frame update; `None` means no face this frame.
#[derive(Resource, Debug, Default)]
pub struct LatestLandmarks {
    pub frame: Option<Vec<Vec2>>,
}

/// Eye target in room units from the pupil midpoint's offset to image centre.
pub fn eye_target(landmarks: &[Vec2], settings: &RoomSettings) -> Option<Vec2> {
    let left = landmarks.get(LEFT_EYE_LANDMARK)?;
    let right = landmarks.get(RIGHT_EYE_LANDMARK)?;
    let mid = (*left + *right) * 0.5;

    let sensitivity = settings.tracking.sensitivity;
    Some(Vec2::new(
        (0.5 - mid.x) * settings.monitor.width * sensitivity,
        (0.5 - mid.y) * settings.monitor.height * sensitivity,
    ))
}

/// One step of exponential smoothing.
pub fn smooth_toward(current: f32, target: f32, smoothing: f32) -> f32 {
    current + (target - current) * smoothing
}

pub fn update_eye_position(
    mut landmarks: ResMut<LatestLandmarks>,
    status: Res<CollaboratorStatus>,
    settings: Res<RoomSettings>,
    mut eye: ResMut<EyePosition>,
) {
    let Some(frame) = landmarks.frame.take() else {
        return;
    };
    if status.head_tracking_disabled {
        return;
    }
    let Some(target) = eye_target(&frame, &settings) else {
        return;
    };

    let smoothing = settings.motion.smoothing;
    eye.0.x = smooth_toward(eye.0.x, target.x, smoothing);
    eye.0.y = smooth_toward(eye.0.y, target.y, smoothing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn face_at(x: f32, y: f32) -> Vec<Vec2> {
        let mut landmarks = vec![Vec2::splat(0.5); 478];
        landmarks[LEFT_EYE_LANDMARK] = Vec2::new(x - 0.05, y);
        landmarks[RIGHT_EYE_LANDMARK] = Vec2::new(x + 0.05, y);
        landmarks
    }

    #[test]
    fn test_eye_target_from_midpoint() {
        let settings = RoomSettings::default();
        let target = eye_target(&face_at(0.4, 0.55), &settings).unwrap();

        // (0.5 - 0.4) * 32 * 12 and (0.5 - 0.55) * 20 * 12
        assert!((target.x - 38.4).abs() < 1e-3);
        assert!((target.y + 12.0).abs() < 1e-3);
    }

    #[test]
    fn test_short_landmark_frame_is_ignored() {
        let settings = RoomSettings::default();
        assert_eq!(eye_target(&[Vec2::ZERO; 200], &settings), None);
    }

    #[test]
    fn test_smoothing_converges_within_fifteen_frames() {
        let mut world = World::new();
        world.insert_resource(RoomSettings::default());
        world.init_resource::<CollaboratorStatus>();
        world.init_resource::<LatestLandmarks>();
        world.init_resource::<EyePosition>();

        let face = face_at(0.4, 0.55);
        let target = eye_target(&face, &RoomSettings::default()).unwrap();

        for _ in 0..15 {
            world.resource_mut::<LatestLandmarks>().frame = Some(face.clone());
            world.run_system_once(update_eye_position).unwrap();
        }

        let eye = world.resource::<EyePosition>().0;
        assert!((eye.x - target.x).abs() <= target.x.abs() * 0.01);
        assert!((eye.y - target.y).abs() <= target.y.abs() * 0.01);
        assert_eq!(eye.z, 60.0);
    }

    #[test]
    fn test_disabled_tracking_keeps_estimate() {
        let mut world = World::new();
        world.insert_resource(RoomSettings::default());
        world.insert_resource(CollaboratorStatus {
            head_tracking_disabled: true,
            ..default()
        });
        world.insert_resource(LatestLandmarks {
            frame: Some(face_at(0.1, 0.1)),
        });
        world.init_resource::<EyePosition>();

        world.run_system_once(update_eye_position).unwrap();

        assert_eq!(*world.resource::<EyePosition>(), EyePosition::default());
    }
}
