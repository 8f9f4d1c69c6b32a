use bevy::prelude::*;
use serde::Deserialize;
use serde_json::{Value, json};

/// Entity the dev sliders currently edit.
#[derive(Resource, Debug, Default)]
pub struct PlacementTarget {
    pub entity: Option<Entity>,
}

impl PlacementTarget {
    pub fn retarget(&mut self, entity: Entity) {
        self.entity = Some(entity);
    }

    pub fn clear(&mut self) {
        self.entity = None;
    }
}

/// Slider values from the host page. Absent fields leave the transform alone.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PlacementEdit {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
    pub rot_y: Option<f32>,
    pub scale: Option<f32>,
}

impl PlacementEdit {
    pub fn is_empty(&self) -> bool {
        *self == PlacementEdit::default()
    }

    pub fn apply(&self, transform: &mut Transform) {
        if let Some(x) = self.x {
            transform.translation.x = x;
        }
        if let Some(y) = self.y {
            transform.translation.y = y;
        }
        if let Some(z) = self.z {
            transform.translation.z = z;
        }
        if let Some(rot_y) = self.rot_y {
            let (rx, _, rz) = transform.rotation.to_euler(EulerRot::XYZ);
            transform.rotation = Quat::from_euler(EulerRot::XYZ, rx, rot_y, rz);
        }
        if let Some(scale) = self.scale {
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// Position, Euler XYZ rotation and scale in the shape the placement tables use.
pub fn placement_snapshot(transform: &Transform) -> Value {
    let (rx, ry, rz) = transform.rotation.to_euler(EulerRot::XYZ);
    let t = transform.translation;
    let s = transform.scale;
    json!({
        "position": { "x": t.x, "y": t.y, "z": t.z },
        "rotation": { "x": rx, "y": ry, "z": rz },
        "scale": { "x": s.x, "y": s.y, "z": s.z },
    })
}

pub fn apply_placement_edits(
    mut edits: EventReader<PlacementEdit>,
    target: Res<PlacementTarget>,
    mut transforms: Query<&mut Transform>,
) {
    for edit in edits.read() {
        let Some(entity) = target.entity else {
            warn!("Placement edit ignored, no model loaded");
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(entity) else {
            continue;
        };
        edit.apply(&mut transform);
    }
}

#[derive(Component)]
pub struct PlacementOverlay;

pub fn spawn_placement_overlay(mut commands: Commands) {
    commands.spawn((
        Text::new("No placement target"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.0, 1.0, 1.0)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        Visibility::Hidden,
        PlacementOverlay,
    ));
}

pub fn toggle_placement_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut overlays: Query<&mut Visibility, With<PlacementOverlay>>,
) {
    if !keyboard.just_pressed(KeyCode::KeyH) {
        return;
    }
    for mut visibility in &mut overlays {
        *visibility = match *visibility {
            Visibility::Hidden => Visibility::Visible,
            _ => Visibility::Hidden,
        };
    }
}

pub fn update_placement_overlay(
    target: Res<PlacementTarget>,
    transforms: Query<&Transform>,
    mut overlays: Query<&mut Text, With<PlacementOverlay>>,
) {
    let label = match target.entity.and_then(|entity| transforms.get(entity).ok()) {
        Some(transform) => {
            let (_, ry, _) = transform.rotation.to_euler(EulerRot::XYZ);
            let t = transform.translation;
            format!(
                "pos {:.1} {:.1} {:.1}\nrot y {:.2}\nscale {:.2}",
                t.x, t.y, t.z, ry, transform.scale.x
            )
        }
        None => "No placement target".to_string(),
    };

    for mut text in &mut overlays {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_edit_touches_only_given_fields() {
        let mut transform = Transform::from_xyz(1.0, 2.0, 3.0).with_scale(Vec3::new(1.0, 2.0, 3.0));
        PlacementEdit {
            y: Some(-13.0),
            rot_y: Some(0.5),
            ..default()
        }
        .apply(&mut transform);

        assert_eq!(transform.translation, Vec3::new(1.0, -13.0, 3.0));
        assert_eq!(transform.scale, Vec3::new(1.0, 2.0, 3.0));
        let (_, ry, _) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((ry - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_shape() {
        let snapshot = placement_snapshot(&Transform::from_xyz(-25.0, 15.0, -30.0).with_scale(Vec3::splat(10.0)));

        assert_eq!(snapshot["position"]["x"], json!(-25.0));
        assert_eq!(snapshot["scale"]["z"], json!(10.0));
        assert_eq!(snapshot["rotation"]["y"], json!(0.0));
    }

    #[test]
    fn test_edits_follow_latest_target() {
        let mut world = World::new();
        world.init_resource::<Events<PlacementEdit>>();
        let first = world.spawn(Transform::default()).id();
        let second = world.spawn(Transform::default()).id();

        let mut target = PlacementTarget::default();
        target.retarget(first);
        target.retarget(second);
        world.insert_resource(target);

        world.send_event(PlacementEdit {
            scale: Some(4.0),
            ..default()
        });
        world.run_system_once(apply_placement_edits).unwrap();

        assert_eq!(world.get::<Transform>(first).unwrap().scale, Vec3::ONE);
        assert_eq!(world.get::<Transform>(second).unwrap().scale, Vec3::splat(4.0));
    }
}
