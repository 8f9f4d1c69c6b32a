/// Neon grid walls around the viewer
use std::f32::consts::FRAC_PI_2;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::view::NoFrustumCulling;

use crate::engine::assets::room_settings::RoomSettings;

#[derive(Component)]
pub struct RoomWall;

/// Placement of one wall plane. Wall geometry lies in its local XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub name: &'static str,
    pub center: Vec3,
    pub size: Vec2,
    /// Euler XYZ rotation of the wall plane.
    pub rotation: Vec3,
}

impl WallSpec {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.center).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ))
    }
}

/// Back, floor, ceiling, left and right walls. The front stays open at z = 0.
pub fn wall_specs(settings: &RoomSettings) -> [WallSpec; 5] {
    let room = &settings.room;
    let (w, h, d) = (room.width, room.height, room.depth);

    [
        WallSpec {
            name: "Back wall",
            center: Vec3::new(0.0, 0.0, -d),
            size: Vec2::new(w, h),
            rotation: Vec3::ZERO,
        },
        WallSpec {
            name: "Floor",
            center: Vec3::new(0.0, -h / 2.0, -d / 2.0),
            size: Vec2::new(w, d),
            rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        },
        WallSpec {
            name: "Ceiling",
            center: Vec3::new(0.0, h / 2.0, -d / 2.0),
            size: Vec2::new(w, d),
            rotation: Vec3::new(FRAC_PI_2, 0.0, 0.0),
        },
        WallSpec {
            name: "Left wall",
            center: Vec3::new(-w / 2.0, 0.0, -d / 2.0),
            size: Vec2::new(d, h),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
        },
        WallSpec {
            name: "Right wall",
            center: Vec3::new(w / 2.0, 0.0, -d / 2.0),
            size: Vec2::new(d, h),
            rotation: Vec3::new(0.0, -FRAC_PI_2, 0.0),
        },
    ]
}

/// Line-list vertices of a wall's grid: vertical lines every `grid_size`,
/// horizontal lines every half cell, borders included.
pub fn wall_grid_lines(size: Vec2, grid_size: f32) -> Vec<[f32; 3]> {
    let mut vertices = Vec::new();
    if grid_size <= 0.0 {
        return vertices;
    }

    let (half_w, half_h) = (size.x / 2.0, size.y / 2.0);
    let columns = (size.x / grid_size).round().max(1.0) as u32;
    let rows = (size.y / (grid_size / 2.0)).round().max(1.0) as u32;

    for i in 0..=columns {
        let x = -half_w + size.x * i as f32 / columns as f32;
        vertices.push([x, -half_h, 0.0]);
        vertices.push([x, half_h, 0.0]);
    }
    for j in 0..=rows {
        let y = -half_h + size.y * j as f32 / rows as f32;
        vertices.push([-half_w, y, 0.0]);
        vertices.push([half_w, y, 0.0]);
    }
    vertices
}

fn create_wall_mesh(size: Vec2, grid_size: f32) -> Mesh {
    let vertices = wall_grid_lines(size, grid_size);
    let normals = vec![[0.0, 0.0, 1.0]; vertices.len()];

    let mut mesh = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}

/// Spawn the five emissive grid walls.
pub fn spawn_room(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    settings: &RoomSettings,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        emissive: settings.visuals.neon_linear(),
        metallic: 0.0,
        perceptual_roughness: 1.0,
        ..default()
    });

    for wall in wall_specs(settings) {
        commands.spawn((
            Mesh3d(meshes.add(create_wall_mesh(wall.size, settings.room.grid_size))),
            MeshMaterial3d(material.clone()),
            wall.transform(),
            Visibility::Visible,
            NoFrustumCulling,
            RoomWall,
            Name::new(wall.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walls_enclose_room() {
        let settings = RoomSettings::default();
        let walls = wall_specs(&settings);

        let back = walls[0];
        assert_eq!(back.center, Vec3::new(0.0, 0.0, -70.0));

        // Floor normal points up into the room.
        let floor_normal = walls[1].transform().rotation * Vec3::Z;
        assert!((floor_normal - Vec3::Y).length() < 1e-5);

        // Left wall faces the right wall.
        let left_normal = walls[3].transform().rotation * Vec3::Z;
        assert!((left_normal - Vec3::X).length() < 1e-5);
        assert_eq!(walls[3].size, Vec2::new(70.0, 45.0));
    }

    #[test]
    fn test_grid_line_spacing() {
        // 90 wide at 7 rounds to 13 columns; 45 high at 3.5 rounds to 13 rows.
        let lines = wall_grid_lines(Vec2::new(90.0, 45.0), 7.0);
        assert_eq!(lines.len(), 2 * (14 + 14));

        assert_eq!(lines[0], [-45.0, -22.5, 0.0]);
        assert!(lines.iter().all(|v| v[0].abs() <= 45.0 && v[1].abs() <= 22.5));
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        assert!(wall_grid_lines(Vec2::new(10.0, 10.0), 0.0).is_empty());
    }
}
