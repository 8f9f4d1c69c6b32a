use bevy::prelude::*;

use super::progress::LoadingProgress;
use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::camera::head_tracked_camera::spawn_room_camera;
use crate::engine::render::bloom::RoomBloom;
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::scene::room::spawn_room;

/// Build camera, walls and lights once settings are in place.
pub fn build_room_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut commands: Commands,
    settings: Option<Res<RoomSettings>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
) {
    if loading_progress.room_built || !loading_progress.settings_loaded {
        return;
    }
    let Some(settings) = settings else {
        return;
    };

    let bloom = RoomBloom::new(settings.visuals.bloom_strength);
    spawn_room_camera(&mut commands, &settings, &bloom);
    spawn_room(&mut commands, &mut meshes, &mut standard_materials, &settings);
    spawn_lighting(&mut commands);
    commands.insert_resource(bloom);

    loading_progress.room_built = true;
    info!(
        "Room built: {} x {} x {}, grid {}",
        settings.room.width, settings.room.height, settings.room.depth, settings.room.grid_size
    );
}
