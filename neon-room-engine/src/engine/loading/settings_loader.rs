use bevy::asset::LoadState;
use bevy::prelude::*;

use super::progress::LoadingProgress;
use crate::engine::assets::room_settings::RoomSettings;

pub const SETTINGS_PATH: &str = "config/room_settings.json";

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<RoomSettings>>,
}

// Start the loading process
pub fn start_loading(
    mut loader: ResMut<SettingsLoader>,
    asset_server: Res<AssetServer>,
    provided: Option<Res<RoomSettings>>,
) {
    if provided.is_some() {
        return;
    }
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Install the settings resource once the file has loaded. A missing or
/// malformed file falls back to the shipped defaults.
pub fn load_settings_system(
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<SettingsLoader>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<RoomSettings>>,
    provided: Option<Res<RoomSettings>>,
) {
    if loading_progress.settings_loaded {
        return;
    }

    if provided.is_some() {
        info!("✓ Room settings provided at startup");
        loading_progress.settings_loaded = true;
        return;
    }

    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    if let Some(settings) = settings_assets.get(handle) {
        info!("✓ Room settings loaded from {}", SETTINGS_PATH);
        commands.insert_resource(settings.clone());
        loading_progress.settings_loaded = true;
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle.id()) {
        warn!("Room settings unavailable, using defaults: {}", error);
        commands.insert_resource(RoomSettings::default());
        loading_progress.settings_loaded = true;
    }
}
