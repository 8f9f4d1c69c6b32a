use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::animation::mixers::{MixerRegistry, advance_mixers};
use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::camera::head_tracked_camera::{EyePosition, update_room_camera};
use crate::engine::core::app_state::{AppState, FpsText, request_initial_scene, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::effects::energy_pulse::{EnergyPulse, update_energy_pulse};
use crate::engine::effects::fireflies::{FireflySwarm, update_fireflies};
use crate::engine::effects::lightning::{LightningFlash, decay_lightning};
use crate::engine::effects::rain::{RainState, update_rain_material};
use crate::engine::loading::gltf_source::GltfModelSource;
use crate::engine::loading::model_cache::{ModelCache, poll_model_cache};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::room_builder::build_room_when_ready;
use crate::engine::loading::settings_loader::{SettingsLoader, load_settings_system, start_loading};
use crate::engine::render::bloom::{RoomBloom, apply_room_bloom};
use crate::engine::render::point_sprite_material::PointSpriteMaterial;
use crate::engine::scene::lighting::breathe_point_light;
use crate::engine::scenes::SceneRng;
use crate::engine::scenes::controller::{
    SceneController, SwitchSceneEvent, advance_scene_loading, handle_scene_switches,
    run_scheduled_tasks,
};
use crate::engine::scenes::scheduler::SceneScheduler;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::tracking::CollaboratorStatus;
use crate::engine::tracking::clap_detection::{AudioSpectrum, ClapDetector, detect_claps};
use crate::engine::tracking::eye_tracking::{LatestLandmarks, update_eye_position};
// Crate tools modules
use crate::tools::placement::{PlacementEdit, PlacementTarget, apply_placement_edits};
// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::scenes::controller::scene_keyboard_shortcuts;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::tools::placement::{
    spawn_placement_overlay, toggle_placement_overlay, update_placement_overlay,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(MaterialPlugin::<PointSpriteMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers RoomSettings as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<RoomSettings>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(RoomRuntimePlugin);

    app.add_systems(
        Update,
        fps_notification_system.run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, (setup_native_overlays, spawn_placement_overlay))
            .add_systems(
                Update,
                (
                    fps_text_update_system,
                    toggle_placement_overlay,
                    update_placement_overlay,
                ),
            )
            .add_systems(
                Update,
                scene_keyboard_shortcuts.run_if(in_state(AppState::Running)),
            );
    }

    app
}

/// Room loading, scene lifecycle, effects, tracking and placement. Expects the
/// asset types it uses to be registered and a `ModelCache` to be inserted
/// first; without one it loads models through the asset server.
pub struct RoomRuntimePlugin;

impl Plugin for RoomRuntimePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ModelCache>() {
            app.insert_resource(ModelCache::new(GltfModelSource::default()));
        }

        // Initialise resources early
        app.init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<SettingsLoader>()
            .init_resource::<SceneController>()
            .init_resource::<SceneScheduler>()
            .init_resource::<SceneRng>()
            .init_resource::<MixerRegistry>()
            .init_resource::<RoomBloom>()
            .init_resource::<EyePosition>()
            .init_resource::<FireflySwarm>()
            .init_resource::<RainState>()
            .init_resource::<LightningFlash>()
            .init_resource::<EnergyPulse>()
            .init_resource::<LatestLandmarks>()
            .init_resource::<AudioSpectrum>()
            .init_resource::<ClapDetector>()
            .init_resource::<CollaboratorStatus>()
            .init_resource::<PlacementTarget>()
            .add_event::<SwitchSceneEvent>()
            .add_event::<PlacementEdit>();

        app.add_systems(Startup, start_loading)
            .add_systems(
                Update,
                (
                    load_settings_system,
                    build_room_when_ready,
                    transition_to_running,
                )
                    .chain()
                    .run_if(in_state(AppState::Loading)),
            )
            .add_systems(OnEnter(AppState::Running), request_initial_scene);

        let scene_systems = (
            handle_scene_switches,
            poll_model_cache,
            advance_scene_loading,
            run_scheduled_tasks,
            advance_mixers,
        )
            .chain();

        let frame_systems = (
            update_eye_position,
            update_room_camera,
            update_fireflies,
            update_energy_pulse,
            decay_lightning,
            update_rain_material,
            apply_room_bloom,
            breathe_point_light,
            detect_claps,
            apply_placement_edits,
        )
            .chain();

        app.add_systems(
            Update,
            (scene_systems, frame_systems)
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}

fn setup_native_overlays(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
