use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scenes::SceneId;
use crate::engine::scenes::controller::SwitchSceneEvent;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;

pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.is_complete() {
        info!("→ Room ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// The room opens on the empty scene.
pub fn request_initial_scene(mut switches: EventWriter<SwitchSceneEvent>) {
    switches.write(SwitchSceneEvent {
        scene: SceneId::EmptyRoom,
    });
}
