use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use serde_json::json;

use super::handle::{ModelPurpose, SceneHandle, ScenePhase};
use super::scheduler::{ScheduledAction, SceneScheduler};
use super::{SceneId, SceneKind, SceneRng, empty_room, garden, storm};
use crate::engine::animation::mixers::MixerRegistry;
use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::effects::fireflies::FireflySwarm;
use crate::engine::effects::lightning::{LightningFlash, lightning_delay};
use crate::engine::effects::rain::RainState;
use crate::engine::errors::AssetLoadError;
use crate::engine::loading::model_cache::{CachedModel, ModelCache, ModelStatus};
use crate::engine::render::bloom::RoomBloom;
use crate::engine::render::point_sprite_material::PointSpriteMaterial;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::placement::PlacementTarget;

/// The single active scene, if any.
#[derive(Resource, Debug, Default)]
pub struct SceneController {
    active: Option<SceneHandle>,
}

impl SceneController {
    pub fn current(&self) -> Option<SceneId> {
        self.active.as_ref().map(|handle| handle.id)
    }

    /// 1-based number of the active scene, 0 before the first switch.
    pub fn current_number(&self) -> u8 {
        self.current().map_or(0, |id| id.number())
    }

    /// True while the active scene still waits on its assets.
    pub fn is_transitioning(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| handle.phase == ScenePhase::Loading)
    }

    pub fn handle(&self) -> Option<&SceneHandle> {
        self.active.as_ref()
    }
}

/// Request to replace the active scene. Sent by the host page, the keyboard
/// shortcuts and clap detection.
#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchSceneEvent {
    pub scene: SceneId,
}

/// Everything scene load and unload code is allowed to touch.
#[derive(SystemParam)]
pub struct SceneContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub meshes: ResMut<'w, Assets<Mesh>>,
    pub point_materials: ResMut<'w, Assets<PointSpriteMaterial>>,
    pub graphs: ResMut<'w, Assets<AnimationGraph>>,
    pub models: ResMut<'w, ModelCache>,
    pub mixers: ResMut<'w, MixerRegistry>,
    pub scheduler: ResMut<'w, SceneScheduler>,
    pub rng: ResMut<'w, SceneRng>,
    pub settings: Res<'w, RoomSettings>,
    pub bloom: ResMut<'w, RoomBloom>,
    pub lightning: ResMut<'w, LightningFlash>,
    pub rain: ResMut<'w, RainState>,
    pub fireflies: ResMut<'w, FireflySwarm>,
    pub placement: ResMut<'w, PlacementTarget>,
    pub rpc: ResMut<'w, WebRpcInterface>,
}

/// Apply switch requests in arrival order. The outgoing scene is fully
/// unloaded before the incoming scene starts loading.
pub fn handle_scene_switches(
    mut events: EventReader<SwitchSceneEvent>,
    mut controller: ResMut<SceneController>,
    mut ctx: SceneContext,
) {
    for event in events.read() {
        info!("Switching to Scene {}", event.scene.number());

        if let Some(mut outgoing) = controller.active.take() {
            unload_scene(&mut ctx, &mut outgoing);
        }
        ctx.mixers.clear();

        let mut handle = SceneHandle::new(event.scene);
        match event.scene.kind() {
            SceneKind::EmptyRoom => empty_room::load(&mut handle),
            SceneKind::Garden => garden::load(&mut ctx, &mut handle),
            SceneKind::Storm(preset) => storm::load(&mut ctx, &mut handle, &preset),
        }
        controller.active = Some(handle);

        ctx.rpc
            .send_notification("scene_changed", json!({ "scene": event.scene.number() }));
    }
}

fn unload_scene(ctx: &mut SceneContext, handle: &mut SceneHandle) {
    handle.unload(&mut ctx.commands, &mut ctx.scheduler);
    match handle.id.kind() {
        SceneKind::EmptyRoom => {}
        SceneKind::Garden => garden::unload(ctx),
        SceneKind::Storm(_) => storm::unload(ctx),
    }
    ctx.placement.clear();
    debug!("Unloaded Scene {}", handle.id.number());
}

/// Hand finished model loads to the scene that asked for them, and finish the
/// scene once nothing is pending.
pub fn advance_scene_loading(mut controller: ResMut<SceneController>, mut ctx: SceneContext) {
    let Some(handle) = controller.active.as_mut() else {
        return;
    };
    if handle.phase != ScenePhase::Loading {
        return;
    }

    let mut still_pending = Vec::new();
    for pending in handle.take_pending() {
        if handle.phase == ScenePhase::Failed {
            break;
        }
        match ctx.models.status(&pending.url) {
            ModelStatus::Ready(model) => model_ready(&mut ctx, handle, pending.purpose, &model),
            ModelStatus::Failed(error) => model_failed(&mut ctx, handle, pending.purpose, &error),
            ModelStatus::Loading => still_pending.push(pending),
            ModelStatus::Unrequested => {
                ctx.models.request(&pending.url);
                still_pending.push(pending);
            }
        }
    }

    match handle.phase {
        ScenePhase::Failed => {}
        _ if !still_pending.is_empty() => handle.set_pending(still_pending),
        _ => finish_scene(&mut ctx, handle),
    }
}

fn model_ready(
    ctx: &mut SceneContext,
    handle: &mut SceneHandle,
    purpose: ModelPurpose,
    model: &CachedModel,
) {
    match (handle.id.kind(), purpose) {
        (SceneKind::Garden, ModelPurpose::GardenModel(index)) => {
            garden::model_ready(ctx, handle, index, model)
        }
        (SceneKind::Storm(preset), ModelPurpose::Centerpiece) => {
            storm::centerpiece_ready(ctx, handle, &preset, model)
        }
        (kind, purpose) => warn!("Ignoring {:?} model {} for {:?}", purpose, model.url, kind),
    }
}

fn model_failed(
    ctx: &mut SceneContext,
    handle: &mut SceneHandle,
    purpose: ModelPurpose,
    error: &AssetLoadError,
) {
    match handle.id.kind() {
        SceneKind::Storm(_) => storm::centerpiece_failed(ctx, handle, error),
        _ => warn!("Skipping {:?}: {}", purpose, error),
    }
}

fn finish_scene(ctx: &mut SceneContext, handle: &mut SceneHandle) {
    match handle.id.kind() {
        SceneKind::EmptyRoom => {}
        SceneKind::Garden => garden::finish(ctx, handle),
        SceneKind::Storm(_) => {}
    }
    handle.phase = ScenePhase::Active;
    info!(
        "Scene {} loaded with {} objects",
        handle.id.number(),
        handle.objects().len()
    );
}

/// Fire due scene tasks. Lightning re-arms itself only while the scene that
/// owns the fired token is still active.
pub fn run_scheduled_tasks(
    time: Res<Time>,
    mut scheduler: ResMut<SceneScheduler>,
    mut controller: ResMut<SceneController>,
    mut lightning: ResMut<LightningFlash>,
    mut rain: ResMut<RainState>,
    mut rng: ResMut<SceneRng>,
) {
    for (token, action) in scheduler.tick(time.delta_secs()) {
        match action {
            ScheduledAction::AdvanceRainTime => rain.advance(),
            ScheduledAction::LightningStrike => {
                lightning.strike();

                let Some(handle) = controller.active.as_mut() else {
                    continue;
                };
                if handle.owns_token(token) {
                    let delay = lightning_delay(&mut rng.0);
                    let next = scheduler.schedule_timer(delay, ScheduledAction::LightningStrike);
                    handle.replace_token(token, next);
                }
            }
        }
    }
}

/// Digits 1-4 switch scenes on native builds.
pub fn scene_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut switches: EventWriter<SwitchSceneEvent>,
) {
    let bindings = [
        (KeyCode::Digit1, SceneId::EmptyRoom),
        (KeyCode::Digit2, SceneId::Garden),
        (KeyCode::Digit3, SceneId::FlowerStorm),
        (KeyCode::Digit4, SceneId::SpaceStorm),
    ];
    for (key, scene) in bindings {
        if keyboard.just_pressed(key) {
            switches.write(SwitchSceneEvent { scene });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_starts_empty() {
        let controller = SceneController::default();
        assert_eq!(controller.current(), None);
        assert_eq!(controller.current_number(), 0);
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn test_transitioning_follows_phase() {
        let mut controller = SceneController {
            active: Some(SceneHandle::new(SceneId::Garden)),
        };
        assert!(controller.is_transitioning());
        assert_eq!(controller.current_number(), 2);

        if let Some(handle) = controller.active.as_mut() {
            handle.phase = ScenePhase::Active;
        }
        assert!(!controller.is_transitioning());
    }
}
