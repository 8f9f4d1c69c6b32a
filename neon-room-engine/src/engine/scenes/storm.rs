use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use constants::effects::RAIN_COUNT;
use constants::storm::StormPreset;
use serde_json::json;

use super::SceneObject;
use super::controller::SceneContext;
use super::handle::{ModelPurpose, SceneHandle, ScenePhase};
use super::scheduler::ScheduledAction;
use crate::engine::effects::lightning::lightning_delay;
use crate::engine::effects::rain::generate_rain;
use crate::engine::errors::AssetLoadError;
use crate::engine::loading::model_cache::CachedModel;
use crate::engine::loading::model_spawner::{placement_transform, spawn_normal_model};
use crate::engine::mesh::point_sprite_mesh::create_point_sprite_mesh;
use crate::engine::render::point_sprite_material::PointSpriteMaterial;

/// Storm scenes start by fetching their centrepiece. Bloom, rain and the
/// lightning loop only begin once it has loaded.
pub fn load(ctx: &mut SceneContext, handle: &mut SceneHandle, preset: &StormPreset) {
    ctx.models.request(preset.centerpiece_url);
    handle.await_model(preset.centerpiece_url, ModelPurpose::Centerpiece);
}

pub fn centerpiece_ready(
    ctx: &mut SceneContext,
    handle: &mut SceneHandle,
    preset: &StormPreset,
    model: &CachedModel,
) {
    let transform = placement_transform(preset.position, [0.0; 3], [preset.scale; 3]);
    let centerpiece = spawn_normal_model(
        &mut ctx.commands,
        &mut ctx.graphs,
        &mut ctx.mixers,
        model,
        transform,
    );
    ctx.commands.entity(centerpiece).insert(SceneObject);
    handle.own(centerpiece);
    ctx.placement.retarget(centerpiece);

    ctx.bloom.strength = ctx.settings.visuals.storm_bloom_strength;

    let drops = generate_rain(RAIN_COUNT, &mut ctx.rng.0);
    let mesh = ctx.meshes.add(create_point_sprite_mesh(&drops));
    let material = ctx.point_materials.add(PointSpriteMaterial::rain());
    ctx.rain.start(material.clone());

    let rain = ctx
        .commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::default(),
            NoFrustumCulling,
            SceneObject,
            Name::new("Rain"),
        ))
        .id();
    handle.own(rain);

    let rain_task = ctx
        .scheduler
        .schedule_every_frame(ScheduledAction::AdvanceRainTime);
    handle.own_token(rain_task);

    let delay = lightning_delay(&mut ctx.rng.0);
    let strike = ctx
        .scheduler
        .schedule_timer(delay, ScheduledAction::LightningStrike);
    handle.own_token(strike);
}

/// Abort the scene. Nothing was spawned yet, so the room stays as the
/// previous scene's unload left it.
pub fn centerpiece_failed(ctx: &mut SceneContext, handle: &mut SceneHandle, error: &AssetLoadError) {
    error!("Scene {} aborted: {}", handle.id.number(), error);
    handle.phase = ScenePhase::Failed;
    ctx.rpc.send_notification(
        "scene_load_failed",
        json!({
            "scene": handle.id.number(),
            "url": error.url,
            "reason": error.reason.as_str(),
        }),
    );
}

pub fn unload(ctx: &mut SceneContext) {
    ctx.bloom.reset();
    ctx.rain.clear();
    ctx.lightning.intensity = 0.0;
}
