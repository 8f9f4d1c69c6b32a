use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use constants::effects::FIREFLY_COUNT;
use constants::garden::{HYBRID_GARDEN_MODELS, HYBRID_OPACITY, HYBRID_POINT_SIZE};
use point_cloud_generator::{GardenKind, GardenPlan};

use super::SceneObject;
use super::controller::SceneContext;
use super::handle::{ModelPurpose, SceneHandle};
use crate::engine::effects::energy_pulse::PulseReceiver;
use crate::engine::effects::fireflies::generate_fireflies;
use crate::engine::loading::model_cache::CachedModel;
use crate::engine::loading::model_spawner::spawn_points_model;
use crate::engine::mesh::point_sprite_mesh::{create_point_sprite_mesh, points_from_buffer};
use crate::engine::render::point_sprite_material::PointSpriteMaterial;

/// Spawn the procedural layer of the hybrid garden and request every
/// imported model. Models attach under the garden root as they arrive.
pub fn load(ctx: &mut SceneContext, handle: &mut SceneHandle) {
    let density = ctx.settings.garden.density;
    let plan = GardenPlan::new(GardenKind::HybridBase, density, &mut ctx.rng.0);
    let buffer = plan.bake(&mut ctx.rng.0, |request, cursor| {
        debug!("Garden {} done at {} points", request.label(), cursor);
    });

    let points = points_from_buffer(buffer.positions(), buffer.colors());
    let mesh = ctx.meshes.add(create_point_sprite_mesh(&points));
    let material = ctx
        .point_materials
        .add(PointSpriteMaterial::garden(HYBRID_POINT_SIZE, HYBRID_OPACITY));

    let root = ctx
        .commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::default(),
            NoFrustumCulling,
            PulseReceiver,
            SceneObject,
            Name::new("Hybrid garden"),
        ))
        .id();
    handle.own(root);
    handle.root = Some(root);
    ctx.placement.retarget(root);

    info!("Hybrid garden base: {} points", buffer.len());

    for (index, placement) in HYBRID_GARDEN_MODELS.iter().enumerate() {
        ctx.models.request(placement.url);
        handle.await_model(placement.url, ModelPurpose::GardenModel(index));
    }
}

pub fn model_ready(
    ctx: &mut SceneContext,
    handle: &mut SceneHandle,
    index: usize,
    model: &CachedModel,
) {
    let Some(placement) = HYBRID_GARDEN_MODELS.get(index) else {
        return;
    };
    let entity = spawn_points_model(
        &mut ctx.commands,
        &mut ctx.meshes,
        &mut ctx.point_materials,
        &mut ctx.models,
        model,
        placement,
        PulseReceiver,
    );

    match handle.root {
        Some(root) => {
            ctx.commands.entity(root).add_child(entity);
        }
        None => handle.own(entity),
    }
    ctx.placement.retarget(entity);
}

/// Fireflies go in once every garden model has loaded or been skipped.
pub fn finish(ctx: &mut SceneContext, handle: &mut SceneHandle) {
    let points = generate_fireflies(FIREFLY_COUNT, &mut ctx.rng.0);
    let mesh = ctx.meshes.add(create_point_sprite_mesh(&points));
    let material = ctx.point_materials.add(PointSpriteMaterial::firefly());
    ctx.fireflies.material = Some(material.clone());

    let swarm = ctx
        .commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            Visibility::default(),
            NoFrustumCulling,
            SceneObject,
            Name::new("Fireflies"),
        ))
        .id();
    handle.own(swarm);
}

pub fn unload(ctx: &mut SceneContext) {
    ctx.fireflies.material = None;
}
