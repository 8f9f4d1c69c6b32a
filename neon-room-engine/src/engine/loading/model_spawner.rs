use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use constants::garden::ModelPlacement;

use super::model_cache::{CachedModel, ModelCache};
use crate::engine::animation::mixers::{MixerRegistry, PingPongMixer, attach_mixer_player};
use crate::engine::render::point_sprite_material::PointSpriteMaterial;

/// Root transform from Euler XYZ rotation, matching how placements are authored.
pub fn placement_transform(position: [f32; 3], rotation: [f32; 3], scale: [f32; 3]) -> Transform {
    Transform {
        translation: Vec3::from_array(position),
        rotation: Quat::from_euler(EulerRot::XYZ, rotation[0], rotation[1], rotation[2]),
        scale: Vec3::from_array(scale),
    }
}

/// Instantiate the model's scene as-is. Models with clips get a ping-pong
/// mixer that binds to the scene's animation player once it spawns.
pub fn spawn_normal_model(
    commands: &mut Commands,
    graphs: &mut Assets<AnimationGraph>,
    mixers: &mut MixerRegistry,
    model: &CachedModel,
    transform: Transform,
) -> Entity {
    let mut entity = commands.spawn((
        SceneRoot(model.scene.clone()),
        transform,
        Name::new(model.url.clone()),
    ));

    if !model.clips.is_empty() {
        let (graph, nodes) = AnimationGraph::from_clips(model.clips.iter().cloned());
        mixers.register(PingPongMixer::new(
            entity.id(),
            graphs.add(graph),
            nodes,
            model.clip_duration,
        ));
        entity.observe(attach_mixer_player);
    }

    entity.id()
}

/// Re-emit each textured surface as texture-sampling points under a new root.
/// Every surface entity also gets `surface_tag`. A model without textured
/// surfaces yields an empty root.
pub fn spawn_points_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<PointSpriteMaterial>,
    cache: &mut ModelCache,
    model: &CachedModel,
    placement: &ModelPlacement,
    surface_tag: impl Bundle + Clone,
) -> Entity {
    let transform = placement_transform(placement.position, placement.rotation, placement.scale);
    let root = commands
        .spawn((transform, Visibility::default(), Name::new(model.url.clone())))
        .id();

    // Pixel diameter at unit view depth
    let size = placement.point_size * placement.point_many;
    let mut converted = 0;
    for surface in &model.surfaces {
        let Some(mesh) = cache.point_mesh(surface, meshes) else {
            continue;
        };
        let material = materials.add(PointSpriteMaterial::textured(surface.texture.clone(), size));

        commands.entity(root).with_children(|parent| {
            parent.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                surface.transform,
                NoFrustumCulling,
                surface_tag.clone(),
            ));
        });
        converted += 1;
    }

    if converted == 0 {
        warn!("No textured meshes found in {}", model.url);
    } else {
        info!("Loaded {} as {} textured point clouds", model.url, converted);
    }
    root
}
