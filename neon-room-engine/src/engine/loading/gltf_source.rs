use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use bevy::asset::{AssetLoadError as BevyAssetLoadError, RecursiveDependencyLoadState};
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::prelude::*;

use super::model_cache::{CachedModel, ModelPoll, ModelSource, TexturedSurface};
use crate::engine::errors::{AssetLoadError, LoadFailure};

/// Loads `.glb`/`.gltf` files through the asset server.
#[derive(Default)]
pub struct GltfModelSource {
    handles: HashMap<String, Handle<Gltf>>,
}

impl ModelSource for GltfModelSource {
    fn begin(&mut self, url: &str, world: &mut World) {
        let handle = world.resource::<AssetServer>().load::<Gltf>(url.to_string());
        self.handles.insert(url.to_string(), handle);
    }

    fn poll(&mut self, url: &str, world: &mut World) -> ModelPoll {
        let Some(handle) = self.handles.get(url) else {
            return ModelPoll::Failed(AssetLoadError::new(
                url,
                LoadFailure::Parse,
                "load was never started",
            ));
        };

        match world
            .resource::<AssetServer>()
            .recursive_dependency_load_state(handle.id())
        {
            RecursiveDependencyLoadState::Loaded => {}
            RecursiveDependencyLoadState::Failed(error) => {
                self.handles.remove(url);
                return ModelPoll::Failed(classify_failure(url, &error));
            }
            _ => return ModelPoll::Pending,
        }

        let result = extract_model(url, handle, world);
        self.handles.remove(url);
        result
    }
}

fn classify_failure(url: &str, error: &Arc<BevyAssetLoadError>) -> AssetLoadError {
    let reason = match error.as_ref() {
        BevyAssetLoadError::AssetReaderError(_) => LoadFailure::Network,
        _ => LoadFailure::Parse,
    };
    AssetLoadError::new(url, reason, error.to_string())
}

fn extract_model(url: &str, handle: &Handle<Gltf>, world: &World) -> ModelPoll {
    let Some(gltf) = world.resource::<Assets<Gltf>>().get(handle) else {
        return ModelPoll::Failed(AssetLoadError::new(
            url,
            LoadFailure::Parse,
            "asset missing after load",
        ));
    };

    let Some(scene) = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
    else {
        return ModelPoll::Failed(AssetLoadError::new(
            url,
            LoadFailure::MissingScene,
            "file contains no scenes",
        ));
    };

    let clip_assets = world.resource::<Assets<AnimationClip>>();
    let clip_duration = gltf
        .animations
        .iter()
        .filter_map(|clip| clip_assets.get(clip))
        .map(|clip| clip.duration())
        .fold(0.0, f32::max);

    ModelPoll::Ready(CachedModel {
        url: url.to_string(),
        scene,
        clips: gltf.animations.clone(),
        clip_duration,
        surfaces: collect_textured_surfaces(gltf, world),
    })
}

/// Walk the node hierarchy from its roots, composing transforms, and keep
/// every primitive whose material has a base colour texture.
fn collect_textured_surfaces(gltf: &Gltf, world: &World) -> Vec<TexturedSurface> {
    let nodes = world.resource::<Assets<GltfNode>>();
    let gltf_meshes = world.resource::<Assets<GltfMesh>>();
    let materials = world.resource::<Assets<StandardMaterial>>();

    let child_ids: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|handle| nodes.get(handle))
        .flat_map(|node| node.children.iter().map(|child| child.id()))
        .collect();

    let mut stack: Vec<(Handle<GltfNode>, Mat4)> = gltf
        .nodes
        .iter()
        .filter(|handle| !child_ids.contains(&handle.id()))
        .map(|handle| (handle.clone(), Mat4::IDENTITY))
        .collect();

    let mut surfaces = Vec::new();
    while let Some((handle, parent_matrix)) = stack.pop() {
        let Some(node) = nodes.get(&handle) else {
            continue;
        };
        let matrix = parent_matrix * node.transform.compute_matrix();

        if let Some(mesh) = node.mesh.as_ref().and_then(|mesh| gltf_meshes.get(mesh)) {
            for primitive in &mesh.primitives {
                let texture = primitive
                    .material
                    .as_ref()
                    .and_then(|material| materials.get(material))
                    .and_then(|material| material.base_color_texture.clone());

                if let Some(texture) = texture {
                    surfaces.push(TexturedSurface {
                        mesh: primitive.mesh.clone(),
                        texture,
                        transform: Transform::from_matrix(matrix),
                    });
                }
            }
        }

        for child in &node.children {
            stack.push((child.clone(), matrix));
        }
    }
    surfaces
}
