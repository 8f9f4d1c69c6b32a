use std::collections::HashMap;

use bevy::prelude::*;

use crate::engine::errors::AssetLoadError;
use crate::engine::mesh::point_sprite_mesh::{create_point_sprite_mesh, points_from_surface};

/// A mesh primitive whose material samples a base colour texture, with its
/// transform composed through the model's node hierarchy.
#[derive(Debug, Clone)]
pub struct TexturedSurface {
    pub mesh: Handle<Mesh>,
    pub texture: Handle<Image>,
    pub transform: Transform,
}

/// Everything a scene needs to instantiate an imported model. Holding the
/// handles keeps the underlying assets alive for the whole session.
#[derive(Debug, Clone)]
pub struct CachedModel {
    pub url: String,
    pub scene: Handle<Scene>,
    pub clips: Vec<Handle<AnimationClip>>,
    /// Length of the longest clip in seconds.
    pub clip_duration: f32,
    pub surfaces: Vec<TexturedSurface>,
}

/// Result of polling an in-flight load.
pub enum ModelPoll {
    Pending,
    Ready(CachedModel),
    Failed(AssetLoadError),
}

/// Where model files come from. The engine uses the glTF loader; tests swap
/// in a counting mock.
pub trait ModelSource: Send + Sync + 'static {
    /// Start fetching `url`. Called at most once per load attempt.
    fn begin(&mut self, url: &str, world: &mut World);

    fn poll(&mut self, url: &str, world: &mut World) -> ModelPoll;
}

#[derive(Debug, Clone)]
pub enum ModelStatus {
    Unrequested,
    Loading,
    Ready(CachedModel),
    Failed(AssetLoadError),
}

/// Process-wide model cache keyed by URL. Successful loads are kept for the
/// whole session; failed loads are reported once and retried on the next
/// request.
#[derive(Resource)]
pub struct ModelCache {
    source: Box<dyn ModelSource>,
    models: HashMap<String, CachedModel>,
    queued: Vec<String>,
    in_flight: Vec<String>,
    failures: HashMap<String, AssetLoadError>,
    /// Point sprite conversions keyed by the source surface mesh.
    point_meshes: HashMap<AssetId<Mesh>, Handle<Mesh>>,
    loads_started: usize,
}

impl ModelCache {
    pub fn new(source: impl ModelSource) -> Self {
        Self {
            source: Box::new(source),
            models: HashMap::new(),
            queued: Vec::new(),
            in_flight: Vec::new(),
            failures: HashMap::new(),
            point_meshes: HashMap::new(),
            loads_started: 0,
        }
    }

    /// Ask for `url`. Cached models are ready immediately; anything else is
    /// queued unless a load is already running.
    pub fn request(&mut self, url: &str) {
        if let Some(model) = self.models.get(url) {
            info!(
                "Loaded {} from cache with {} animations",
                url,
                model.clips.len()
            );
            return;
        }
        if self.in_flight.iter().any(|u| u == url) || self.queued.iter().any(|u| u == url) {
            return;
        }
        self.failures.remove(url);
        self.queued.push(url.to_string());
    }

    pub fn status(&self, url: &str) -> ModelStatus {
        if let Some(model) = self.models.get(url) {
            ModelStatus::Ready(model.clone())
        } else if let Some(error) = self.failures.get(url) {
            ModelStatus::Failed(error.clone())
        } else if self.in_flight.iter().any(|u| u == url) || self.queued.iter().any(|u| u == url) {
            ModelStatus::Loading
        } else {
            ModelStatus::Unrequested
        }
    }

    pub fn get(&self, url: &str) -> Option<&CachedModel> {
        self.models.get(url)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Number of loads handed to the source since startup.
    pub fn loads_started(&self) -> usize {
        self.loads_started
    }

    /// Start queued loads and collect finished ones.
    pub fn poll(&mut self, world: &mut World) {
        for url in self.queued.drain(..) {
            debug!("Loading {}", url);
            self.source.begin(&url, world);
            self.loads_started += 1;
            self.in_flight.push(url);
        }

        let mut still_loading = Vec::new();
        for url in std::mem::take(&mut self.in_flight) {
            match self.source.poll(&url, world) {
                ModelPoll::Pending => still_loading.push(url),
                ModelPoll::Ready(model) => {
                    if model.clips.is_empty() {
                        info!("Loaded {} as static mesh", url);
                    } else {
                        info!("Loaded {} with {} animations", url, model.clips.len());
                    }
                    self.models.insert(url, model);
                }
                ModelPoll::Failed(error) => {
                    error!("Error loading GLB: {}", error);
                    self.failures.insert(url, error);
                }
            }
        }
        self.in_flight = still_loading;
    }

    /// Point sprite version of a textured surface, converted once per source mesh.
    pub fn point_mesh(
        &mut self,
        surface: &TexturedSurface,
        meshes: &mut Assets<Mesh>,
    ) -> Option<Handle<Mesh>> {
        if let Some(handle) = self.point_meshes.get(&surface.mesh.id()) {
            return Some(handle.clone());
        }

        let points = points_from_surface(meshes.get(&surface.mesh)?)?;
        let handle = meshes.add(create_point_sprite_mesh(&points));
        self.point_meshes.insert(surface.mesh.id(), handle.clone());
        Some(handle)
    }
}

/// Drive the cache's source with full world access.
pub fn poll_model_cache(world: &mut World) {
    world.resource_scope(|world, mut cache: Mut<ModelCache>| cache.poll(world));
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::engine::errors::LoadFailure;

    /// Resolves every load on the first poll and counts calls to `begin`.
    #[derive(Clone, Default)]
    pub struct MockModelSource {
        pub begins: Arc<AtomicUsize>,
        pub failing: HashSet<String>,
        pub clip_count: usize,
        pub surfaces: Vec<TexturedSurface>,
    }

    impl MockModelSource {
        pub fn failing(urls: &[&str]) -> Self {
            Self {
                failing: urls.iter().map(|u| u.to_string()).collect(),
                ..default()
            }
        }

        pub fn begin_count(&self) -> usize {
            self.begins.load(Ordering::SeqCst)
        }
    }

    impl ModelSource for MockModelSource {
        fn begin(&mut self, _url: &str, _world: &mut World) {
            self.begins.fetch_add(1, Ordering::SeqCst);
        }

        fn poll(&mut self, url: &str, _world: &mut World) -> ModelPoll {
            if self.failing.contains(url) {
                return ModelPoll::Failed(AssetLoadError::new(url, LoadFailure::Network, "404"));
            }
            ModelPoll::Ready(CachedModel {
                url: url.to_string(),
                scene: Handle::default(),
                clips: vec![Handle::default(); self.clip_count],
                clip_duration: 2.0,
                surfaces: self.surfaces.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockModelSource;
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::render::mesh::PrimitiveTopology;

    #[test]
    fn test_each_url_loads_once() {
        let source = MockModelSource::default();
        let mut cache = ModelCache::new(source.clone());
        let mut world = World::new();

        cache.request("models/flower.glb");
        cache.request("models/flower.glb");
        assert!(matches!(cache.status("models/flower.glb"), ModelStatus::Loading));

        cache.poll(&mut world);
        cache.request("models/flower.glb");
        cache.poll(&mut world);

        assert!(matches!(cache.status("models/flower.glb"), ModelStatus::Ready(_)));
        assert_eq!(source.begin_count(), 1);
        assert_eq!(cache.loads_started(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let source = MockModelSource::failing(&["effects/missing.glb"]);
        let mut cache = ModelCache::new(source.clone());
        let mut world = World::new();

        cache.request("effects/missing.glb");
        cache.poll(&mut world);
        let ModelStatus::Failed(error) = cache.status("effects/missing.glb") else {
            panic!("expected a failure");
        };
        assert_eq!(error.url, "effects/missing.glb");
        assert!(cache.is_empty());

        // A fresh request retries the load
        cache.request("effects/missing.glb");
        assert!(matches!(cache.status("effects/missing.glb"), ModelStatus::Loading));
        cache.poll(&mut world);
        assert_eq!(source.begin_count(), 2);
    }

    #[test]
    fn test_point_mesh_converted_once_per_surface() {
        let mut meshes = Assets::<Mesh>::default();
        let mut surface_mesh =
            Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        surface_mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        );
        surface_mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, vec![[0.0f32, 0.0]; 3]);

        let surface = TexturedSurface {
            mesh: meshes.add(surface_mesh),
            texture: Handle::default(),
            transform: Transform::IDENTITY,
        };

        let mut cache = ModelCache::new(MockModelSource::default());
        let first = cache.point_mesh(&surface, &mut meshes).unwrap();
        let second = cache.point_mesh(&surface, &mut meshes).unwrap();

        assert_eq!(first, second);
        assert_eq!(meshes.get(&first).unwrap().count_vertices(), 18);
    }
}
