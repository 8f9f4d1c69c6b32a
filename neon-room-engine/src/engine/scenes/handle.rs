use bevy::prelude::*;

use super::SceneId;
use super::scheduler::{SceneScheduler, TaskToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePhase {
    /// Waiting on at least one model, or not yet finished.
    Loading,
    Active,
    /// A required asset failed. The scene stays registered so the next
    /// switch still unloads whatever it spawned.
    Failed,
}

/// Why a scene asked for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPurpose {
    /// Index into the hybrid garden placement table.
    GardenModel(usize),
    Centerpiece,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingModel {
    pub url: String,
    pub purpose: ModelPurpose,
}

/// Everything the active scene owns. Unloading releases all of it.
#[derive(Debug)]
pub struct SceneHandle {
    pub id: SceneId,
    pub phase: ScenePhase,
    /// Owned entity that later-loaded models attach under.
    pub root: Option<Entity>,
    objects: Vec<Entity>,
    tokens: Vec<TaskToken>,
    pending: Vec<PendingModel>,
}

impl SceneHandle {
    pub fn new(id: SceneId) -> Self {
        Self {
            id,
            phase: ScenePhase::Loading,
            root: None,
            objects: Vec::new(),
            tokens: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Record a top-level entity for removal on unload.
    pub fn own(&mut self, entity: Entity) {
        self.objects.push(entity);
    }

    pub fn own_token(&mut self, token: TaskToken) {
        self.tokens.push(token);
    }

    pub fn owns_token(&self, token: TaskToken) -> bool {
        self.tokens.contains(&token)
    }

    /// Swap a fired one-shot token for its successor.
    pub fn replace_token(&mut self, fired: TaskToken, next: TaskToken) {
        self.tokens.retain(|t| *t != fired);
        self.tokens.push(next);
    }

    pub fn await_model(&mut self, url: &str, purpose: ModelPurpose) {
        self.pending.push(PendingModel {
            url: url.to_string(),
            purpose,
        });
    }

    pub fn take_pending(&mut self) -> Vec<PendingModel> {
        std::mem::take(&mut self.pending)
    }

    pub fn set_pending(&mut self, pending: Vec<PendingModel>) {
        self.pending = pending;
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    pub fn tokens(&self) -> &[TaskToken] {
        &self.tokens
    }

    /// Despawn every owned entity with its children and cancel every owned
    /// task. Pending model loads are abandoned; the cache still keeps them.
    pub fn unload(&mut self, commands: &mut Commands, scheduler: &mut SceneScheduler) {
        for entity in self.objects.drain(..) {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
        for token in self.tokens.drain(..) {
            scheduler.cancel(token);
        }
        self.pending.clear();
        self.root = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::scheduler::ScheduledAction;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_unload_releases_everything() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let child = world.spawn(ChildOf(b)).id();

        let mut scheduler = SceneScheduler::default();
        let rain = scheduler.schedule_every_frame(ScheduledAction::AdvanceRainTime);
        let strike = scheduler.schedule_timer(3.0, ScheduledAction::LightningStrike);
        let unrelated = scheduler.schedule_timer(1.0, ScheduledAction::LightningStrike);

        let mut handle = SceneHandle::new(SceneId::FlowerStorm);
        handle.own(a);
        handle.own(b);
        handle.own_token(rain);
        handle.own_token(strike);
        handle.await_model("effects/simple_flower_loop.glb", ModelPurpose::Centerpiece);

        world.insert_resource(scheduler);
        world
            .run_system_once(move |mut commands: Commands, mut scheduler: ResMut<SceneScheduler>| {
                handle.unload(&mut commands, &mut scheduler);
                assert!(handle.objects().is_empty());
                assert!(handle.tokens().is_empty());
                assert!(!handle.has_pending());
            })
            .unwrap();

        assert!(world.get_entity(a).is_err());
        assert!(world.get_entity(b).is_err());
        assert!(world.get_entity(child).is_err());

        let scheduler = world.resource::<SceneScheduler>();
        assert!(!scheduler.is_scheduled(rain));
        assert!(!scheduler.is_scheduled(strike));
        assert!(scheduler.is_scheduled(unrelated));
    }

    #[test]
    fn test_replace_token_keeps_ownership() {
        let mut scheduler = SceneScheduler::default();
        let first = scheduler.schedule_timer(0.0, ScheduledAction::LightningStrike);
        let second = scheduler.schedule_timer(5.0, ScheduledAction::LightningStrike);

        let mut handle = SceneHandle::new(SceneId::SpaceStorm);
        handle.own_token(first);
        handle.replace_token(first, second);

        assert!(!handle.owns_token(first));
        assert!(handle.owns_token(second));
        assert_eq!(handle.tokens().len(), 1);
    }
}
