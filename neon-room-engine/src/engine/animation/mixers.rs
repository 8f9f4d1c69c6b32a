use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use constants::room::{MIXER_TIME_SCALE, MIXER_TIMESTEP};

/// Drives every clip of one spawned model back and forth over the longest
/// clip's duration.
#[derive(Debug, Clone)]
pub struct PingPongMixer {
    pub root: Entity,
    /// Descendant carrying the `AnimationPlayer`, known once the scene spawns.
    pub player: Option<Entity>,
    pub graph: Handle<AnimationGraph>,
    pub nodes: Vec<AnimationNodeIndex>,
    pub duration: f32,
    pub time: f32,
    pub time_scale: f32,
    direction: f32,
}

impl PingPongMixer {
    pub fn new(
        root: Entity,
        graph: Handle<AnimationGraph>,
        nodes: Vec<AnimationNodeIndex>,
        duration: f32,
    ) -> Self {
        Self {
            root,
            player: None,
            graph,
            nodes,
            duration,
            time: 0.0,
            time_scale: MIXER_TIME_SCALE,
            direction: 1.0,
        }
    }

    /// Step the clip time by `dt` scaled by `time_scale`, reflecting at either end.
    pub fn advance(&mut self, dt: f32) {
        if self.duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale * self.direction;
        if self.time >= self.duration {
            self.time = 2.0 * self.duration - self.time;
            self.direction = -1.0;
        } else if self.time <= 0.0 {
            self.time = -self.time;
            self.direction = 1.0;
        }
        self.time = self.time.clamp(0.0, self.duration);
    }

    pub fn is_reversing(&self) -> bool {
        self.direction < 0.0
    }
}

/// Mixers of the active scene. Cleared on every scene transition.
#[derive(Resource, Debug, Default)]
pub struct MixerRegistry {
    mixers: Vec<PingPongMixer>,
}

impl MixerRegistry {
    pub fn register(&mut self, mixer: PingPongMixer) {
        self.mixers.push(mixer);
    }

    pub fn clear(&mut self) {
        self.mixers.clear();
    }

    pub fn len(&self) -> usize {
        self.mixers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mixers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PingPongMixer> {
        self.mixers.iter()
    }

    fn for_root(&mut self, root: Entity) -> Option<&mut PingPongMixer> {
        self.mixers.iter_mut().find(|mixer| mixer.root == root)
    }
}

/// Observer on model roots: bind the mixer's graph to the animation player
/// the glTF scene spawned under the root.
pub fn attach_mixer_player(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    players: Query<(), With<AnimationPlayer>>,
    mut registry: ResMut<MixerRegistry>,
) {
    let root = trigger.target();
    let Some(mixer) = registry.for_root(root) else {
        return;
    };

    let Some(player) = children
        .iter_descendants(root)
        .find(|entity| players.contains(*entity))
    else {
        warn!("Animated model has no animation player");
        return;
    };

    commands
        .entity(player)
        .insert(AnimationGraphHandle(mixer.graph.clone()));
    mixer.player = Some(player);
}

/// Advance every mixer by the fixed nominal step and seek its clips.
pub fn advance_mixers(
    mut registry: ResMut<MixerRegistry>,
    mut players: Query<&mut AnimationPlayer>,
) {
    for mixer in registry.mixers.iter_mut() {
        mixer.advance(MIXER_TIMESTEP);

        let Some(entity) = mixer.player else {
            continue;
        };
        let Ok(mut player) = players.get_mut(entity) else {
            continue;
        };
        for node in &mixer.nodes {
            if player.animation(*node).is_none() {
                player.play(*node).set_speed(0.0);
            }
            if let Some(animation) = player.animation_mut(*node) {
                animation.seek_to(mixer.time);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixer(duration: f32) -> PingPongMixer {
        PingPongMixer::new(Entity::PLACEHOLDER, Handle::default(), Vec::new(), duration)
    }

    #[test]
    fn test_ping_pong_reverses_at_both_ends() {
        let mut mixer = mixer(1.0);
        mixer.time_scale = 1.0;

        for _ in 0..6 {
            mixer.advance(0.2);
        }
        // 1.2s forward reflects to 0.8 on the way back
        assert!(mixer.is_reversing());
        assert!((mixer.time - 0.8).abs() < 1e-5);

        for _ in 0..5 {
            mixer.advance(0.2);
        }
        assert!(!mixer.is_reversing());
        assert!((mixer.time - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_time_scale_applies_to_nominal_step() {
        let mut mixer = mixer(10.0);
        mixer.advance(MIXER_TIMESTEP);
        assert!((mixer.time - MIXER_TIMESTEP * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_length_clip_stays_put() {
        let mut mixer = mixer(0.0);
        mixer.advance(1.0);
        assert_eq!(mixer.time, 0.0);
    }

    #[test]
    fn test_registry_clear() {
        let mut registry = MixerRegistry::default();
        registry.register(mixer(1.0));
        registry.register(mixer(2.0));
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }
}
