use std::collections::BTreeMap;

use bevy::prelude::*;

/// Cancellation token returned by every schedule call. The scene that
/// scheduled the task owns the token and must cancel it on unload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskToken(u64);

/// Work a scheduled task performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    LightningStrike,
    AdvanceRainTime,
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Fires once after the remaining seconds elapse, then is dropped.
    Timer { remaining: f32 },
    /// Fires on every tick until cancelled.
    EveryFrame,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    action: ScheduledAction,
    trigger: Trigger,
}

/// Cooperative timers and per-frame callbacks, ticked once per frame.
#[derive(Resource, Debug, Default)]
pub struct SceneScheduler {
    next_token: u64,
    tasks: BTreeMap<TaskToken, ScheduledTask>,
}

impl SceneScheduler {
    pub fn schedule_timer(&mut self, delay_secs: f32, action: ScheduledAction) -> TaskToken {
        self.insert(ScheduledTask {
            action,
            trigger: Trigger::Timer {
                remaining: delay_secs.max(0.0),
            },
        })
    }

    pub fn schedule_every_frame(&mut self, action: ScheduledAction) -> TaskToken {
        self.insert(ScheduledTask {
            action,
            trigger: Trigger::EveryFrame,
        })
    }

    fn insert(&mut self, task: ScheduledTask) -> TaskToken {
        let token = TaskToken(self.next_token);
        self.next_token += 1;
        self.tasks.insert(token, task);
        token
    }

    /// Returns whether the task was still pending.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        self.tasks.remove(&token).is_some()
    }

    pub fn is_scheduled(&self, token: TaskToken) -> bool {
        self.tasks.contains_key(&token)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance every task by `dt` seconds and return those that fired, in
    /// scheduling order. Fired timers are removed.
    pub fn tick(&mut self, dt: f32) -> Vec<(TaskToken, ScheduledAction)> {
        let mut fired = Vec::new();
        let mut expired = Vec::new();

        for (token, task) in self.tasks.iter_mut() {
            match &mut task.trigger {
                Trigger::EveryFrame => fired.push((*token, task.action)),
                Trigger::Timer { remaining } => {
                    *remaining -= dt;
                    if *remaining <= 0.0 {
                        fired.push((*token, task.action));
                        expired.push(*token);
                    }
                }
            }
        }

        for token in expired {
            self.tasks.remove(&token);
        }
        fired
    }
}
