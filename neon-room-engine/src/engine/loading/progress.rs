use bevy::prelude::*;

#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub settings_loaded: bool,
    pub room_built: bool,
}

impl LoadingProgress {
    pub fn is_complete(&self) -> bool {
        self.settings_loaded && self.room_built
    }
}
