/// Centerpiece placement for one storm scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormPreset {
    pub centerpiece_url: &'static str,
    pub position: [f32; 3],
    pub scale: f32,
}

pub const FLOWER_STORM: StormPreset = StormPreset {
    centerpiece_url: "effects/simple_flower_loop.glb",
    position: [0.0, 0.0, -50.0],
    scale: 5.0,
};

pub const SPACE_STORM: StormPreset = StormPreset {
    centerpiece_url: "effects/need_some_space.glb",
    position: [0.0, 0.0, -50.0],
    scale: 70.5,
};
