/// Floor height shared by every procedural structure.
pub const GROUND_LEVEL: f32 = -22.0;

pub const GRASS_FIELD_WIDTH: f32 = 90.0;
pub const GRASS_FIELD_DEPTH: f32 = 70.0;
pub const GRASS_HEIGHT_EXPONENT: i32 = 5;
pub const GRASS_HUE: (f32, f32) = (0.25, 0.1);
pub const GRASS_SATURATION: (f32, f32) = (0.5, 0.4);
pub const GRASS_LIGHTNESS: (f32, f32) = (0.3, 0.4);

pub const STEM_WIGGLE_FREQUENCY: f32 = 12.0;
pub const STEM_WIGGLE_AMPLITUDE: f32 = 0.15;

pub const FLOWER_MIN_PETALS: u32 = 5;
pub const FLOWER_MAX_PETALS: u32 = 8;
pub const FLOWER_RADIUS_SCALE: (f32, f32) = (1.2, 0.8);
pub const FLOWER_CUP_HEIGHT: f32 = 2.0;
pub const FLOWER_CUP_EXPONENT: f32 = 1.5;

pub const PINE_HEIGHT: f32 = 35.0;
pub const PINE_BASE_WIDTH: f32 = 12.0;
pub const PINE_TRUNK_SHARE: f32 = 0.2;
pub const PINE_TRUNK_RADIUS: f32 = 1.8;
pub const PINE_TIERS: u32 = 12;

pub const WILLOW_TRUNK_HEIGHT: f32 = 16.0;
pub const WILLOW_TRUNK_RADIUS: f32 = 2.2;
pub const WILLOW_CROWN_HEIGHT: f32 = 15.0;
pub const WILLOW_ROOT_BRANCHES: u32 = 4;
pub const WILLOW_BRANCH_LENGTH: f32 = 4.0;
pub const WILLOW_BRANCH_DEPTH: u32 = 2;
/// Deeper crowns are clamped to this many fork levels.
pub const WILLOW_MAX_BRANCH_DEPTH: u32 = 6;
pub const WILLOW_BRANCH_POINTS: usize = 4000;
pub const WILLOW_HORIZONTAL_SPREAD: f32 = 2.5;
pub const WILLOW_UPWARD_FORCE: f32 = 0.5;
pub const WILLOW_FORK_ANGLE: f32 = 0.8;
pub const WILLOW_LENGTH_DECAY: f32 = 0.8;
/// Branches at or above this depth grow no vines.
pub const WILLOW_VINE_DEPTH_LIMIT: u32 = 3;
pub const WILLOW_VINES_PER_TIP: u32 = 12;
pub const WILLOW_VINE_POINTS: usize = 1200;

pub const TRUNK_LEVELS: usize = 200;
pub const TRUNK_POINTS_PER_LEVEL: usize = 120;

pub const VINE_MIN_LENGTH: f32 = 15.0;
pub const VINE_LENGTH_RANGE: f32 = 15.0;

pub const BUSH_RADIUS: f32 = 8.0;
pub const BUSH_HEIGHT: f32 = 6.0;
pub const BUSH_ACCENT_CHANCE: f32 = 0.05;

pub const MASTER_GARDEN_CAPACITY: usize = 1_200_000;
pub const MASTER_GRASS_POINTS: usize = 300_000;
pub const MASTER_PINE_POSITION: [f32; 3] = [-25.0, GROUND_LEVEL, -45.0];
pub const MASTER_PINE_POINTS: usize = 80_000;
pub const MASTER_WILLOW_POSITION: [f32; 3] = [25.0, GROUND_LEVEL, -40.0];
pub const MASTER_WILLOW_POINTS: usize = 150_000;
pub const MASTER_BUSH_COUNT: u32 = 4;
pub const MASTER_BUSH_POINTS: usize = 20_000;
pub const MASTER_FLOWER_COUNT: u32 = 300;
pub const MASTER_STEM_POINTS: usize = 300;
pub const MASTER_HEAD_POINTS: usize = 1500;

pub const HYBRID_GARDEN_CAPACITY: usize = 800_000;
pub const HYBRID_GRASS_POINTS: usize = 500_000;
pub const HYBRID_BUSH_COUNT: u32 = 2;
pub const HYBRID_BUSH_POINTS: usize = 15_000;
pub const HYBRID_POINT_SIZE: f32 = 0.03;
pub const HYBRID_OPACITY: f32 = 0.3;

pub const DEFAULT_TEXTURED_POINT_SIZE: f32 = 0.02;
pub const DEFAULT_TEXTURED_POINT_MANY: f32 = 2000.0;

/// One imported model composited into the hybrid garden as textured points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    pub url: &'static str,
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
    pub point_size: f32,
    pub point_many: f32,
}

const fn placed(
    url: &'static str,
    position: [f32; 3],
    scale: f32,
    rotation: [f32; 3],
    point_size: f32,
    point_many: f32,
) -> ModelPlacement {
    ModelPlacement {
        url,
        position,
        scale: [scale, scale, scale],
        rotation,
        point_size,
        point_many,
    }
}

const NO_ROTATION: [f32; 3] = [0.0, 0.0, 0.0];

pub const HYBRID_GARDEN_MODELS: &[ModelPlacement] = &[
    placed("models/flower.glb", [-25.0, 15.0, -30.0], 10.0, [0.0, 0.0, 3.0], 0.03, 2000.0),
    placed("models/white_flower.glb", [-25.0, -15.0, -28.0], 20.0, NO_ROTATION, 0.03, 4000.0),
    placed("models/white_flower.glb", [5.0, -13.0, -23.0], 20.0, NO_ROTATION, 0.02, 4000.0),
    placed("models/white_flower.glb", [17.0, -13.0, -32.0], 20.0, NO_ROTATION, 0.02, 4000.0),
    placed("models/white_flower.glb", [-3.0, -13.0, -35.0], 20.0, NO_ROTATION, 0.02, 4000.0),
    placed("models/white_flower.glb", [-10.0, -13.0, -33.0], 20.0, NO_ROTATION, 0.02, 4000.0),
    placed("models/white_flower.glb", [-2.0, -16.0, -32.0], 15.0, NO_ROTATION, 0.02, 4000.0),
    placed("models/white_flower.glb", [-8.0, -16.0, -28.0], 10.0, NO_ROTATION, 0.02, 2000.0),
    placed("models/pink_bush.glb", [-20.0, -13.0, -30.0], 10.0, NO_ROTATION, DEFAULT_TEXTURED_POINT_SIZE, DEFAULT_TEXTURED_POINT_MANY),
    placed("models/pink_bush.glb", [0.0, -13.0, -36.0], 10.0, NO_ROTATION, DEFAULT_TEXTURED_POINT_SIZE, DEFAULT_TEXTURED_POINT_MANY),
    placed("models/pink_bush.glb", [20.0, -13.0, -30.0], 10.0, NO_ROTATION, DEFAULT_TEXTURED_POINT_SIZE, DEFAULT_TEXTURED_POINT_MANY),
    placed("models/desert_bush.glb", [18.0, -7.0, -36.0], 8.0, NO_ROTATION, 0.02, 2000.0),
    placed("models/tall_bush.glb", [25.0, -10.0, -27.0], 20.0, [0.0, 10.0, 0.0], 0.03, 2000.0),
    placed("models/red_bush.glb", [5.0, -11.2, -27.0], 10.0, [0.1, 10.0, 0.0], 0.03, 2000.0),
    ModelPlacement {
        url: "models/simple_tree.glb",
        position: [0.0, 4.0, -35.0],
        scale: [25.0, 25.0, 26.0],
        rotation: NO_ROTATION,
        point_size: 0.02,
        point_many: 10000.0,
    },
    placed("models/simple_tree.glb", [-20.0, -5.0, -35.0], 20.0, [0.0, 5.5, 0.0], 0.03, 8000.0),
];
