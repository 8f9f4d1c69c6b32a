pub const ROOM_WIDTH: f32 = 90.0;
pub const ROOM_HEIGHT: f32 = 45.0;
pub const ROOM_DEPTH: f32 = 70.0;
pub const GRID_SIZE: f32 = 7.0;

/// Neon grid colour as packed 0xRRGGBB.
pub const NEON_COLOR: u32 = 0xffffff;
pub const EMISSIVE_INTENSITY: f32 = 1.0;
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const STORM_BLOOM_STRENGTH: f32 = 2.5;
pub const FOG_DENSITY: f32 = 0.015;

pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_INITIAL_Z: f32 = 0.0;

pub const MOTION_ENABLED: bool = true;
pub const PARALLAX_FACTOR: f32 = 0.25;
pub const SMOOTHING: f32 = 0.3;

pub const MONITOR_WIDTH: f32 = 32.0;
pub const MONITOR_HEIGHT: f32 = 20.0;
pub const TRACKING_SENSITIVITY: f32 = 12.0;

/// Resting eye estimate before the first landmark frame arrives.
pub const INITIAL_EYE_POSITION: [f32; 3] = [0.0, 0.0, 60.0];

/// Face mesh landmark indices used for the pupil midpoint.
pub const LEFT_EYE_LANDMARK: usize = 159;
pub const RIGHT_EYE_LANDMARK: usize = 386;

pub const AMBIENT_LIGHT_BRIGHTNESS: f32 = 0.5;
pub const POINT_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 10.0];
pub const POINT_LIGHT_RANGE: f32 = 800.0;
pub const POINT_LIGHT_INTENSITY: f32 = 2_000_000.0;
/// Relative amplitude of the point light breathing cycle.
pub const LIGHT_BREATH_AMPLITUDE: f32 = 0.1;
pub const LIGHT_BREATH_RATE: f32 = 2.0;

/// Fixed mixer step, the installation assumes a 60 Hz display.
pub const MIXER_TIMESTEP: f32 = 1.0 / 60.0;
pub const MIXER_TIME_SCALE: f32 = 0.8;

pub const CLAP_ENABLED: bool = false;
pub const CLAP_THRESHOLD: f32 = 0.2;
pub const CLAP_COOLDOWN_MS: u64 = 500;

pub const SCENE_COUNT: u8 = 4;
