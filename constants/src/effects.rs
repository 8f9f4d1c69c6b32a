/// Per-frame increment of the shared effect clock.
pub const EFFECT_TIME_STEP: f32 = 0.016;

pub const FIREFLY_COUNT: usize = 800;
pub const FIREFLY_SPREAD_X: f32 = 160.0;
pub const FIREFLY_MIN_Y: f32 = 5.0;
pub const FIREFLY_SPREAD_Y: f32 = 35.0;
pub const FIREFLY_SPREAD_Z: f32 = 120.0;
pub const FIREFLY_GLOW_DISTANCE: f32 = 15.0;

pub const RAIN_COUNT: usize = 1500;
pub const RAIN_SPREAD_X: f32 = 180.0;
pub const RAIN_MIN_Y: f32 = 35.0;
pub const RAIN_SPREAD_Y: f32 = 10.0;
pub const RAIN_SPREAD_Z: f32 = 140.0;
pub const RAIN_MIN_SPEED: f32 = 0.8;
pub const RAIN_SPEED_RANGE: f32 = 2.0;

pub const LIGHTNING_DECAY: f32 = 0.95;
pub const LIGHTNING_CUTOFF: f32 = 0.01;
pub const LIGHTNING_MIN_DELAY_SECS: f32 = 2.0;
pub const LIGHTNING_DELAY_RANGE_SECS: f32 = 6.0;

pub const PULSE_MAX_RADIUS: f32 = 150.0;
pub const PULSE_SPEED: f32 = 1.2;
pub const PULSE_CHANCE_PER_FRAME: f64 = 0.001;
