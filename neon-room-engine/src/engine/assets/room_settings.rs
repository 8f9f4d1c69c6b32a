use bevy::prelude::*;
use constants::room::*;
use serde::{Deserialize, Serialize};

/// Installation tunables loaded once from `config/room_settings.json`.
/// Every field falls back to the shipped value when missing from the file.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource, Default)]
#[serde(default)]
pub struct RoomSettings {
    pub room: RoomDimensions,
    pub visuals: VisualSettings,
    pub camera: CameraSettings,
    pub motion: MotionSettings,
    pub monitor: MonitorSettings,
    pub tracking: TrackingSettings,
    pub audio: AudioSettings,
    pub garden: GardenSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub grid_size: f32,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self {
            width: ROOM_WIDTH,
            height: ROOM_HEIGHT,
            depth: ROOM_DEPTH,
            grid_size: GRID_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Linear RGB in `[0, 1]`.
    pub neon_color: [f32; 3],
    pub bloom_strength: f32,
    pub storm_bloom_strength: f32,
    pub emissive_intensity: f32,
    pub fog_density: f32,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            neon_color: unpack_rgb(NEON_COLOR),
            bloom_strength: BLOOM_STRENGTH,
            storm_bloom_strength: STORM_BLOOM_STRENGTH,
            emissive_intensity: EMISSIVE_INTENSITY,
            fog_density: FOG_DENSITY,
        }
    }
}

impl VisualSettings {
    pub fn neon_linear(&self) -> LinearRgba {
        let [r, g, b] = self.neon_color;
        LinearRgba::rgb(r, g, b) * self.emissive_intensity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub initial_z: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: CAMERA_FOV_DEGREES,
            initial_z: CAMERA_INITIAL_Z,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    pub enabled: bool,
    pub parallax_factor: f32,
    pub smoothing: f32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            enabled: MOTION_ENABLED,
            parallax_factor: PARALLAX_FACTOR,
            smoothing: SMOOTHING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            width: MONITOR_WIDTH,
            height: MONITOR_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    pub sensitivity: f32,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            sensitivity: TRACKING_SENSITIVITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub clap_enabled: bool,
    /// Normalised average spectrum level that counts as a clap.
    pub clap_threshold: f32,
    pub clap_cooldown_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            clap_enabled: CLAP_ENABLED,
            clap_threshold: CLAP_THRESHOLD,
            clap_cooldown_ms: CLAP_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenSettings {
    /// Scales every procedural point budget of the garden scene.
    pub density: f32,
}

impl Default for GardenSettings {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

fn unpack_rgb(packed: u32) -> [f32; 3] {
    [
        ((packed >> 16) & 0xff) as f32 / 255.0,
        ((packed >> 8) & 0xff) as f32 / 255.0,
        (packed & 0xff) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_shipped_defaults() {
        let json = r#"{ "room": { "depth": 100.0 }, "audio": { "clap_enabled": true } }"#;
        let settings: RoomSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.room.depth, 100.0);
        assert_eq!(settings.room.width, ROOM_WIDTH);
        assert!(settings.audio.clap_enabled);
        assert_eq!(settings.audio.clap_cooldown_ms, 500);
        assert_eq!(settings.motion.smoothing, 0.3);
        assert_eq!(settings.visuals.neon_color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_shipped_file_matches_defaults() {
        let json = include_str!("../../../assets/config/room_settings.json");
        let settings: RoomSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings, RoomSettings::default());
    }

    #[test]
    fn test_unpack_rgb() {
        assert_eq!(unpack_rgb(0xff0000), [1.0, 0.0, 0.0]);
        assert_eq!(unpack_rgb(0x00ff00)[1], 1.0);
    }
}
