use bevy::prelude::*;

use super::CollaboratorStatus;
use crate::engine::assets::room_settings::RoomSettings;
use crate::engine::scenes::controller::{SceneController, SwitchSceneEvent};
use crate::engine::scenes::next_in_cycle;

/// Latest microphone frequency bins (0-255). Taken by the next frame update.
#[derive(Resource, Debug, Default)]
pub struct AudioSpectrum {
    pub bins: Option<Vec<u8>>,
}

#[derive(Resource, Debug, Default)]
pub struct ClapDetector {
    last_clap_ms: Option<u64>,
}

impl ClapDetector {
    /// True when `level` is loud enough and the cooldown since the previous
    /// clap has passed. A detected clap restarts the cooldown.
    pub fn detect(&mut self, level: f32, now_ms: u64, threshold: f32, cooldown_ms: u64) -> bool {
        if level <= threshold {
            return false;
        }
        if let Some(last) = self.last_clap_ms {
            if now_ms.saturating_sub(last) <= cooldown_ms {
                return false;
            }
        }
        self.last_clap_ms = Some(now_ms);
        true
    }
}

/// Mean bin energy normalised to 0-1.
pub fn spectrum_level(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|b| u32::from(*b)).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

/// Cycle to the next scene on a clap.
pub fn detect_claps(
    time: Res<Time>,
    settings: Res<RoomSettings>,
    status: Res<CollaboratorStatus>,
    controller: Res<SceneController>,
    mut spectrum: ResMut<AudioSpectrum>,
    mut detector: ResMut<ClapDetector>,
    mut switches: EventWriter<SwitchSceneEvent>,
) {
    let Some(bins) = spectrum.bins.take() else {
        return;
    };
    if !settings.audio.clap_enabled || status.audio_disabled {
        return;
    }

    let level = spectrum_level(&bins);
    let now_ms = time.elapsed().as_millis() as u64;
    if detector.detect(
        level,
        now_ms,
        settings.audio.clap_threshold,
        settings.audio.clap_cooldown_ms,
    ) {
        let scene = next_in_cycle(controller.current_number());
        info!("Clap detected, switching to Scene {}", scene.number());
        switches.write(SwitchSceneEvent { scene });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum_level() {
        assert_eq!(spectrum_level(&[]), 0.0);
        assert_eq!(spectrum_level(&[255; 128]), 1.0);
        assert!((spectrum_level(&[0, 255]) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cooldown_suppresses_repeat_claps() {
        let mut detector = ClapDetector::default();

        assert!(detector.detect(0.5, 1000, 0.2, 500));
        assert!(!detector.detect(0.5, 1400, 0.2, 500));
        assert!(!detector.detect(0.5, 1500, 0.2, 500));
        assert!(detector.detect(0.5, 1501, 0.2, 500));
    }

    #[test]
    fn test_quiet_frames_never_clap() {
        let mut detector = ClapDetector::default();
        assert!(!detector.detect(0.2, 10_000, 0.2, 500));
        assert!(!detector.detect(0.05, 20_000, 0.2, 500));
    }
}
