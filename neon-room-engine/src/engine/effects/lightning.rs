use bevy::prelude::*;
use constants::effects::*;
use rand::Rng;

/// Flash intensity fed to the rain shader.
#[derive(Resource, Debug, Default)]
pub struct LightningFlash {
    pub intensity: f32,
    /// Strikes since startup.
    pub strikes: u32,
}

impl LightningFlash {
    pub fn strike(&mut self) {
        self.intensity = 1.0;
        self.strikes += 1;
        debug!("Lightning strike #{}", self.strikes);
    }

    /// One frame of fade-out.
    pub fn decay(&mut self) {
        if self.intensity <= 0.0 {
            return;
        }
        self.intensity *= LIGHTNING_DECAY;
        if self.intensity <= LIGHTNING_CUTOFF {
            self.intensity = 0.0;
        }
    }
}

/// Delay before the next strike, uniform in 2..8 seconds.
pub fn lightning_delay(rng: &mut impl Rng) -> f32 {
    LIGHTNING_MIN_DELAY_SECS + rng.gen_range(0.0..1.0) * LIGHTNING_DELAY_RANGE_SECS
}

pub fn decay_lightning(mut lightning: ResMut<LightningFlash>) {
    lightning.decay();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_flash_fades_to_zero() {
        let mut flash = LightningFlash::default();
        flash.strike();
        assert_eq!(flash.intensity, 1.0);

        let mut frames = 0;
        while flash.intensity > 0.0 {
            flash.decay();
            frames += 1;
            assert!(frames < 200, "flash never faded");
        }
        // 0.95^90 is the first power below 0.01
        assert_eq!(frames, 90);
        assert_eq!(flash.strikes, 1);
    }

    #[test]
    fn test_delay_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let delay = lightning_delay(&mut rng);
            assert!((2.0..8.0).contains(&delay));
        }
    }
}
