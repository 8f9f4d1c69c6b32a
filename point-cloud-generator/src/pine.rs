use std::f32::consts::TAU;

use constants::garden::{PINE_TRUNK_RADIUS, PINE_TRUNK_SHARE};
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::request::Point;
use crate::unit;

const BARK_COLOR: [f32; 3] = [0.12, 0.08, 0.05];

/// Conical pine: a tapering trunk plus `tiers` stacked needle discs.
#[allow(clippy::too_many_arguments)]
pub fn pine_tree(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    base: Point,
    height: f32,
    base_width: f32,
    tiers: u32,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    let trunk_points = (budget as f32 * PINE_TRUNK_SHARE) as usize;
    let leaf_points = budget - trunk_points;

    for _ in 0..trunk_points {
        let t = unit(rng);
        let radius = PINE_TRUNK_RADIUS * (1.0 - t * 0.9);
        let angle = unit(rng) * TAU;
        let noise = (unit(rng) - 0.5) * 0.2;

        let position = [
            base[0] + angle.cos() * (radius + noise),
            base[1] + t * height,
            base[2] + angle.sin() * (radius + noise),
        ];
        if !buffer.write(&mut cursor, position, BARK_COLOR) {
            return cursor;
        }
    }

    if tiers == 0 {
        return cursor;
    }
    let points_per_tier = leaf_points / tiers as usize;

    for tier in 0..tiers {
        let level = tier as f32 / tiers as f32;
        let tier_height = level * height * 0.8 + height * 0.15;
        let tier_radius = base_width * (1.0 - level);

        for _ in 0..points_per_tier {
            let angle = unit(rng) * TAU;
            let dist = unit(rng).powf(1.5) * tier_radius;
            let droop = (dist * 0.5).sin() * 2.0;
            let variety = unit(rng);

            let position = [
                base[0] + angle.cos() * dist,
                base[1] + tier_height - droop + (unit(rng) - 0.5) * 1.5,
                base[2] + angle.sin() * dist,
            ];
            let color = [0.0, 0.3 + variety * 0.3, 0.1 + variety * 0.2];

            if !buffer.write(&mut cursor, position, color) {
                return cursor;
            }
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_pine_splits_budget_between_trunk_and_tiers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut buffer = PointCloudBuffer::with_capacity(10_000);

        let cursor = pine_tree(&mut buffer, 0, [0.0; 3], 35.0, 12.0, 12, 6000, &mut rng);

        // 1200 trunk points plus 12 tiers of 400 needles.
        assert_eq!(cursor, 6000);
        let bark = buffer.colors().iter().filter(|c| **c == BARK_COLOR).count();
        assert_eq!(bark, 1200);
    }

    #[test]
    fn test_pine_canopy_narrows_with_height() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut buffer = PointCloudBuffer::with_capacity(12_000);

        pine_tree(&mut buffer, 0, [0.0; 3], 35.0, 12.0, 12, 12_000, &mut rng);

        let needles: Vec<_> = buffer
            .positions()
            .iter()
            .zip(buffer.colors())
            .filter(|(_, c)| **c != BARK_COLOR)
            .map(|(p, _)| *p)
            .collect();

        let widest_low = needles
            .iter()
            .filter(|p| p[1] < 10.0)
            .map(|p| p[0].hypot(p[2]))
            .fold(0.0_f32, f32::max);
        let widest_high = needles
            .iter()
            .filter(|p| p[1] > 28.0)
            .map(|p| p[0].hypot(p[2]))
            .fold(0.0_f32, f32::max);

        assert!(widest_low <= 12.0 + 1e-3);
        assert!(widest_high < widest_low, "cone must narrow: {widest_high} vs {widest_low}");
    }

    #[test]
    fn test_pine_points_are_finite() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut buffer = PointCloudBuffer::with_capacity(3000);
        pine_tree(&mut buffer, 0, [-25.0, -22.0, -45.0], 35.0, 12.0, 12, 3000, &mut rng);

        assert!(buffer.positions().iter().flatten().all(|v| v.is_finite()));
    }
}
