use std::f32::consts::TAU;

use constants::garden::BUSH_ACCENT_CHANCE;
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::request::Point;
use crate::unit;

const LEAF_COLOR: [f32; 3] = [0.1, 0.3, 0.1];
const ACCENT_COLOR: [f32; 3] = [1.0, 0.5, 1.0];

/// Low dome of foliage with the odd magenta blossom.
pub fn bush(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    base: Point,
    radius: f32,
    height: f32,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    for _ in 0..budget {
        let angle = unit(rng) * TAU;
        let r = unit(rng) * radius;
        let y = unit(rng).powi(2) * height;

        let position = [base[0] + angle.cos() * r, base[1] + y, base[2] + angle.sin() * r];
        let color = if unit(rng) > 1.0 - BUSH_ACCENT_CHANCE {
            ACCENT_COLOR
        } else {
            LEAF_COLOR
        };

        if !buffer.write(&mut cursor, position, color) {
            break;
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
    fn test_bush_accent_fraction() {
        let mut rng = ChaCha8Rng::seed_from_u64(31);
        let mut buffer = PointCloudBuffer::with_capacity(20_000);

        let cursor = bush(&mut buffer, 0, [0.0, -22.0, -30.0], 8.0, 6.0, 20_000, &mut rng);
        assert_eq!(cursor, 20_000);

        let accents = buffer.colors().iter().filter(|c| **c == ACCENT_COLOR).count();
        let fraction = accents as f32 / 20_000.0;
        assert!((0.03..0.07).contains(&fraction), "accent fraction {fraction}");
    }

    #[test]
    fn test_bush_hugs_ground() {
        let mut rng = ChaCha8Rng::seed_from_u64(32);
        let mut buffer = PointCloudBuffer::with_capacity(5000);
        bush(&mut buffer, 0, [0.0; 3], 8.0, 6.0, 5000, &mut rng);

        let low = buffer.positions().iter().filter(|p| p[1] < 1.5).count();
        // u^2 * 6 < 1.5 whenever u < 0.5
        assert!(low > 2250, "expected half the bush below 1.5, got {low}");
        assert!(buffer.positions().iter().all(|p| p[0].hypot(p[2]) <= 8.0 + 1e-4));
    }
}
