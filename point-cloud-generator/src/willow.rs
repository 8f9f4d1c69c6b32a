use std::f32::consts::TAU;

use constants::garden::*;
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::color::hsl_to_rgb;
use crate::request::{Point, WillowShape};
use crate::unit;

const BRANCH_COLOR: [f32; 3] = [0.08, 0.1, 0.08];

/// Filled, tapering cylinder of bark.
///
/// Each of the stacked levels is an area-uniform disk (`sqrt(u)` radius), so
/// the trunk reads as a solid volume rather than a hollow pipe.
pub fn trunk(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    base: Point,
    height: f32,
    base_radius: f32,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    let levels = TRUNK_LEVELS.min(budget.max(1));
    let per_level = budget / levels;

    for level in 0..levels {
        let t = level as f32 / levels as f32;
        let radius = base_radius * (1.0 - t * 0.7);
        let color = hsl_to_rgb(0.1, 0.5, 0.05 + t * 0.1);

        for _ in 0..per_level {
            let angle = unit(rng) * TAU;
            let r = unit(rng).sqrt() * radius;
            let jitter = (unit(rng) - 0.5) * 0.3;

            let position = [
                base[0] + angle.cos() * r + jitter,
                base[1] + t * height,
                base[2] + angle.sin() * r + jitter,
            ];
            if !buffer.write(&mut cursor, position, color) {
                return cursor;
            }
        }
    }
    cursor
}

/// Drooping stream of mist that widens and sways on its way down.
pub fn drop_vine(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    start: Point,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    let length = VINE_MIN_LENGTH + unit(rng) * VINE_LENGTH_RANGE;

    for i in 0..budget {
        let t = i as f32 / budget as f32;
        let spread = 0.8 + t * 1.5;
        let angle = unit(rng) * TAU;
        let radius = unit(rng).sqrt() * spread;
        let sway = (t * 5.0 + start[0]).sin() * 0.5;

        let position = [
            start[0] + angle.cos() * radius + sway,
            start[1] - t * length,
            start[2] + angle.sin() * radius + sway,
        ];
        let color = hsl_to_rgb(0.5 + unit(rng) * 0.1, 0.8, 0.3);

        if !buffer.write(&mut cursor, position, color) {
            break;
        }
    }
    cursor
}

/// Point counts for one willow, scaled so the whole tree fits its budget.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WillowCounts {
    trunk: usize,
    branch: usize,
    vine: usize,
}

impl WillowCounts {
    fn natural() -> Self {
        Self {
            trunk: TRUNK_LEVELS * TRUNK_POINTS_PER_LEVEL,
            branch: WILLOW_BRANCH_POINTS,
            vine: WILLOW_VINE_POINTS,
        }
    }

    fn scaled(shape: &WillowShape, depth: u32, budget: usize) -> Self {
        let natural = Self::natural();
        let total = natural.total(shape.root_branches, depth);
        if total == 0 {
            return natural;
        }

        let factor = budget as f64 / total as f64;
        let scale = |n: usize| (n as f64 * factor).floor() as usize;
        Self {
            trunk: scale(natural.trunk),
            branch: scale(natural.branch),
            vine: scale(natural.vine),
        }
    }

    /// Points produced by one branch of the given depth, children included.
    fn branch_total(&self, depth: u32) -> usize {
        if depth == 0 {
            return 0;
        }
        let vines = if depth < WILLOW_VINE_DEPTH_LIMIT {
            WILLOW_VINES_PER_TIP as usize * self.vine
        } else {
            0
        };
        self.branch
            .saturating_add(vines)
            .saturating_add(self.branch_total(depth - 1).saturating_mul(2))
    }

    fn total(&self, root_branches: u32, depth: u32) -> usize {
        self.trunk
            .saturating_add((root_branches as usize).saturating_mul(self.branch_total(depth)))
    }
}

struct BranchGrower<'a, R: Rng> {
    buffer: &'a mut PointCloudBuffer,
    cursor: usize,
    counts: WillowCounts,
    rng: &'a mut R,
}

impl<R: Rng> BranchGrower<'_, R> {
    /// Grow one branch tube, hang vines off its tip, then fork in two.
    ///
    /// Returns `false` once the buffer is full so the caller can stop.
    fn grow(&mut self, start: Point, angle: f32, length: f32, depth: u32) -> bool {
        if depth == 0 {
            return true;
        }

        let dir = [
            angle.cos() * WILLOW_HORIZONTAL_SPREAD * 0.5,
            WILLOW_UPWARD_FORCE + unit(self.rng),
            angle.sin() * WILLOW_HORIZONTAL_SPREAD,
        ];
        let mut end = [
            start[0] + dir[0] * length,
            start[1] + dir[1] * length,
            start[2] + dir[2] * length,
        ];

        let points = self.counts.branch;
        for i in 0..points {
            let t = i as f32 / points as f32;
            let twist = (t * 3.0 + depth as f32).sin() * 1.5;
            let radius = 0.8 * (1.0 - t * 0.5);
            let r_angle = unit(self.rng) * TAU;
            let r_dist = unit(self.rng).sqrt() * radius;

            let position = [
                start[0] + dir[0] * length * t + r_angle.cos() * r_dist + twist,
                start[1] + dir[1] * length * t + r_angle.sin() * r_dist,
                start[2] + dir[2] * length * t + r_angle.cos() * r_dist + twist,
            ];
            if !self.buffer.write(&mut self.cursor, position, BRANCH_COLOR) {
                return false;
            }
            end = position;
        }

        if depth < WILLOW_VINE_DEPTH_LIMIT {
            for _ in 0..WILLOW_VINES_PER_TIP {
                let vine_start = [
                    end[0] + (unit(self.rng) - 0.5) * 4.0,
                    end[1],
                    end[2] + (unit(self.rng) - 0.5) * 4.0,
                ];
                let before = self.cursor;
                self.cursor = drop_vine(self.buffer, self.cursor, vine_start, self.counts.vine, self.rng);
                if self.cursor - before < self.counts.vine {
                    return false;
                }
            }
        }

        for offset in [WILLOW_FORK_ANGLE, -WILLOW_FORK_ANGLE] {
            if !self.grow(end, angle + offset, length * WILLOW_LENGTH_DECAY, depth - 1) {
                return false;
            }
        }
        true
    }
}

/// Weeping willow: volumetric trunk plus a recursively forking crown.
///
/// Recursion depth is `shape.branch_depth` capped at `WILLOW_MAX_BRANCH_DEPTH`;
/// every branch forks into
/// exactly two children at `angle +/- 0.8` rad with 80% of the parent length.
/// All part counts are scaled together so the tree spends about `budget`
/// points.
pub fn weeping_willow(
    buffer: &mut PointCloudBuffer,
    cursor: usize,
    base: Point,
    shape: &WillowShape,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    let depth = shape.branch_depth.min(WILLOW_MAX_BRANCH_DEPTH);
    let counts = WillowCounts::scaled(shape, depth, budget);
    let cursor = trunk(
        buffer,
        cursor,
        base,
        shape.trunk_height,
        shape.trunk_radius,
        counts.trunk,
        rng,
    );

    let crown = [base[0], base[1] + shape.crown_height, base[2]];
    let mut grower = BranchGrower {
        buffer,
        cursor,
        counts,
        rng,
    };

    for i in 0..shape.root_branches {
        let angle = i as f32 / shape.root_branches as f32 * TAU;
        if !grower.grow(crown, angle, shape.branch_length, depth) {
            break;
        }
    }
    grower.cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_trunk_tapers_and_darkens_at_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut buffer = PointCloudBuffer::with_capacity(24_000);

        let cursor = trunk(&mut buffer, 0, [0.0; 3], 16.0, 2.2, 24_000, &mut rng);
        assert_eq!(cursor, 24_000);

        let positions = buffer.positions();
        let colors = buffer.colors();
        let jitter = 0.15 * 2.0_f32.sqrt();
        for p in positions.iter().filter(|p| p[1] > 12.0) {
            assert!(p[0].hypot(p[2]) <= 2.2 * (1.0 - 0.7 * 0.75) + jitter + 1e-3);
        }
        let lightness = |c: &[f32; 3]| c[0] + c[1] + c[2];
        assert!(lightness(&colors[0]) < lightness(&colors[23_999]));
    }

    #[test]
    fn test_vine_drops_downward_and_widens() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut buffer = PointCloudBuffer::with_capacity(1200);
        let start = [10.0, 5.0, -30.0];

        let cursor = drop_vine(&mut buffer, 0, start, 1200, &mut rng);
        assert_eq!(cursor, 1200);

        for p in buffer.positions() {
            assert!(p[1] <= start[1], "vine must never climb");
            assert!(p[1] >= start[1] - VINE_MIN_LENGTH - VINE_LENGTH_RANGE);
        }
    }

    #[test]
    fn test_vine_avoids_near_white() {
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let mut buffer = PointCloudBuffer::with_capacity(300);
        drop_vine(&mut buffer, 0, [0.0; 3], 300, &mut rng);

        for c in buffer.colors() {
            assert!(c.iter().all(|v| *v < 0.6), "vine colour too bright: {c:?}");
        }
    }

    #[test]
    fn test_natural_willow_size() {
        let counts = WillowCounts::natural();
        // One depth-2 root branch: two tubes of vines plus its two children.
        assert_eq!(counts.branch_total(1), 4000 + 12 * 1200);
        assert_eq!(counts.branch_total(2), 4000 + 12 * 1200 + 2 * (4000 + 12 * 1200));
        assert_eq!(counts.total(WILLOW_ROOT_BRANCHES, WILLOW_BRANCH_DEPTH), 24_000 + 4 * 55_200);
    }

    #[test]
    fn test_willow_spends_about_its_budget() {
        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let mut buffer = PointCloudBuffer::with_capacity(200_000);

        let cursor = weeping_willow(
            &mut buffer,
            0,
            [25.0, -22.0, -40.0],
            &WillowShape::default(),
            150_000,
            &mut rng,
        );

        assert!(cursor <= 150_000, "willow overspent: {cursor}");
        assert!(cursor > 145_000, "willow underspent: {cursor}");
        assert!(buffer.positions().iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_willow_stops_cleanly_when_buffer_fills() {
        let mut rng = ChaCha8Rng::seed_from_u64(15);
        let mut buffer = PointCloudBuffer::with_capacity(30_000);

        let cursor = weeping_willow(
            &mut buffer,
            0,
            [0.0; 3],
            &WillowShape::default(),
            150_000,
            &mut rng,
        );
        assert_eq!(cursor, 30_000);
    }

    #[test]
    fn test_oversized_depth_is_clamped() {
        let counts = WillowCounts::natural();
        assert_eq!(counts.branch_total(200), usize::MAX);

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut buffer = PointCloudBuffer::with_capacity(2_000);
        let shape = WillowShape {
            branch_depth: 80,
            ..WillowShape::default()
        };

        let cursor = weeping_willow(&mut buffer, 0, [0.0; 3], &shape, 1_000, &mut rng);
        assert!(cursor <= 1_000, "willow overspent: {cursor}");
        assert!(buffer.positions().iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_willow_with_zero_depth_is_trunk_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(16);
        let mut buffer = PointCloudBuffer::with_capacity(50_000);
        let shape = WillowShape {
            branch_depth: 0,
            ..WillowShape::default()
        };

        let cursor = weeping_willow(&mut buffer, 0, [0.0; 3], &shape, 24_000, &mut rng);
        assert_eq!(cursor, 24_000);
    }
}
