use constants::garden::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::PointCloudBuffer;
use crate::color::hsl_to_rgb;
use crate::request::{GeneratorRequest, generate};
use crate::unit;

/// Which procedural garden to compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GardenKind {
    /// Fully procedural meadow, pine, willow, bushes and flowers.
    Master,
    /// Grass and bushes underlying the imported garden models.
    HybridBase,
}

impl GardenKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "master" => Some(Self::Master),
            "hybrid" | "hybrid_base" => Some(Self::HybridBase),
            _ => None,
        }
    }
}

/// Ordered list of generator calls sharing one buffer.
#[derive(Debug, Clone)]
pub struct GardenPlan {
    pub kind: GardenKind,
    pub capacity: usize,
    pub requests: Vec<GeneratorRequest>,
}

fn scaled(points: usize, density: f32) -> usize {
    (points as f32 * density.max(0.0)).round() as usize
}

impl GardenPlan {
    /// Lay out a garden. `density` scales every point budget and the capacity.
    pub fn new(kind: GardenKind, density: f32, rng: &mut impl Rng) -> Self {
        match kind {
            GardenKind::Master => Self::master(density, rng),
            GardenKind::HybridBase => Self::hybrid_base(density),
        }
    }

    fn master(density: f32, rng: &mut impl Rng) -> Self {
        let mut requests = vec![
            GeneratorRequest::grass_field([0.0, GROUND_LEVEL, 0.0], scaled(MASTER_GRASS_POINTS, density)),
            GeneratorRequest::pine_tree(MASTER_PINE_POSITION, scaled(MASTER_PINE_POINTS, density)),
            GeneratorRequest::weeping_willow(
                MASTER_WILLOW_POSITION,
                scaled(MASTER_WILLOW_POINTS, density),
            ),
        ];

        for b in 0..MASTER_BUSH_COUNT {
            let anchor = [-30.0 + b as f32 * 20.0, GROUND_LEVEL, -30.0];
            requests.push(GeneratorRequest::bush(anchor, scaled(MASTER_BUSH_POINTS, density)));
        }

        for _ in 0..MASTER_FLOWER_COUNT {
            let x = (unit(rng) - 0.5) * 80.0;
            let z = -40.0 - unit(rng) * 20.0;
            let stem_height = 3.0 + unit(rng) * 5.0;
            let color = hsl_to_rgb(unit(rng), 0.8, 0.6);

            requests.push(GeneratorRequest::flower_stem(
                [x, GROUND_LEVEL, z],
                stem_height,
                scaled(MASTER_STEM_POINTS, density),
            ));
            requests.push(GeneratorRequest::flower_head(
                [x, GROUND_LEVEL + stem_height, z],
                color,
                scaled(MASTER_HEAD_POINTS, density),
            ));
        }

        Self {
            kind: GardenKind::Master,
            capacity: scaled(MASTER_GARDEN_CAPACITY, density),
            requests,
        }
    }

    fn hybrid_base(density: f32) -> Self {
        let mut requests = vec![GeneratorRequest::grass_field(
            [0.0, GROUND_LEVEL, 0.0],
            scaled(HYBRID_GRASS_POINTS, density),
        )];

        for b in 0..HYBRID_BUSH_COUNT {
            let anchor = [-40.0 + b as f32 * 80.0, GROUND_LEVEL, -20.0];
            requests.push(GeneratorRequest::bush(anchor, scaled(HYBRID_BUSH_POINTS, density)));
        }

        Self {
            kind: GardenKind::HybridBase,
            capacity: scaled(HYBRID_GARDEN_CAPACITY, density),
            requests,
        }
    }

    /// Sum of requested budgets, which may exceed `capacity`.
    pub fn requested_points(&self) -> usize {
        self.requests.iter().map(|r| r.budget).sum()
    }

    /// Run every request in order. `on_step` sees each request and the cursor
    /// after it ran.
    pub fn bake(
        &self,
        rng: &mut impl Rng,
        mut on_step: impl FnMut(&GeneratorRequest, usize),
    ) -> PointCloudBuffer {
        let mut buffer = PointCloudBuffer::with_capacity(self.capacity);
        let mut cursor = 0;

        for request in &self.requests {
            cursor = generate(&mut buffer, cursor, request, rng);
            on_step(request, cursor);
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_master_plan_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(40);
        let plan = GardenPlan::new(GardenKind::Master, 1.0, &mut rng);

        // grass, pine, willow, 4 bushes, 300 stems and 300 heads
        assert_eq!(plan.requests.len(), 3 + 4 + 600);
        assert_eq!(plan.capacity, MASTER_GARDEN_CAPACITY);
        assert_eq!(plan.requests[0].budget, MASTER_GRASS_POINTS);
        assert!(plan.requested_points() <= plan.capacity);
    }

    #[test]
    fn test_flower_heads_sit_on_their_stems() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);
        let plan = GardenPlan::new(GardenKind::Master, 1.0, &mut rng);

        for pair in plan.requests[7..].chunks(2) {
            let (stem, head) = (&pair[0], &pair[1]);
            let crate::Shape::FlowerStem { height } = stem.shape else {
                panic!("expected a stem, got {:?}", stem.shape);
            };
            assert_eq!(head.anchor[0], stem.anchor[0]);
            assert_eq!(head.anchor[2], stem.anchor[2]);
            assert!((head.anchor[1] - (GROUND_LEVEL + height)).abs() < 1e-5);
            assert!((3.0..8.0).contains(&height));
        }
    }

    #[test]
    fn test_bake_fills_expected_count_at_low_density() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let plan = GardenPlan::new(GardenKind::HybridBase, 0.01, &mut rng);

        let mut steps = Vec::new();
        let buffer = plan.bake(&mut rng, |request, cursor| steps.push((request.label(), cursor)));

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], ("grass field", 5000));
        assert_eq!(buffer.len(), 5000 + 2 * 150);
        assert!(buffer.positions().iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_bake_never_exceeds_capacity() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let mut plan = GardenPlan::new(GardenKind::HybridBase, 0.01, &mut rng);
        plan.capacity = 1000;

        let mut cursors = Vec::new();
        let buffer = plan.bake(&mut rng, |_, cursor| cursors.push(cursor));

        assert_eq!(buffer.len(), 1000);
        assert!(cursors.iter().all(|c| *c <= 1000));
    }

    #[test]
    fn test_garden_kind_names() {
        assert_eq!(GardenKind::from_name("master"), Some(GardenKind::Master));
        assert_eq!(GardenKind::from_name("hybrid"), Some(GardenKind::HybridBase));
        assert_eq!(GardenKind::from_name("orchard"), None);
    }
}
