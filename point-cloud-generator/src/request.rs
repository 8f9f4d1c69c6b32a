use constants::garden::*;
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::{bush, flower, grass, pine, willow};

pub type Point = [f32; 3];

/// Parameters for one organic structure.
///
/// Pure input: generators read it and never keep a reference.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorRequest {
    pub anchor: Point,
    pub budget: usize,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    GrassField { width: f32, depth: f32 },
    FlowerStem { height: f32 },
    /// `petals: None` picks a random count per flower.
    FlowerHead { color: [f32; 3], petals: Option<u32> },
    PineTree { height: f32, base_width: f32, tiers: u32 },
    WeepingWillow(WillowShape),
    Trunk { height: f32, base_radius: f32 },
    DropVine,
    Bush { radius: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WillowShape {
    pub trunk_height: f32,
    pub trunk_radius: f32,
    pub crown_height: f32,
    pub root_branches: u32,
    pub branch_length: f32,
    pub branch_depth: u32,
}

impl Default for WillowShape {
    fn default() -> Self {
        Self {
            trunk_height: WILLOW_TRUNK_HEIGHT,
            trunk_radius: WILLOW_TRUNK_RADIUS,
            crown_height: WILLOW_CROWN_HEIGHT,
            root_branches: WILLOW_ROOT_BRANCHES,
            branch_length: WILLOW_BRANCH_LENGTH,
            branch_depth: WILLOW_BRANCH_DEPTH,
        }
    }
}

impl GeneratorRequest {
    pub fn grass_field(anchor: Point, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::GrassField {
                width: GRASS_FIELD_WIDTH,
                depth: GRASS_FIELD_DEPTH,
            },
        }
    }

    pub fn flower_stem(anchor: Point, height: f32, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::FlowerStem { height },
        }
    }

    pub fn flower_head(anchor: Point, color: [f32; 3], budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::FlowerHead {
                color,
                petals: None,
            },
        }
    }

    pub fn pine_tree(anchor: Point, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::PineTree {
                height: PINE_HEIGHT,
                base_width: PINE_BASE_WIDTH,
                tiers: PINE_TIERS,
            },
        }
    }

    pub fn weeping_willow(anchor: Point, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::WeepingWillow(WillowShape::default()),
        }
    }

    pub fn trunk(anchor: Point, height: f32, base_radius: f32, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::Trunk {
                height,
                base_radius,
            },
        }
    }

    pub fn drop_vine(anchor: Point, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::DropVine,
        }
    }

    pub fn bush(anchor: Point, budget: usize) -> Self {
        Self {
            anchor,
            budget,
            shape: Shape::Bush {
                radius: BUSH_RADIUS,
                height: BUSH_HEIGHT,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self.shape {
            Shape::GrassField { .. } => "grass field",
            Shape::FlowerStem { .. } => "flower stem",
            Shape::FlowerHead { .. } => "flower head",
            Shape::PineTree { .. } => "pine tree",
            Shape::WeepingWillow(_) => "weeping willow",
            Shape::Trunk { .. } => "trunk",
            Shape::DropVine => "drop vine",
            Shape::Bush { .. } => "bush",
        }
    }
}

/// Run the generator matching `request.shape`, returning the advanced cursor.
pub fn generate(
    buffer: &mut PointCloudBuffer,
    cursor: usize,
    request: &GeneratorRequest,
    rng: &mut impl Rng,
) -> usize {
    let anchor = request.anchor;
    let budget = request.budget;

    match &request.shape {
        Shape::GrassField { width, depth } => {
            grass::grass_field(buffer, cursor, anchor, *width, *depth, budget, rng)
        }
        Shape::FlowerStem { height } => {
            flower::flower_stem(buffer, cursor, anchor, *height, budget)
        }
        Shape::FlowerHead { color, petals } => {
            let petals = petal_count(*petals, rng);
            flower::flower_head(buffer, cursor, anchor, *color, petals, budget, rng)
        }
        Shape::PineTree {
            height,
            base_width,
            tiers,
        } => pine::pine_tree(buffer, cursor, anchor, *height, *base_width, *tiers, budget, rng),
        Shape::WeepingWillow(shape) => {
            willow::weeping_willow(buffer, cursor, anchor, shape, budget, rng)
        }
        Shape::Trunk {
            height,
            base_radius,
        } => willow::trunk(buffer, cursor, anchor, *height, *base_radius, budget, rng),
        Shape::DropVine => willow::drop_vine(buffer, cursor, anchor, budget, rng),
        Shape::Bush { radius, height } => {
            bush::bush(buffer, cursor, anchor, *radius, *height, budget, rng)
        }
    }
}

/// Requested petal count, or a random one in `5..=8`.
fn petal_count(petals: Option<u32>, rng: &mut impl Rng) -> u32 {
    petals.unwrap_or_else(|| rng.gen_range(FLOWER_MIN_PETALS..=FLOWER_MAX_PETALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn every_shape() -> Vec<GeneratorRequest> {
        let anchor = [3.0, GROUND_LEVEL, -30.0];
        vec![
            GeneratorRequest::grass_field(anchor, 2_000),
            GeneratorRequest::flower_stem(anchor, 6.0, 300),
            GeneratorRequest::flower_head(anchor, [0.9, 0.2, 0.6], 1_500),
            GeneratorRequest::pine_tree(anchor, 4_000),
            GeneratorRequest::weeping_willow(anchor, 10_000),
            GeneratorRequest::trunk(anchor, 16.0, 2.2, 2_000),
            GeneratorRequest::drop_vine(anchor, 1_200),
            GeneratorRequest::bush(anchor, 2_000),
        ]
    }

    #[test]
    fn test_every_shape_writes_finite_points() {
        let mut rng = ChaCha8Rng::seed_from_u64(41);

        for request in every_shape() {
            let mut buffer = PointCloudBuffer::with_capacity(request.budget);
            let cursor = generate(&mut buffer, 0, &request, &mut rng);

            assert!(cursor <= request.budget, "{} overspent", request.label());
            assert_eq!(buffer.len(), cursor, "{}", request.label());
            for (p, c) in buffer.positions().iter().zip(buffer.colors()) {
                assert!(p.iter().all(|v| v.is_finite()), "{}: {p:?}", request.label());
                assert!(c.iter().all(|v| v.is_finite()), "{}: {c:?}", request.label());
            }
        }
    }

    #[test]
    fn test_cursor_advances_from_offset() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut buffer = PointCloudBuffer::with_capacity(5_000);

        let after_stem = generate(&mut buffer, 0, &GeneratorRequest::flower_stem([0.0; 3], 4.0, 300), &mut rng);
        assert_eq!(after_stem, 300);
        let after_bush = generate(&mut buffer, after_stem, &GeneratorRequest::bush([0.0; 3], 1_000), &mut rng);
        assert_eq!(after_bush, 1_300);
        assert_eq!(buffer.len(), 1_300);
    }

    #[test]
    fn test_random_petal_count_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(43);
        let mut seen = [false; 4];

        for _ in 0..400 {
            let petals = petal_count(None, &mut rng);
            assert!((FLOWER_MIN_PETALS..=FLOWER_MAX_PETALS).contains(&petals), "{petals}");
            seen[(petals - FLOWER_MIN_PETALS) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "every count from 5 to 8 should occur");
        assert_eq!(petal_count(Some(11), &mut rng), 11);
    }
}
