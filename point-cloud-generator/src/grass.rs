use constants::garden::{GRASS_HEIGHT_EXPONENT, GRASS_HUE, GRASS_LIGHTNESS, GRASS_SATURATION};
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::color::hsl_to_rgb;
use crate::request::Point;
use crate::unit;

/// Meadow of near-ground points over a `width` x `depth` footprint.
///
/// The footprint is centred on `anchor.x` and extends from `anchor.z` towards
/// negative z. Heights follow `u^5` so blades hug the ground plane.
pub fn grass_field(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    anchor: Point,
    width: f32,
    depth: f32,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    for _ in 0..budget {
        let x = anchor[0] + (unit(rng) - 0.5) * width;
        let z = anchor[2] + (unit(rng) - 1.0) * depth;
        let y = anchor[1] + unit(rng).powi(GRASS_HEIGHT_EXPONENT);

        let color = hsl_to_rgb(
            GRASS_HUE.0 + unit(rng) * GRASS_HUE.1,
            GRASS_SATURATION.0 + unit(rng) * GRASS_SATURATION.1,
            GRASS_LIGHTNESS.0 + unit(rng) * GRASS_LIGHTNESS.1,
        );

        if !buffer.write(&mut cursor, [x, y, z], color) {
            break;
        }
    }
    cursor
}
