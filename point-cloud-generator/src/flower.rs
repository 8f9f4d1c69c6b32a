use std::f32::consts::TAU;

use constants::garden::{
    FLOWER_CUP_EXPONENT, FLOWER_CUP_HEIGHT, FLOWER_RADIUS_SCALE, STEM_WIGGLE_AMPLITUDE,
    STEM_WIGGLE_FREQUENCY,
};
use rand::Rng;

use crate::buffer::PointCloudBuffer;
use crate::color::scale_rgb;
use crate::request::Point;
use crate::unit;

/// Green stalk from `base` up to `base.y + height` with a gentle wiggle.
pub fn flower_stem(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    base: Point,
    height: f32,
    budget: usize,
) -> usize {
    for i in 0..budget {
        let t = i as f32 / budget as f32;
        let phase = t * STEM_WIGGLE_FREQUENCY;

        let position = [
            base[0] + phase.sin() * STEM_WIGGLE_AMPLITUDE,
            base[1] + t * height,
            base[2] + phase.cos() * STEM_WIGGLE_AMPLITUDE,
        ];
        let color = [0.3, 0.7 + t * 0.3, 0.3];

        if !buffer.write(&mut cursor, position, color) {
            break;
        }
    }
    cursor
}

/// Cup-shaped petal head traced by the rose curve `r = cos(k * theta)`.
///
/// Petal tips rise as `(|r| / scale)^1.5` and are drawn brighter than the
/// centre.
pub fn flower_head(
    buffer: &mut PointCloudBuffer,
    mut cursor: usize,
    center: Point,
    color: [f32; 3],
    petals: u32,
    budget: usize,
    rng: &mut impl Rng,
) -> usize {
    let radius_scale = FLOWER_RADIUS_SCALE.0 + unit(rng) * FLOWER_RADIUS_SCALE.1;

    for _ in 0..budget {
        let angle = unit(rng) * TAU;
        let r = (petals as f32 * angle).cos() * unit(rng) * radius_scale;
        let y = (r.abs() / radius_scale).powf(FLOWER_CUP_EXPONENT) * FLOWER_CUP_HEIGHT;

        let position = [
            center[0] + angle.cos() * r,
            center[1] + y,
            center[2] + angle.sin() * r,
        ];
        let brightness = 0.7 + (y / FLOWER_CUP_HEIGHT) * 0.5;

        if !buffer.write(&mut cursor, position, scale_rgb(color, brightness)) {
            break;
        }
    }
    cursor
}
