//! Procedural point-cloud synthesis for the neon garden.
//!
//! Every generator fills a shared [`PointCloudBuffer`] starting at a cursor and
//! returns the advanced cursor, so several structures pack into one buffer
//! without overlap. Randomness is injected through [`rand::Rng`].

use rand::Rng;

pub mod bounds;
pub mod buffer;
pub mod bush;
pub mod color;
pub mod flower;
pub mod garden;
pub mod grass;
pub mod pine;
pub mod request;
pub mod willow;

pub use buffer::PointCloudBuffer;
pub use garden::{GardenKind, GardenPlan};
pub use request::{GeneratorRequest, Shape, WillowShape, generate};

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..1.0)
}
