pub mod errors;

pub mod animation;
pub mod assets;
pub mod camera;
pub mod core;
pub mod effects;
pub mod loading;
pub mod mesh;
pub mod render;
pub mod scene;
pub mod scenes;
pub mod systems;
pub mod tracking;
