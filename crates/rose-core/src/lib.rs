//! Platform-agnostic core of the rose greeting: petal geometry, bloom
//! animation, scene composition, overlay timing, confetti physics and the
//! music toggle. Nothing here touches the DOM or the GPU.

pub mod camera;
pub mod color;
pub mod confetti;
pub mod constants;
pub mod ease;
pub mod error;
pub mod mesh;
pub mod overlay;
pub mod petal;
pub mod playback;
pub mod rose;
pub mod scene;

pub static ROSE_WGSL: &str = include_str!("../shaders/rose.wgsl");
pub static SPARKLES_WGSL: &str = include_str!("../shaders/sparkles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use error::{GeometryError, SceneError};
pub use petal::{petal_point, PetalInstance, PetalPose};
pub use rose::{BloomProgress, LayerSpec, Material, PointLight, Rose, DEFAULT_LAYERS};
pub use scene::{Environment, LightRig, PostSettings, Scene, SceneParams, Sparkles, SpotLight};

use mesh::MeshData;

/// Shared petal mesh at the default tessellation.
pub fn petal_mesh() -> Result<MeshData, GeometryError> {
    mesh::parametric(
        petal_point,
        constants::PETAL_SEGMENTS,
        constants::PETAL_SEGMENTS,
    )
}

pub fn stem_mesh() -> Result<MeshData, GeometryError> {
    mesh::cylinder(
        constants::STEM_RADIUS_TOP,
        constants::STEM_RADIUS_BOTTOM,
        constants::STEM_HEIGHT,
        constants::STEM_SEGMENTS,
    )
}
