//! The assembled flower: concentric petal layers, stem and inner glow, plus
//! the shared bloom progress that drives every petal.

use crate::color::hex_to_linear;
use crate::constants::*;
use crate::ease::damp;
use crate::error::SceneError;
use crate::petal::{PetalInstance, PetalPose};
use glam::{Mat4, Vec3};

/// One concentric ring of petals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerSpec {
    pub count: usize,
    pub scale: f32,
    pub y: f32,
}

const fn layer(count: usize, scale: f32, y: f32) -> LayerSpec {
    LayerSpec { count, scale, y }
}

/// Bud-to-bloom profile, innermost first.
pub const DEFAULT_LAYERS: [LayerSpec; 8] = [
    layer(3, 0.25, 0.4),
    layer(4, 0.35, 0.35),
    layer(5, 0.45, 0.3),
    layer(6, 0.6, 0.25),
    layer(7, 0.75, 0.2),
    layer(8, 0.9, 0.15),
    layer(10, 1.1, 0.1),
    layer(12, 1.3, 0.05),
];

/// How open the flower is, in \[0, 1\]. Only ever moves toward 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BloomProgress(f32);

impl BloomProgress {
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn advance(&mut self, dt: f32) {
        let next = damp(self.0, 1.0, BLOOM_DAMP_LAMBDA, dt);
        // rounding must not push the value past 1 or back below itself
        self.0 = next.clamp(self.0, 1.0);
    }
}

/// Surface parameters shared by a group of meshes, colors in linear RGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub base_color: Vec3,
    pub emissive: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub sheen: f32,
    pub sheen_color: Vec3,
}

impl Material {
    pub fn petal() -> Self {
        Self {
            base_color: hex_to_linear(PETAL_COLOR),
            emissive: hex_to_linear(PETAL_EMISSIVE) * PETAL_EMISSIVE_INTENSITY,
            roughness: PETAL_ROUGHNESS,
            metalness: PETAL_METALNESS,
            sheen: PETAL_SHEEN,
            sheen_color: hex_to_linear(PETAL_SHEEN_COLOR),
        }
    }

    pub fn stem() -> Self {
        Self {
            base_color: hex_to_linear(STEM_COLOR),
            emissive: Vec3::ZERO,
            roughness: STEM_ROUGHNESS,
            metalness: 0.0,
            sheen: 0.0,
            sheen_color: Vec3::ZERO,
        }
    }
}

/// Warm point light sitting inside the bloom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Distance at which the light fades out entirely; 0 means unbounded.
    pub range: f32,
}

pub struct Rose {
    layers: Vec<LayerSpec>,
    petals: Vec<PetalInstance>,
    poses: Vec<PetalPose>,
    bloom: BloomProgress,
    yaw: f32,
    height: f32,
}

impl Rose {
    pub fn new() -> Self {
        Self::build(DEFAULT_LAYERS.to_vec())
    }

    pub fn with_layers(layers: Vec<LayerSpec>) -> Result<Self, SceneError> {
        if layers.is_empty() {
            return Err(SceneError::EmptyLayers);
        }
        for (i, l) in layers.iter().enumerate() {
            if l.count == 0 {
                return Err(SceneError::EmptyLayer { layer: i });
            }
            if !l.scale.is_finite() || l.scale <= 0.0 {
                return Err(SceneError::InvalidScale { layer: i });
            }
            if !l.y.is_finite() {
                return Err(SceneError::InvalidHeight { layer: i });
            }
        }
        Ok(Self::build(layers))
    }

    fn build(layers: Vec<LayerSpec>) -> Self {
        let petals: Vec<PetalInstance> = layers
            .iter()
            .enumerate()
            .flat_map(|(li, l)| (0..l.count).map(move |pi| PetalInstance::new(pi, l.count, li)))
            .collect();
        let poses = petals.iter().map(|p| p.pose(0.0, 0.0)).collect();
        log::info!(
            "[rose] {} layers, {} petals",
            layers.len(),
            petals.len()
        );
        Self {
            layers,
            petals,
            poses,
            bloom: BloomProgress::default(),
            yaw: 0.0,
            height: ROSE_BASE_Y,
        }
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn petals(&self) -> &[PetalInstance] {
        &self.petals
    }

    pub fn poses(&self) -> &[PetalPose] {
        &self.poses
    }

    pub fn bloom(&self) -> BloomProgress {
        self.bloom
    }

    /// Advance one frame. The bloom is written once, then read by every petal.
    pub fn update(&mut self, dt: f32, elapsed: f32) {
        self.bloom.advance(dt);
        self.yaw = elapsed * ROSE_YAW_SPEED;
        self.height = ROSE_BASE_Y + (elapsed * ROSE_FLOAT_FREQ).sin() * ROSE_FLOAT_AMP;

        let bloom = self.bloom.value();
        for (pose, petal) in self.poses.iter_mut().zip(&self.petals) {
            *pose = petal.pose(bloom, elapsed);
        }
    }

    /// World transform of the whole assembly.
    pub fn group_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.height, 0.0)) * Mat4::from_rotation_y(self.yaw)
    }

    /// World transform of each petal, in the same order as [`Rose::petals`].
    pub fn petal_transforms(&self) -> Vec<Mat4> {
        let group = self.group_matrix();
        self.petals
            .iter()
            .zip(&self.poses)
            .map(|(petal, pose)| {
                let l = &self.layers[petal.layer];
                group
                    * Mat4::from_translation(Vec3::new(0.0, l.y, 0.0))
                    * Mat4::from_scale(Vec3::splat(l.scale))
                    * petal.local_matrix(pose)
            })
            .collect()
    }

    pub fn stem_transform(&self) -> Mat4 {
        self.group_matrix() * Mat4::from_translation(STEM_OFFSET)
    }

    pub fn glow_position(&self) -> Vec3 {
        self.group_matrix().transform_point3(GLOW_OFFSET)
    }

    pub fn glow(&self) -> PointLight {
        PointLight {
            position: self.glow_position(),
            color: hex_to_linear(GLOW_COLOR),
            intensity: GLOW_INTENSITY,
            range: GLOW_RANGE,
        }
    }
}

impl Default for Rose {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rose_has_fifty_five_petals() {
        let rose = Rose::new();
        assert_eq!(rose.petals().len(), 55);
        assert_eq!(rose.petal_transforms().len(), 55);
    }

    #[test]
    fn glow_follows_the_floating_group() {
        let mut rose = Rose::new();
        rose.update(0.016, 3.0);
        let glow = rose.glow();
        let expected_y = ROSE_BASE_Y + (3.0_f32 * ROSE_FLOAT_FREQ).sin() * ROSE_FLOAT_AMP + 0.5;
        assert!((glow.position.y - expected_y).abs() < 1e-5);
    }

    #[test]
    fn custom_layers_are_validated() {
        let ok = |count, scale, y| LayerSpec { count, scale, y };
        assert_eq!(
            Rose::with_layers(Vec::new()).err(),
            Some(SceneError::EmptyLayers)
        );
        assert_eq!(
            Rose::with_layers(vec![ok(3, 1.0, 0.0), ok(0, 1.0, 0.0)]).err(),
            Some(SceneError::EmptyLayer { layer: 1 })
        );
        assert_eq!(
            Rose::with_layers(vec![ok(3, -0.5, 0.0)]).err(),
            Some(SceneError::InvalidScale { layer: 0 })
        );
        assert_eq!(
            Rose::with_layers(vec![ok(3, f32::INFINITY, 0.0)]).err(),
            Some(SceneError::InvalidScale { layer: 0 })
        );
        assert_eq!(
            Rose::with_layers(vec![ok(3, 1.0, f32::NAN)]).err(),
            Some(SceneError::InvalidHeight { layer: 0 })
        );
    }

    #[test]
    fn custom_layers_build_one_petal_per_slot() {
        let rose = Rose::with_layers(vec![
            LayerSpec { count: 2, scale: 0.5, y: 0.3 },
            LayerSpec { count: 4, scale: 1.0, y: 0.1 },
        ])
        .expect("valid layers");
        assert_eq!(rose.layers().len(), 2);
        assert_eq!(rose.petals().len(), 6);
        assert_eq!(rose.petal_transforms().len(), 6);
    }
}
