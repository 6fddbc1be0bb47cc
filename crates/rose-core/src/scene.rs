//! Scene composition: camera + orbit, lighting rig, environment, sparkles,
//! post-processing settings and the rose itself.
//!
//! The scene owns no rendering resources. Each frame the frontend calls
//! [`Scene::update`] and reads the camera, lights and rose transforms back.

use crate::camera::{Camera, CameraPreset, OrbitControls};
use crate::color::hex_to_linear;
use crate::constants::*;
use crate::error::SceneError;
use crate::rose::{PointLight, Rose};
use glam::Vec3;
use rand::prelude::*;

/// Cone light aimed at `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub target: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    /// Half-angle of the cone, radians.
    pub angle: f32,
    /// Fraction of the cone over which the edge softens, \[0, 1\].
    pub penumbra: f32,
}

impl SpotLight {
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Cosines of the inner (full intensity) and outer (zero) cone edges.
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle.cos();
        let inner = (self.angle * (1.0 - self.penumbra)).cos();
        (inner, outer)
    }
}

/// Four-light cinematic rig: warm key, soft fill, golden rim and ambient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightRig {
    pub key: SpotLight,
    pub fill: PointLight,
    pub rim: SpotLight,
    pub ambient_color: Vec3,
    pub ambient_intensity: f32,
}

impl LightRig {
    pub fn cinematic() -> Self {
        Self {
            key: SpotLight {
                position: Vec3::new(5.0, 10.0, 5.0),
                target: Vec3::ZERO,
                color: hex_to_linear(0xffcccc),
                intensity: 8.0,
                angle: 0.3,
                penumbra: 0.5,
            },
            fill: PointLight {
                position: Vec3::new(-5.0, 0.0, 5.0),
                color: hex_to_linear(0xffb7b2),
                intensity: 2.0,
                range: 0.0,
            },
            rim: SpotLight {
                position: Vec3::new(-5.0, 5.0, -5.0),
                target: Vec3::ZERO,
                color: hex_to_linear(0xffaa00),
                intensity: 15.0,
                angle: 0.5,
                penumbra: 1.0,
            },
            ambient_color: hex_to_linear(0x553333),
            ambient_intensity: 0.5,
        }
    }
}

/// Hemispheric stand-in for a studio lighting environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub sky: Vec3,
    pub ground: Vec3,
    pub intensity: f32,
}

impl Environment {
    pub fn studio() -> Self {
        Self {
            sky: Vec3::new(1.0, 0.97, 0.94),
            ground: Vec3::new(0.18, 0.16, 0.15),
            intensity: 0.35,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub position: Vec3,
    /// Per-particle phase so the twinkle is not in lock-step.
    pub phase: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkles {
    pub points: Vec<Sparkle>,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
    pub color: Vec3,
}

impl Sparkles {
    /// Scatter `count` points uniformly inside a cube of side `scale`.
    pub fn scatter(count: usize, scale: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = scale * 0.5;
        let points = (0..count)
            .map(|_| Sparkle {
                position: Vec3::new(
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                    rng.gen_range(-half..=half),
                ),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self {
            points,
            size: SPARKLE_SIZE,
            speed: SPARKLE_SPEED,
            opacity: SPARKLE_OPACITY,
            color: hex_to_linear(SPARKLE_COLOR),
        }
    }

    /// World-space quad side that keeps a sparkle `size * 25` device pixels
    /// tall at one unit of depth, for a viewport `css_height` pixels tall.
    pub fn world_size(&self, fovy_radians: f32, css_height: f32) -> f32 {
        if css_height <= 0.0 {
            return 0.0;
        }
        self.size * 50.0 * (fovy_radians * 0.5).tan() / css_height
    }
}

/// Bloom, film grain and vignette applied after the scene pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostSettings {
    pub bloom_threshold: f32,
    pub bloom_intensity: f32,
    pub noise_opacity: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
    pub exposure: f32,
}

impl Default for PostSettings {
    fn default() -> Self {
        Self {
            bloom_threshold: BLOOM_THRESHOLD,
            bloom_intensity: BLOOM_INTENSITY,
            noise_opacity: NOISE_OPACITY,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            exposure: TONE_EXPOSURE,
        }
    }
}

/// Tunable scene inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub post: PostSettings,
    pub sparkle_count: usize,
    pub sparkle_seed: u64,
    pub auto_rotate_speed: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            post: PostSettings::default(),
            sparkle_count: SPARKLE_COUNT,
            sparkle_seed: SPARKLE_SEED,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<(), SceneError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(SceneError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<(), SceneError> {
        check_range("bloom_threshold", self.post.bloom_threshold, 0.0, 4.0)?;
        check_range("bloom_intensity", self.post.bloom_intensity, 0.0, 4.0)?;
        check_range("noise_opacity", self.post.noise_opacity, 0.0, 1.0)?;
        check_range("vignette_offset", self.post.vignette_offset, 0.0, 1.0)?;
        check_range("vignette_darkness", self.post.vignette_darkness, 0.0, 1.0)?;
        check_range("exposure", self.post.exposure, 0.01, 8.0)?;
        check_range("auto_rotate_speed", self.auto_rotate_speed, 0.0, 10.0)?;
        Ok(())
    }
}

pub struct Scene {
    pub rose: Rose,
    pub lights: LightRig,
    pub environment: Environment,
    pub sparkles: Sparkles,
    pub post: PostSettings,
    pub background: Vec3,
    orbit: OrbitControls,
    preset: CameraPreset,
    aspect: f32,
    elapsed: f32,
}

impl Scene {
    pub fn new(params: SceneParams, viewport_width: f32, viewport_height: f32) -> Result<Self, SceneError> {
        params.validate()?;
        let preset = CameraPreset::for_width(viewport_width);
        let mut orbit = OrbitControls::new(preset.position(), Vec3::ZERO);
        orbit.auto_rotate_speed = params.auto_rotate_speed;
        Ok(Self {
            rose: Rose::new(),
            lights: LightRig::cinematic(),
            environment: Environment::studio(),
            sparkles: Sparkles::scatter(params.sparkle_count, SPARKLE_SCALE, params.sparkle_seed),
            post: params.post,
            background: hex_to_linear(BACKGROUND_COLOR),
            orbit,
            preset,
            aspect: aspect_of(viewport_width, viewport_height),
            elapsed: 0.0,
        })
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn preset(&self) -> CameraPreset {
        self.preset
    }

    /// Track the viewport; the camera jumps only when the breakpoint flips.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = aspect_of(width, height);
        let preset = CameraPreset::for_width(width);
        if preset != self.preset {
            log::info!("[scene] camera preset {:?} -> {:?}", self.preset, preset);
            self.preset = preset;
            self.orbit.place(preset.position());
        }
    }

    pub fn drag(&mut self, dx: f32, dy: f32, element_height: f32) {
        self.orbit.drag(dx, dy, element_height);
    }

    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        self.rose.update(dt, self.elapsed);
        self.orbit.auto_rotate(dt);
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: self.orbit.eye(),
            target: self.orbit.target,
            aspect: self.aspect,
            ..Camera::default()
        }
    }
}

fn aspect_of(width: f32, height: f32) -> f32 {
    if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_cone_inner_is_inside_outer() {
        let rig = LightRig::cinematic();
        let (inner, outer) = rig.key.cone_cosines();
        assert!(inner > outer);
        let (inner, outer) = rig.rim.cone_cosines();
        assert_eq!(inner, 1.0);
        assert!(outer < 1.0);
    }

    #[test]
    fn sparkles_stay_in_their_cube() {
        let s = Sparkles::scatter(80, 10.0, 7);
        assert_eq!(s.points.len(), 80);
        for p in &s.points {
            assert!(p.position.abs().max_element() <= 5.0);
        }
    }

    #[test]
    fn bad_params_are_rejected() {
        let mut params = SceneParams::default();
        params.post.noise_opacity = 2.0;
        assert!(matches!(
            params.validate(),
            Err(SceneError::OutOfRange { name: "noise_opacity", .. })
        ));
    }
}
