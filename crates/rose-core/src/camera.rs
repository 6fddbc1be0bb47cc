//! Camera description, viewport presets and orbit controls.
//!
//! These types avoid platform-specific APIs. The web frontend feeds them
//! viewport sizes and pointer deltas and reads back view/projection matrices.

use crate::constants::*;
use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: DESKTOP_CAMERA,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

/// Discrete camera placement chosen from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPreset {
    Mobile,
    Desktop,
}

impl CameraPreset {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn position(self) -> Vec3 {
        match self {
            Self::Mobile => MOBILE_CAMERA,
            Self::Desktop => DESKTOP_CAMERA,
        }
    }
}

/// Camera eye position for a viewport `width` in CSS pixels.
#[inline]
pub fn camera_for_viewport(width: f32) -> Vec3 {
    CameraPreset::for_width(width).position()
}

/// Clamp a device pixel ratio into the range the renderer supports.
#[inline]
pub fn clamp_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(MIN_DPR, MAX_DPR)
    } else {
        MIN_DPR
    }
}

/// Orbit around a fixed target with a locked radius and a bounded polar band.
///
/// Angles follow the usual spherical convention: `polar` is measured from +Y,
/// `azimuth` around +Y starting at +Z.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub radius: f32,
    pub polar: f32,
    pub azimuth: f32,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub min_polar: f32,
    pub max_polar: f32,
}

impl OrbitControls {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            radius: 1.0,
            polar: 0.0,
            azimuth: 0.0,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
        };
        controls.place(eye);
        controls
    }

    /// Re-seat the orbit so the eye sits exactly at `eye`, clamped to the band.
    pub fn place(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length().max(f32::EPSILON);
        self.azimuth = offset.x.atan2(offset.z);
        self.polar = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        self.clamp_polar();
    }

    fn clamp_polar(&mut self) {
        self.polar = self.polar.clamp(self.min_polar, self.max_polar);
    }

    /// Slow continuous spin; `dt` in seconds.
    pub fn auto_rotate(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
        }
    }

    /// Pointer drag of `(dx, dy)` pixels on an element `element_height` tall.
    pub fn drag(&mut self, dx: f32, dy: f32, element_height: f32) {
        let h = element_height.max(1.0);
        self.azimuth -= TAU * dx / h * self.rotate_speed;
        self.polar -= TAU * dy / h * self.rotate_speed;
        self.clamp_polar();
    }

    pub fn eye(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        self.target + Vec3::new(sp * sa, cp, sp * ca) * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_round_trips_an_eye_inside_the_band() {
        let controls = OrbitControls::new(DESKTOP_CAMERA, Vec3::ZERO);
        assert!((controls.eye() - DESKTOP_CAMERA).length() < 1e-4);
    }

    #[test]
    fn dpr_is_clamped() {
        assert_eq!(clamp_dpr(3.0), MAX_DPR);
        assert_eq!(clamp_dpr(0.5), MIN_DPR);
        assert_eq!(clamp_dpr(f64::NAN), MIN_DPR);
        assert_eq!(clamp_dpr(1.25), 1.25);
    }
}
