//! One rose petal: its parametric surface and its per-frame pose.
//!
//! The surface is a pure function of `(u, v)` in the unit square. `u` runs
//! across the petal, `v` from the base (`v = 0`, pinched onto the stem axis)
//! to the tip (`v = 1`). A single tessellation of it is shared by every
//! petal of the flower; only the instance transforms differ.

use crate::constants::*;
use crate::ease::{lerp, smoothstep};
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Point on the petal surface at parametric coordinate `(u, v)`.
pub fn petal_point(u: f32, v: f32) -> Vec3 {
    let angle = (u - 0.5) * PI * PETAL_SPAN;
    let width = (v * PI).sin() * PETAL_MAX_WIDTH;

    let x = width * angle.sin();
    let mut z = width * angle.cos() * PETAL_DEPTH_SCALE;
    let mut y = v * PETAL_HEIGHT;

    // Roll the upper part of the petal backward around the curl pivot
    if v > PETAL_CURL_START {
        let f = (v - PETAL_CURL_START) / (1.0 - PETAL_CURL_START);
        let curl = f * f * PI * PETAL_CURL_MAX;
        let pivot_y = PETAL_CURL_START * PETAL_HEIGHT;
        let dy = y - pivot_y;
        let (s, c) = curl.sin_cos();
        let ry = c * dy - s * z;
        let rz = s * dy + c * z;
        y = pivot_y + ry;
        z = rz;
    }

    // Wavy edge, strongest toward the tip
    z += (u * PI * PETAL_RUFFLE_FREQ).cos() * PETAL_RUFFLE_AMP * v;
    Vec3::new(x, y, z)
}

/// Animated local transform of one petal mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PetalPose {
    /// Opening rotation about the local x-axis, radians.
    pub rotation_x: f32,
    /// Idle sway about the local z-axis, radians.
    pub rotation_z: f32,
    /// Breathing offset.
    pub offset_y: f32,
    /// Outward push.
    pub offset_z: f32,
    /// Eased bloom amount local to this petal, in \[0, 1\].
    pub local_bloom: f32,
}

/// A petal placed at `index` of `total` within ring `layer`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetalInstance {
    pub index: usize,
    pub total: usize,
    pub layer: usize,
    /// Static yaw around the flower axis.
    pub angle: f32,
}

impl PetalInstance {
    pub fn new(index: usize, total: usize, layer: usize) -> Self {
        let share = if total == 0 {
            0.0
        } else {
            index as f32 / total as f32
        };
        let angle = share * TAU + layer as f32 * PI * GOLDEN_OFFSET;
        Self {
            index,
            total,
            layer,
            angle,
        }
    }

    #[inline]
    pub fn layer_norm(&self) -> f32 {
        (self.layer as f32 / MAX_LAYER).min(1.0)
    }

    /// Bloom window `(start, end)` for this petal's layer. Outer layers open
    /// earlier and finish sooner.
    pub fn bloom_window(&self) -> (f32, f32) {
        let inv = 1.0 - self.layer_norm();
        (
            inv * BLOOM_START_SPAN,
            BLOOM_END_BASE + inv * BLOOM_END_SPAN,
        )
    }

    /// Rotation the petal settles at once its local bloom reaches 1.
    pub fn open_rotation(&self) -> f32 {
        if self.layer < INNER_LAYER_COUNT {
            INNER_OPEN_ROT
        } else {
            OPEN_ROT_BASE - self.layer_norm() * OPEN_ROT_LAYER_SPAN
        }
    }

    pub fn pose(&self, bloom: f32, elapsed: f32) -> PetalPose {
        let (start, end) = self.bloom_window();
        let local_bloom = smoothstep(bloom, start, end);
        let layer = self.layer as f32;
        PetalPose {
            rotation_x: lerp(CLOSED_ROT, self.open_rotation(), local_bloom),
            rotation_z: (elapsed * SWAY_FREQ + layer).cos() * SWAY_AMP,
            offset_y: (elapsed * BREATH_FREQ + layer).sin() * BREATH_AMP,
            offset_z: layer * LAYER_PUSH + local_bloom * BLOOM_PUSH,
            local_bloom,
        }
    }

    /// Transform from petal-mesh space into the layer's space.
    pub fn local_matrix(&self, pose: &PetalPose) -> Mat4 {
        let radial = RADIAL_BASE + self.layer as f32 * RADIAL_LAYER_STEP;
        Mat4::from_rotation_y(self.angle)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, radial))
            * Mat4::from_translation(Vec3::new(0.0, pose.offset_y, pose.offset_z))
            * Mat4::from_rotation_x(pose.rotation_x)
            * Mat4::from_rotation_z(pose.rotation_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_curls_backward() {
        let mid = petal_point(0.5, 0.6);
        let tip = petal_point(0.5, 1.0);
        // Without curl the tip would sit at y = 1.5
        assert!(tip.y < PETAL_HEIGHT);
        assert!(tip.y > mid.y - 1.0);
    }

    #[test]
    fn bloom_window_is_ordered() {
        for layer in 0..8 {
            let (s, e) = PetalInstance::new(0, 3, layer).bloom_window();
            assert!(s < e, "layer {layer}: {s} >= {e}");
        }
    }
}
