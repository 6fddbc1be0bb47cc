//! CPU-side mesh building: parametric surfaces and the stem cylinder.

use crate::error::GeometryError;
use glam::Vec3;
use std::f32::consts::TAU;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_grid_indices(&mut self, base: u32, cols: u32, rows: u32) {
        let stride = cols + 1;
        for j in 0..rows {
            for i in 0..cols {
                let a = base + j * stride + i;
                let b = base + (j + 1) * stride + i;
                let c = b + 1;
                let d = a + 1;
                self.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
    }
}

// Finite-difference step used to estimate surface tangents
const EPS: f32 = 1e-5;

/// Tessellate `f(u, v)` over the unit square into a `slices` x `stacks` grid.
///
/// Normals come from the cross product of the u and v tangents, estimated by
/// one-sided differences that stay inside \[0, 1\].
pub fn parametric(
    f: impl Fn(f32, f32) -> Vec3,
    slices: u32,
    stacks: u32,
) -> Result<MeshData, GeometryError> {
    if slices == 0 || stacks == 0 {
        return Err(GeometryError::EmptyGrid { slices, stacks });
    }
    let vertex_count = ((slices + 1) * (stacks + 1)) as usize;
    let mut mesh = MeshData::with_capacity(vertex_count, (slices * stacks * 6) as usize);

    for j in 0..=stacks {
        let v = j as f32 / stacks as f32;
        for i in 0..=slices {
            let u = i as f32 / slices as f32;
            let p = f(u, v);

            let pu = if u - EPS >= 0.0 {
                p - f(u - EPS, v)
            } else {
                f(u + EPS, v) - p
            };
            let pv = if v - EPS >= 0.0 {
                p - f(u, v - EPS)
            } else {
                f(u, v + EPS) - p
            };
            let n = pu.cross(pv).try_normalize().unwrap_or(Vec3::Z);

            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: [u, v],
            });
        }
    }
    mesh.push_grid_indices(0, slices, stacks);
    Ok(mesh)
}

/// Capped cylinder along +Y centered at the origin.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> Result<MeshData, GeometryError> {
    if radial_segments < 3 {
        return Err(GeometryError::TooFewSegments(radial_segments));
    }
    if !height.is_finite() || height <= 0.0 || radius_top < 0.0 || radius_bottom < 0.0 {
        return Err(GeometryError::InvalidDimensions);
    }
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;
    let side = ((radial_segments + 1) * 2) as usize;
    let caps = ((radial_segments + 2) * 2) as usize;
    let mut mesh = MeshData::with_capacity(side + caps, (radial_segments * 12) as usize);

    for (row, (y, r)) in [(half, radius_top), (-half, radius_bottom)]
        .into_iter()
        .enumerate()
    {
        for seg in 0..=radial_segments {
            let u = seg as f32 / radial_segments as f32;
            let (sin_t, cos_t) = (u * TAU).sin_cos();
            let n = Vec3::new(sin_t, slope, cos_t).normalize();
            mesh.vertices.push(Vertex {
                position: [r * sin_t, y, r * cos_t],
                normal: n.to_array(),
                uv: [u, 1.0 - row as f32],
            });
        }
    }
    mesh.push_grid_indices(0, radial_segments, 1);

    for (y, r, sign) in [(half, radius_top, 1.0_f32), (-half, radius_bottom, -1.0)] {
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, sign, 0.0],
            uv: [0.5, 0.5],
        });
        for seg in 0..=radial_segments {
            let (sin_t, cos_t) = (seg as f32 / radial_segments as f32 * TAU).sin_cos();
            mesh.vertices.push(Vertex {
                position: [r * sin_t, y, r * cos_t],
                normal: [0.0, sign, 0.0],
                uv: [0.5 + 0.5 * sin_t, 0.5 + 0.5 * cos_t],
            });
        }
        for seg in 0..radial_segments {
            let a = center + 1 + seg;
            let b = a + 1;
            if sign > 0.0 {
                mesh.indices.extend_from_slice(&[a, b, center]);
            } else {
                mesh.indices.extend_from_slice(&[b, a, center]);
            }
        }
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_plane_normals_point_up_z() {
        let mesh = parametric(|u, v| Vec3::new(u, v, 0.0), 4, 3).expect("mesh");
        assert_eq!(mesh.vertices.len(), 5 * 4);
        assert_eq!(mesh.indices.len(), 4 * 3 * 6);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal) - Vec3::Z).length() < 1e-3);
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        let flat = |u: f32, v: f32| Vec3::new(u, v, 0.0);
        assert_eq!(
            parametric(flat, 0, 3).err(),
            Some(GeometryError::EmptyGrid { slices: 0, stacks: 3 })
        );
        assert_eq!(
            parametric(flat, 4, 0).err(),
            Some(GeometryError::EmptyGrid { slices: 4, stacks: 0 })
        );
    }

    #[test]
    fn cylinder_rejects_degenerate_input() {
        assert!(cylinder(0.1, 0.1, 1.0, 2).is_err());
        assert!(cylinder(0.1, 0.1, 0.0, 8).is_err());
        let mesh = cylinder(0.04, 0.06, 6.0, 16).expect("stem");
        assert_eq!(mesh.triangle_count(), 16 * 2 + 16 * 2);
        let max_index = *mesh.indices.iter().max().unwrap_or(&0) as usize;
        assert!(max_index < mesh.vertices.len());
    }
}
