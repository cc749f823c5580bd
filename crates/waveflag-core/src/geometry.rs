//! Subdivided plane mesh with a per-vertex displacement attribute.

use crate::constants::{PLANE_HEIGHT, PLANE_SCALE_Y, PLANE_SEGMENTS_X, PLANE_SEGMENTS_Y, PLANE_WIDTH};
use glam::{Mat4, Vec3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("displacement attribute needs {expected} values, got {got}")]
    AttributeLength { expected: usize, got: usize },
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug)]
pub struct PlaneGeometry {
    pub segments_x: u32,
    pub segments_y: u32,
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
    displacement: Vec<f32>,
    displacement_dirty: bool,
}

impl PlaneGeometry {
    /// Grid of `(segments_x + 1) * (segments_y + 1)` vertices centered on the
    /// origin in the XY plane. Row 0 is the top edge (+Y, uv.y = 1).
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Self {
        let gx = segments_x.max(1);
        let gy = segments_y.max(1);
        let gx1 = gx + 1;
        let gy1 = gy + 1;
        let seg_w = width / gx as f32;
        let seg_h = height / gy as f32;

        let mut vertices = Vec::with_capacity((gx1 * gy1) as usize);
        for iy in 0..gy1 {
            let y = iy as f32 * seg_h - height * 0.5;
            for ix in 0..gx1 {
                let x = ix as f32 * seg_w - width * 0.5;
                vertices.push(PlaneVertex {
                    position: [x, -y, 0.0],
                    uv: [ix as f32 / gx as f32, 1.0 - iy as f32 / gy as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity((gx * gy * 6) as usize);
        for iy in 0..gy {
            for ix in 0..gx {
                let a = ix + gx1 * iy;
                let b = ix + gx1 * (iy + 1);
                let c = (ix + 1) + gx1 * (iy + 1);
                let d = (ix + 1) + gx1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        let count = vertices.len();
        Self {
            segments_x: gx,
            segments_y: gy,
            vertices,
            indices,
            displacement: vec![0.0; count],
            displacement_dirty: true,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn displacement(&self) -> &[f32] {
        &self.displacement
    }

    /// Rebind the whole displacement attribute from a fresh sample buffer.
    pub fn set_displacement(&mut self, samples: &[f32]) -> Result<(), GeometryError> {
        if samples.len() != self.displacement.len() {
            return Err(GeometryError::AttributeLength {
                expected: self.displacement.len(),
                got: samples.len(),
            });
        }
        self.displacement.copy_from_slice(samples);
        self.displacement_dirty = true;
        Ok(())
    }

    /// Whether the attribute changed since the renderer last uploaded it.
    pub fn take_displacement_dirty(&mut self) -> bool {
        std::mem::take(&mut self.displacement_dirty)
    }
}

impl Default for PlaneGeometry {
    fn default() -> Self {
        Self::new(PLANE_WIDTH, PLANE_HEIGHT, PLANE_SEGMENTS_X, PLANE_SEGMENTS_Y)
    }
}

/// Model transform of the surface mesh (squashed to a 3:2 flag).
pub fn plane_model_matrix() -> Mat4 {
    Mat4::from_scale(Vec3::new(1.0, PLANE_SCALE_Y, 1.0))
}
