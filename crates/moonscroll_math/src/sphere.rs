//! UV sphere mesh
//!
//! Latitude/longitude tessellation. `width_segments` counts meridians and
//! `height_segments` counts parallels; each ring carries one duplicated seam vertex
//! so texture coordinates wrap cleanly.

use std::f32::consts::PI;

use crate::{SurfaceVertex, Triangle, TriangleMesh, Vec3};

/// A sphere centred at the origin
#[derive(Clone, Debug)]
pub struct SphereMesh {
    radius: f32,
    vertices: Vec<SurfaceVertex>,
    triangles: Vec<Triangle>,
}

impl SphereMesh {
    /// Smallest meridian count that still closes a solid
    pub const MIN_WIDTH_SEGMENTS: u32 = 3;
    /// Smallest parallel count that still closes a solid
    pub const MIN_HEIGHT_SEGMENTS: u32 = 2;

    /// Create a sphere with the given radius and segment counts
    ///
    /// Segment counts below the minimum are raised to it.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width = width_segments.max(Self::MIN_WIDTH_SEGMENTS) as usize;
        let height = height_segments.max(Self::MIN_HEIGHT_SEGMENTS) as usize;

        let mut vertices = Vec::with_capacity((width + 1) * (height + 1));
        let mut grid = Vec::with_capacity(height + 1);

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            let theta = v * PI;
            let mut row = Vec::with_capacity(width + 1);

            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let phi = u * 2.0 * PI;

                let position = Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );

                row.push(vertices.len());
                vertices.push(SurfaceVertex::new(position, position.normalized(), [u, v]));
            }
            grid.push(row);
        }

        let mut triangles = Vec::with_capacity(width * height * 2);
        for iy in 0..height {
            for ix in 0..width {
                let a = grid[iy][ix + 1];
                let b = grid[iy][ix];
                let c = grid[iy + 1][ix];
                let d = grid[iy + 1][ix + 1];

                // The first and last bands collapse into fans at the poles
                if iy != 0 {
                    triangles.push(Triangle::new(a, b, d));
                }
                if iy != height - 1 {
                    triangles.push(Triangle::new(b, c, d));
                }
            }
        }

        Self { radius, vertices, triangles }
    }

    /// Sphere radius
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl TriangleMesh for SphereMesh {
    fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
