//! Ring torus mesh
//!
//! The ring lies in the XY plane around the Z axis. `radius` is the distance from the
//! centre to the middle of the tube and `tube` is the tube radius.

use std::f32::consts::TAU;

use crate::{SurfaceVertex, Triangle, TriangleMesh, Vec3};

/// A torus centred at the origin
#[derive(Clone, Debug)]
pub struct TorusMesh {
    radius: f32,
    tube: f32,
    vertices: Vec<SurfaceVertex>,
    triangles: Vec<Triangle>,
}

impl TorusMesh {
    /// Create a torus
    ///
    /// `radial_segments` subdivides the tube cross-section and `tubular_segments`
    /// subdivides the ring. Both are raised to at least 3.
    pub fn new(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial = radial_segments.max(3) as usize;
        let tubular = tubular_segments.max(3) as usize;

        let mut vertices = Vec::with_capacity((radial + 1) * (tubular + 1));

        for j in 0..=radial {
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * TAU;
                let v = j as f32 / radial as f32 * TAU;

                let position = Vec3::new(
                    (radius + tube * v.cos()) * u.cos(),
                    (radius + tube * v.cos()) * u.sin(),
                    tube * v.sin(),
                );
                let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let normal = (position - centre).normalized();

                vertices.push(SurfaceVertex::new(
                    position,
                    normal,
                    [i as f32 / tubular as f32, j as f32 / radial as f32],
                ));
            }
        }

        let stride = tubular + 1;
        let mut triangles = Vec::with_capacity(radial * tubular * 2);
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = stride * j + i - 1;
                let b = stride * (j - 1) + i - 1;
                let c = stride * (j - 1) + i;
                let d = stride * j + i;

                triangles.push(Triangle::new(a, b, d));
                triangles.push(Triangle::new(b, c, d));
            }
        }

        Self { radius, tube, vertices, triangles }
    }

    /// Ring radius (centre to tube centre)
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Tube radius
    pub fn tube(&self) -> f32 {
        self.tube
    }
}

impl TriangleMesh for TorusMesh {
    fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}
