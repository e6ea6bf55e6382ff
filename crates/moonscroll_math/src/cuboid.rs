//! Axis-aligned box mesh
//!
//! Each face has its own four vertices so normals and texture coordinates stay flat
//! per face. Every face maps the full texture.

use crate::{SurfaceVertex, Triangle, TriangleMesh, Vec3};

/// (normal, u axis, v axis) per face, with `u x v == normal`
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
    (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
    (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
];

/// A box centred at the origin
#[derive(Clone, Debug)]
pub struct CuboidMesh {
    half_extents: Vec3,
    vertices: Vec<SurfaceVertex>,
    triangles: Vec<Triangle>,
}

impl CuboidMesh {
    /// Create a box with the given full width (X), height (Y), and depth (Z)
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width / 2.0, height / 2.0, depth / 2.0);
        let extent = |axis: Vec3| axis.abs().dot(half);

        let mut vertices = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);

        for (normal, u, v) in FACES {
            let centre = normal * extent(normal);
            let du = u * extent(u);
            let dv = v * extent(v);
            let base = vertices.len();

            vertices.push(SurfaceVertex::new(centre - du - dv, normal, [0.0, 1.0]));
            vertices.push(SurfaceVertex::new(centre + du - dv, normal, [1.0, 1.0]));
            vertices.push(SurfaceVertex::new(centre + du + dv, normal, [1.0, 0.0]));
            vertices.push(SurfaceVertex::new(centre - du + dv, normal, [0.0, 0.0]));

            triangles.push(Triangle::new(base, base + 1, base + 2));
            triangles.push(Triangle::new(base, base + 2, base + 3));
        }

        Self { half_extents: half, vertices, triangles }
    }

    /// Create a cube with equal sides
    pub fn cube(size: f32) -> Self {
        Self::new(size, size, size)
    }

    /// Half of the width, height, and depth
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

impl TriangleMesh for CuboidMesh {
    fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::test_support::assert_well_formed;

    #[test]
    fn test_counts() {
        let cube = CuboidMesh::cube(5.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
    }

    #[test]
    fn test_corners_within_extents() {
        let cuboid = CuboidMesh::new(2.0, 4.0, 6.0);
        for v in cuboid.vertices() {
            assert!((v.position.x.abs() - 1.0).abs() < 1e-6);
            assert!((v.position.y.abs() - 2.0).abs() < 1e-6);
            assert!((v.position.z.abs() - 3.0).abs() < 1e-6);
        }
        assert_eq!(cuboid.half_extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_faces_wind_outward() {
        let cube = CuboidMesh::cube(2.0);
        let verts = cube.vertices();
        for tri in cube.triangles() {
            let [a, b, c] = tri.indices.map(|i| verts[i].position);
            let face_normal = (b - a).cross(c - a).normalized();
            assert!((face_normal - verts[tri.indices[0]].normal).length() < 1e-5);
        }
    }

    #[test]
    fn test_well_formed() {
        assert_well_formed(&CuboidMesh::cube(5.0));
    }
}
