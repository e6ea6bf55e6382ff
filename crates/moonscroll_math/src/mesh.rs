//! Mesh traits and primitives for tessellated surfaces
//!
//! Meshes are pure geometric data - no colors, materials, or rendering info.
//! That information lives in the entity/material system.

use crate::Vec3;

/// A triangle defined by vertex indices (counter-clockwise when seen from outside)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into the parent mesh's vertex array
    pub indices: [usize; 3],
}

impl Triangle {
    /// Create a new triangle with the given vertex indices
    #[inline]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// A mesh vertex with position, unit normal, and texture coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
}

impl SurfaceVertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }
}

/// Trait for tessellated surfaces that can be drawn
///
/// A TriangleMesh provides the geometric data needed for rendering:
/// - Vertices: positions with normals and UVs in local space
/// - Triangles: index triples into the vertex array
pub trait TriangleMesh: Send + Sync {
    /// Get the vertices of this mesh
    fn vertices(&self) -> &[SurfaceVertex];

    /// Get the triangles of this mesh
    fn triangles(&self) -> &[Triangle];

    /// Get the number of vertices
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Get the number of triangles
    #[inline]
    fn triangle_count(&self) -> usize {
        self.triangles().len()
    }

    /// Flatten the triangles into a `u32` index list (for GPU upload)
    fn index_list(&self) -> Vec<u32> {
        self.triangles()
            .iter()
            .flat_map(|t| t.indices.iter().map(|&i| i as u32))
            .collect()
    }

    /// Radius of the smallest origin-centred sphere containing every vertex
    fn bounding_radius(&self) -> f32 {
        self.vertices()
            .iter()
            .map(|v| v.position.length())
            .fold(0.0, f32::max)
    }
}
