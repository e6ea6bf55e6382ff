//! 3D Mathematics Library
//!
//! This crate provides vector, matrix, and mesh types for the Moonscroll scene.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Mesh Types
//!
//! - [`TriangleMesh`] - Trait for tessellated surfaces that can be drawn
//! - [`SurfaceVertex`] - A vertex with position, normal, and texture coordinates
//! - [`SphereMesh`] - UV sphere
//! - [`TorusMesh`] - Ring torus
//! - [`CuboidMesh`] - Axis-aligned box

mod vec3;
pub mod mat4;
pub mod mesh;
pub mod sphere;
pub mod torus;
pub mod cuboid;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use mesh::{TriangleMesh, SurfaceVertex, Triangle};
pub use sphere::SphereMesh;
pub use torus::TorusMesh;
pub use cuboid::CuboidMesh;
