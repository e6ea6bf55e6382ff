//! Serializable shape templates
//!
//! ShapeTemplate provides a serializable representation of shapes, solving the trait
//! object serialization problem. Each variant stores its construction parameters.
//!
//! All shapes are created in **local space**, centred at the origin. The entity
//! transform is used to position them in the world.

use serde::{Serialize, Deserialize};
use moonscroll_math::{CuboidMesh, SphereMesh, TorusMesh, TriangleMesh};

/// Serializable shape template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeTemplate {
    /// A UV sphere
    Sphere {
        radius: f32,
        /// Number of meridians
        #[serde(default = "default_width_segments")]
        width_segments: u32,
        /// Number of parallels
        #[serde(default = "default_height_segments")]
        height_segments: u32,
    },
    /// A ring torus in the local XY plane
    Torus {
        /// Centre of the ring to the centre of the tube
        radius: f32,
        /// Tube radius
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// An axis-aligned box
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
}

fn default_width_segments() -> u32 {
    32
}

fn default_height_segments() -> u32 {
    16
}

impl ShapeTemplate {
    /// Create the actual mesh from this template
    pub fn create_shape(&self) -> Box<dyn TriangleMesh> {
        match *self {
            ShapeTemplate::Sphere { radius, width_segments, height_segments } => {
                Box::new(SphereMesh::new(radius, width_segments, height_segments))
            }
            ShapeTemplate::Torus { radius, tube, radial_segments, tubular_segments } => {
                Box::new(TorusMesh::new(radius, tube, radial_segments, tubular_segments))
            }
            ShapeTemplate::Cuboid { width, height, depth } => {
                Box::new(CuboidMesh::new(width, height, depth))
            }
        }
    }

    /// Create a sphere template with the default 32x16 tessellation
    pub fn sphere(radius: f32) -> Self {
        ShapeTemplate::Sphere {
            radius,
            width_segments: default_width_segments(),
            height_segments: default_height_segments(),
        }
    }

    /// Create a sphere template with explicit tessellation
    pub fn sphere_with_segments(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        ShapeTemplate::Sphere { radius, width_segments, height_segments }
    }

    /// Create a torus template
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        ShapeTemplate::Torus { radius, tube, radial_segments, tubular_segments }
    }

    /// Create a cube template
    pub fn cube(size: f32) -> Self {
        ShapeTemplate::Cuboid { width: size, height: size, depth: size }
    }
}
