//! GPU-compatible data types for the mesh and background pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use moonscroll_core::{Light, Material, Shading, World};
use moonscroll_math::{mat4, Mat4, SurfaceVertex};

/// A mesh vertex as uploaded to the GPU
/// Layout: 32 bytes (must match mesh.wgsl VertexInput)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl From<&SurfaceVertex> for Vertex {
    fn from(v: &SurfaceVertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            uv: v.uv,
        }
    }
}

/// Per-frame uniforms shared by every draw
/// Layout: 192 bytes (must match mesh.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: Mat4,
    /// Projection matrix (64 bytes)
    pub projection_matrix: Mat4,
    /// Camera position, w unused (16 bytes)
    pub camera_position: [f32; 4],
    /// Point light position, w = 1 when a point light is present (16 bytes)
    pub light_position: [f32; 4],
    /// Point light radiance, w unused (16 bytes)
    pub light_color: [f32; 4],
    /// Ambient radiance, w unused (16 bytes)
    pub ambient_color: [f32; 4],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            camera_position: [0.0; 4],
            light_position: [0.0; 4],
            light_color: [0.0; 4],
            ambient_color: [0.0; 4],
        }
    }
}

impl FrameUniforms {
    /// Fill the light slots from the world
    ///
    /// The first point light is used; ambient lights add up.
    pub fn with_lights(mut self, world: &World) -> Self {
        let mut point_found = false;
        let mut ambient = [0.0f32; 3];

        for light in world.lights() {
            match *light {
                Light::Point { position, .. } if !point_found => {
                    let [r, g, b] = light.radiance();
                    self.light_position = [position.x, position.y, position.z, 1.0];
                    self.light_color = [r, g, b, 0.0];
                    point_found = true;
                }
                Light::Point { .. } => {
                    log::trace!("Ignoring additional point light");
                }
                Light::Ambient { .. } => {
                    let radiance = light.radiance();
                    for (sum, c) in ambient.iter_mut().zip(radiance) {
                        *sum += c;
                    }
                }
            }
        }

        self.ambient_color = [ambient[0], ambient[1], ambient[2], 0.0];
        self
    }
}

/// Per-object uniforms
/// Layout: 96 bytes (must match mesh.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Local-to-world matrix (64 bytes)
    pub model_matrix: Mat4,
    /// Linear RGBA base colour (16 bytes)
    pub base_color: [f32; 4],
    /// x = 1 for lit shading, yzw unused (16 bytes)
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model_matrix: Mat4, material: &Material) -> Self {
        let lit = match material.shading {
            Shading::Lit => 1.0,
            Shading::Unlit => 0.0,
        };
        Self {
            model_matrix,
            base_color: material.base_color,
            params: [lit, 0.0, 0.0, 0.0],
        }
    }
}
