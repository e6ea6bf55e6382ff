//! Rendering for Moonscroll
//!
//! This crate provides the wgpu-based pipeline that draws the scene World.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::PerspectiveCamera`] - Perspective camera driven through `CameraControl`
//! - [`pipeline::MeshPipeline`] - Textured meshes with Lambert lighting
//! - [`pipeline::BackgroundPipeline`] - Full-screen background texture
//! - [`renderable::RenderableScene`] - Converts World entities to GPU buffers

pub mod context;
pub mod camera;
pub mod pipeline;
pub mod renderable;
pub mod texture;

pub use context::{ContextError, RenderContext};
pub use camera::PerspectiveCamera;
pub use renderable::RenderableScene;
pub use texture::GpuTexture;

// Re-export core types for convenience
pub use moonscroll_core::{World, Entity, Transform3D, Material, EntityKey};
pub use moonscroll_core::Vec3;
