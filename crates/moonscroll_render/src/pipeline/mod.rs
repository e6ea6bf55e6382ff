//! Rendering pipeline components
//!
//! The mesh pipeline draws every entity with a shape; the background pipeline
//! fills the viewport with the scene background texture first, in the same pass.

pub mod types;
pub mod mesh_pipeline;
pub mod background_pipeline;

// Re-export types
pub use types::{Vertex, FrameUniforms, ObjectUniforms};

// Re-export pipelines
pub use mesh_pipeline::MeshPipeline;
pub use background_pipeline::BackgroundPipeline;
