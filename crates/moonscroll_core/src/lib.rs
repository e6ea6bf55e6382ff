//! Core scene types for Moonscroll
//!
//! This crate provides the types the scene is built from:
//!
//! - [`Transform3D`] - Position, Euler rotation, and scale
//! - [`Material`] - Base colour, optional texture, and shading model
//! - [`Entity`] - An object (or group node) with transform, shape, material, and spin
//! - [`ShapeRef`] - Reference to a shape (shared or owned)
//! - [`World`] - Container for entities, lights, and the background
//! - [`EntityKey`] - Generational key to an entity in the world
//! - [`ShapeTemplate`] - Serializable shape template
//! - [`Light`] - Point and ambient lights
//! - [`TextureCache`] - Asynchronous texture loading
//! - [`FrameClock`] - Per-frame elapsed time

mod transform;
mod entity;
mod world;
mod shapes;
mod light;
mod clock;
pub mod asset_error;
pub mod texture_cache;

pub use transform::Transform3D;
pub use entity::{linear_rgb_from_hex, DirtyFlags, Entity, Material, Shading, ShapeRef};
pub use world::{World, EntityKey};
pub use shapes::ShapeTemplate;
pub use light::Light;
pub use clock::{FrameClock, MAX_DELTA};
pub use asset_error::AssetError;
pub use texture_cache::{TextureCache, TextureData, TextureHandle, TextureId, TextureStatus};

// Re-export commonly used types from moonscroll_math for convenience
pub use moonscroll_math::{Mat4, TriangleMesh, Vec3};
