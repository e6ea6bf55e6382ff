//! Scene construction utilities
//!
//! This module provides a declarative API for building the Moonscroll scene.

mod scene_builder;

pub use scene_builder::{BuiltScene, SceneBuilder, SceneHandles};
