//! Moonscroll - a decorative scene that follows the scroll wheel
//!
//! A star field, torus rings, a textured cube and a moon under a point light,
//! with the camera driven by the page scroll offset or by orbit controls.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
