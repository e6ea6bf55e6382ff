//! Camera input handling
//!
//! This crate turns host input into camera poses:
//!
//! - [`ScrollFollower`] maps a scroll offset linearly onto the camera pose
//! - [`ScrollStream`] fans scroll samples out to independent subscribers
//! - [`OrbitController`] orbits the camera around a target with damped drag and zoom
//!
//! Followers drive any camera implementing [`CameraControl`].

mod camera_control;
mod scroll_follower;
mod scroll_stream;
mod orbit_controller;

pub use camera_control::{CameraControl, CameraPose};
pub use scroll_follower::ScrollFollower;
pub use scroll_stream::{ScrollStream, ScrollSubscription};
pub use orbit_controller::OrbitController;
