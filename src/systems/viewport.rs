//! Camera positioning sources
//!
//! The camera is driven either by the page scroll offset or by orbit controls.
//! Scroll samples arrive through a [`ScrollSubscription`] and are applied when the
//! host reports a scroll, never from the frame loop. Orbit controls accumulate
//! pointer input and integrate once per tick.

use moonscroll_input::{CameraControl, OrbitController, ScrollFollower, ScrollSubscription};
use moonscroll_math::Vec3;
use winit::event::{ElementState, MouseButton};

use crate::config::{FollowerConfig, FollowerMode};

/// Positions the camera from scroll or pointer input
pub enum ViewportFollower {
    /// Camera pose is a function of the latest scroll offset
    Scroll {
        follower: ScrollFollower,
        subscription: ScrollSubscription,
    },
    /// Camera orbits a target under pointer drag
    Orbit(OrbitController),
}

impl ViewportFollower {
    /// Build the follower selected by `config`
    ///
    /// The subscription is only kept in scroll mode.
    pub fn from_config(config: &FollowerConfig, subscription: ScrollSubscription) -> Self {
        match config.mode {
            FollowerMode::Scroll => {
                let scroll = &config.scroll;
                let follower = ScrollFollower::new()
                    .with_base(moonscroll_input::CameraPose::new(
                        Vec3::from_array(scroll.base_position),
                        Vec3::from_array(scroll.base_rotation),
                    ))
                    .with_coefficients(scroll.k_z, scroll.k_x, scroll.k_r);
                Self::Scroll { follower, subscription }
            }
            FollowerMode::Orbit => {
                let orbit = &config.orbit;
                Self::Orbit(
                    OrbitController::new()
                        .with_target(Vec3::from_array(orbit.target))
                        .with_distance_limits(orbit.min_distance, orbit.max_distance)
                        .with_damping(orbit.damping, orbit.damping_factor)
                        .with_rotate_speed(orbit.rotate_speed)
                        .with_zoom_speed(orbit.zoom_speed),
                )
            }
        }
    }

    /// Whether the mouse wheel belongs to the follower rather than the page
    pub fn captures_wheel(&self) -> bool {
        matches!(self, Self::Orbit(_))
    }

    /// Apply the newest pending scroll sample to the camera
    ///
    /// Returns `true` if the camera moved. Older samples are superseded.
    pub fn on_scroll<C: CameraControl>(&mut self, camera: &mut C) -> bool {
        match self {
            Self::Scroll { follower, subscription } => match subscription.latest() {
                Some(offset) => {
                    follower.apply(camera, offset);
                    true
                }
                None => false,
            },
            Self::Orbit(_) => false,
        }
    }

    /// Per-tick integration (orbit only)
    pub fn integrate<C: CameraControl>(&mut self, camera: &mut C) {
        if let Self::Orbit(controller) = self {
            controller.update(camera);
        }
    }

    /// Return the camera to the pose the follower implies
    ///
    /// In scroll mode this is the pose for the last offset, otherwise the camera
    /// keeps the position it was reset to and pending orbit motion is dropped.
    pub fn reset<C: CameraControl>(&mut self, camera: &mut C) {
        match self {
            Self::Scroll { follower, .. } => {
                if let Some(offset) = follower.last_offset() {
                    follower.apply(camera, offset);
                }
            }
            Self::Orbit(controller) => controller.stop(),
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if let Self::Orbit(controller) = self {
            controller.process_mouse_button(button, state);
        }
    }

    /// The window lost the pointer, so no release will arrive
    pub fn on_pointer_lost(&mut self) {
        if let Self::Orbit(controller) = self {
            controller.cancel_drag();
        }
    }

    pub fn on_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if let Self::Orbit(controller) = self {
            controller.process_mouse_motion(delta_x, delta_y);
        }
    }

    /// Wheel input in lines, positive away from the user
    pub fn on_wheel(&mut self, lines: f32) {
        if let Self::Orbit(controller) = self {
            controller.process_scroll(lines);
        }
    }

    pub fn on_resize(&mut self, height: u32) {
        if let Self::Orbit(controller) = self {
            controller.set_viewport_height(height);
        }
    }

    /// Short name for logs and the window title
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scroll { .. } => "scroll",
            Self::Orbit(_) => "orbit",
        }
    }
}
