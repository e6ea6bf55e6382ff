//! Scroll-driven camera mapping
//!
//! The camera pose is a pure function of the latest scroll offset `t`, which is
//! zero at the top of the page and negative once scrolled down:
//!
//! ```text
//! position.z = base.z + t * k_z
//! position.x = base.x + t * k_x
//! rotation.y = base.rot_y + t * k_r
//! ```
//!
//! Every other pose component stays at the base value.

use moonscroll_math::Vec3;
use crate::{CameraControl, CameraPose};

/// Maps a scroll offset onto the camera pose
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollFollower {
    /// Pose at `t = 0`
    pub base: CameraPose,
    /// Camera Z per unit of scroll
    pub k_z: f32,
    /// Camera X per unit of scroll
    pub k_x: f32,
    /// Camera yaw (radians) per unit of scroll
    pub k_r: f32,
    last_offset: Option<f32>,
}

impl Default for ScrollFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollFollower {
    /// Follower with the default coefficients and a zero base pose
    pub fn new() -> Self {
        Self {
            base: CameraPose::default(),
            k_z: -0.01,
            k_x: -0.0002,
            k_r: -0.0002,
            last_offset: None,
        }
    }

    /// Builder: set the pose at `t = 0`
    pub fn with_base(mut self, base: CameraPose) -> Self {
        self.base = base;
        self
    }

    /// Builder: set the coefficients
    pub fn with_coefficients(mut self, k_z: f32, k_x: f32, k_r: f32) -> Self {
        self.k_z = k_z;
        self.k_x = k_x;
        self.k_r = k_r;
        self
    }

    /// Camera pose for scroll offset `t`
    pub fn pose_at(&self, t: f32) -> CameraPose {
        let base = self.base;
        CameraPose {
            position: Vec3::new(
                base.position.x + t * self.k_x,
                base.position.y,
                base.position.z + t * self.k_z,
            ),
            rotation: Vec3::new(
                base.rotation.x,
                base.rotation.y + t * self.k_r,
                base.rotation.z,
            ),
        }
    }

    /// Move `camera` to the pose for scroll offset `t`
    pub fn apply<C: CameraControl>(&mut self, camera: &mut C, t: f32) {
        let pose = self.pose_at(t);
        camera.set_pose(pose);
        self.last_offset = Some(t);
        log::debug!(
            "Scroll offset {} -> camera ({:.3}, {:.3}, {:.3}) yaw {:.4}",
            t,
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.rotation.y
        );
    }

    /// Offset most recently applied, `None` before the first call
    pub fn last_offset(&self) -> Option<f32> {
        self.last_offset
    }
}
