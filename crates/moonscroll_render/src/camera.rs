//! Perspective camera
//!
//! The camera looks down its local -Z axis with +Y up. Rotation is stored as Euler
//! angles applied in YXZ order, so `rotation.y` is heading and `rotation.x` is pitch.

use moonscroll_input::CameraControl;
use moonscroll_math::{mat4, Mat4, Vec3};

/// Perspective camera
#[derive(Clone, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Euler angles (radians, YXZ order)
    pub rotation: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Width divided by height of the viewport
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    start_position: Vec3,
    start_rotation: Vec3,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 1.0, 0.1, 1000.0)
    }
}

impl PerspectiveCamera {
    /// Create a camera at the origin
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov,
            aspect,
            near,
            far,
            start_position: Vec3::ZERO,
            start_rotation: Vec3::ZERO,
        }
    }

    /// Builder: set the start pose, which [`reset`](Self::reset) returns to
    pub fn with_start(mut self, position: Vec3, rotation: Vec3) -> Self {
        self.start_position = position;
        self.start_rotation = rotation;
        self.position = position;
        self.rotation = rotation;
        self
    }

    /// Return to the start pose
    pub fn reset(&mut self) {
        self.position = self.start_position;
        self.rotation = self.start_rotation;
    }

    /// Update the aspect ratio from a viewport size
    ///
    /// A zero height keeps the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Camera-to-world matrix
    pub fn world_matrix(&self) -> Mat4 {
        mat4::mul(mat4::translation(self.position), mat4::euler_yxz(self.rotation))
    }

    /// World-to-camera matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::inverse_rigid(self.world_matrix())
    }

    /// Clip-space projection
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        mat4::transform_direction(mat4::euler_yxz(self.rotation), -Vec3::Z)
    }

    /// Right direction in world space
    pub fn right(&self) -> Vec3 {
        mat4::transform_direction(mat4::euler_yxz(self.rotation), Vec3::X)
    }
}

impl CameraControl for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Vec3 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if direction.is_zero() {
            return;
        }
        let d = direction.normalized();
        let pitch = d.y.clamp(-1.0, 1.0).asin();
        let yaw = (-d.x).atan2(-d.z);
        self.rotation = Vec3::new(pitch, yaw, 0.0);
    }
}
