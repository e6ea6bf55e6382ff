//! Camera abstraction used by the followers

use moonscroll_math::Vec3;

/// Position and Euler rotation (radians) of a camera
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }
}

/// Trait for camera control
///
/// Allows the followers to work with different camera implementations.
pub trait CameraControl {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Vec3;
    fn set_rotation(&mut self, rotation: Vec3);
    /// Orient the camera so it faces `target`
    fn look_at(&mut self, target: Vec3);

    fn pose(&self) -> CameraPose {
        CameraPose::new(self.position(), self.rotation())
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.set_position(pose.position);
        self.set_rotation(pose.rotation);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Camera that records its pose and the last look-at target
    #[derive(Debug, Default)]
    pub struct MockCamera {
        pub position: Vec3,
        pub rotation: Vec3,
        pub looked_at: Option<Vec3>,
    }

    impl MockCamera {
        pub fn at(position: Vec3) -> Self {
            Self { position, ..Self::default() }
        }
    }

    impl CameraControl for MockCamera {
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
            self.looked_at = Some(target);
        }
    }
}
