//! Orbit camera controls
//!
//! Controls:
//! - Left mouse drag: orbit around the target (azimuth and polar angle)
//! - Mouse wheel: zoom towards or away from the target
//!
//! Drag and wheel input only accumulate. [`OrbitController::update`] applies the
//! accumulated motion once per frame; with damping enabled only a fraction of the
//! pending rotation is applied each frame, so the camera glides to a stop.
//! The camera distance to the target is always clamped to
//! `[min_distance, max_distance]`.

use std::f32::consts::{PI, TAU};

use moonscroll_math::Vec3;
use winit::event::{ElementState, MouseButton};
use crate::CameraControl;

/// Keeps the polar angle off the poles so the view direction never aligns with up
const POLAR_EPSILON: f32 = 1e-6;

/// Orbit controller around a fixed target
pub struct OrbitController {
    /// Point the camera orbits and faces
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    /// Fraction of pending rotation applied per update
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,

    viewport_height: f32,
    dragging: bool,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitController {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,

            viewport_height: 1.0,
            dragging: false,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state == ElementState::Pressed;
        }
    }

    /// Process mouse movement in physical pixels
    ///
    /// Only rotates while the left button is held. A drag across the full viewport
    /// height turns the camera by one full revolution.
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        if !self.dragging {
            return;
        }
        let per_pixel = TAU / self.viewport_height * self.rotate_speed;
        self.rotate_left(delta_x as f32 * per_pixel);
        self.rotate_up(delta_y as f32 * per_pixel);
    }

    /// Process mouse wheel input in lines (positive = scroll up = zoom in)
    pub fn process_scroll(&mut self, lines: f32) {
        if lines > 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if lines < 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    /// Track the viewport height used to convert drag pixels into angles
    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height.max(1) as f32;
    }

    /// Queue an azimuth rotation (radians)
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Queue a polar rotation (radians)
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Queue a zoom towards the target
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Queue a zoom away from the target
    pub fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// End any drag in progress without waiting for a button release
    pub fn cancel_drag(&mut self) {
        self.dragging = false;
    }

    /// Drop pending rotation and zoom
    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }

    /// Apply pending input to the camera, returning the new distance to the target
    pub fn update<C: CameraControl>(&mut self, camera: &mut C) -> f32 {
        let offset = camera.position() - self.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.set_position(self.target + new_offset);
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        radius
    }

    /// Builder: set the orbit target
    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Builder: set the distance clamp
    pub fn with_distance_limits(mut self, min: f32, max: f32) -> Self {
        self.min_distance = min;
        self.max_distance = max.max(min);
        self
    }

    /// Builder: enable or disable damping
    pub fn with_damping(mut self, enabled: bool, factor: f32) -> Self {
        self.enable_damping = enabled;
        self.damping_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Builder: set rotation sensitivity
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Builder: set zoom sensitivity
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.zoom_speed = speed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera_control::test_support::MockCamera;

    const EPSILON: f32 = 1e-3;

    fn drag(controller: &mut OrbitController, dx: f64, dy: f64) {
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_mouse_motion(dx, dy);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
    }

    #[test]
    fn test_locked_distance_for_any_drag() {
        let mut camera = MockCamera::at(Vec3::new(-3.0, 0.0, 30.0));
        let mut controller = OrbitController::new()
            .with_distance_limits(25.0, 25.0)
            .with_damping(true, 0.05);
        controller.set_viewport_height(800);

        let drags = [(120.0, -40.0), (-900.0, 300.0), (5.0, 5000.0), (0.0, 0.0)];
        for (dx, dy) in drags {
            drag(&mut controller, dx, dy);
            controller.process_scroll(3.0);
            for _ in 0..30 {
                let distance = controller.update(&mut camera);
                assert!((distance - 25.0).abs() < EPSILON);
                assert!(((camera.position - controller.target).length() - 25.0).abs() < EPSILON);
            }
        }
        assert_eq!(camera.looked_at, Some(Vec3::ZERO));
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 50.0));
        let mut controller = OrbitController::new().with_distance_limits(10.0, 100.0);

        for _ in 0..200 {
            controller.process_scroll(1.0);
        }
        assert!((controller.update(&mut camera) - 10.0).abs() < EPSILON);

        for _ in 0..200 {
            controller.process_scroll(-1.0);
        }
        assert!((controller.update(&mut camera) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_motion_without_button_is_ignored() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        let mut controller = OrbitController::new();
        controller.process_mouse_motion(500.0, 500.0);
        controller.update(&mut camera);
        assert!((camera.position - Vec3::new(0.0, 0.0, 30.0)).length() < EPSILON);
    }

    #[test]
    fn test_cancel_drag_ignores_later_motion() {
        let mut controller = OrbitController::new();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(controller.is_dragging());

        controller.cancel_drag();
        assert!(!controller.is_dragging());

        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        controller.process_mouse_motion(200.0, 0.0);
        controller.update(&mut camera);
        assert!((camera.position - Vec3::new(0.0, 0.0, 30.0)).length() < EPSILON);
    }

    #[test]
    fn test_undamped_drag_applies_immediately() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        let mut controller = OrbitController::new();
        controller.set_viewport_height(400);

        // A quarter of the viewport height is a quarter turn
        drag(&mut controller, -100.0, 0.0);
        controller.update(&mut camera);
        assert!((camera.position - Vec3::new(30.0, 0.0, 0.0)).length() < EPSILON);

        // Nothing pending afterwards
        controller.update(&mut camera);
        assert!((camera.position - Vec3::new(30.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_damping_glides_to_full_rotation() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        let mut controller = OrbitController::new().with_damping(true, 0.05);
        controller.set_viewport_height(400);

        drag(&mut controller, -100.0, 0.0);
        controller.update(&mut camera);
        let after_one = camera.position;
        assert!(after_one.x > 0.0 && after_one.x < 30.0 * 0.1);

        for _ in 0..2000 {
            controller.update(&mut camera);
        }
        assert!((camera.position - Vec3::new(30.0, 0.0, 0.0)).length() < 0.01);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        let mut controller = OrbitController::new();
        controller.set_viewport_height(100);

        drag(&mut controller, 0.0, 10_000.0);
        controller.update(&mut camera);
        // Pinned just below the pole, still at full distance
        assert!(camera.position.y > 29.9);
        assert!((camera.position.length() - 30.0).abs() < EPSILON);
        assert_eq!(camera.looked_at, Some(Vec3::ZERO));
    }

    #[test]
    fn test_stop_discards_pending_motion() {
        let mut camera = MockCamera::at(Vec3::new(0.0, 0.0, 30.0));
        let mut controller = OrbitController::new().with_damping(true, 0.05);
        controller.set_viewport_height(400);

        drag(&mut controller, -100.0, 0.0);
        controller.process_scroll(5.0);
        controller.stop();
        controller.update(&mut camera);
        assert!((camera.position - Vec3::new(0.0, 0.0, 30.0)).length() < EPSILON);
    }
}
