//! Per-frame scene update
//!
//! Manages the frame loop:
//! - Clock sampling
//! - Spin of animated objects
//! - Orbit integration
//! - Drawing through a [`DrawTarget`]
//!
//! Scroll events are handled between frames by [`FrameDriver::on_scroll`].

use std::time::Instant;

use moonscroll_core::{FrameClock, World};
use moonscroll_render::PerspectiveCamera;

use super::scroll_spinner::ScrollSpinner;
use super::viewport::ViewportFollower;
use crate::config::{AnimationConfig, RotationModeKind};

/// Anything that can draw the world from a camera
pub trait DrawTarget {
    type Error;

    fn draw(&mut self, world: &World, camera: &PerspectiveCamera) -> Result<(), Self::Error>;
}

/// Lifecycle of the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Built, no tick yet
    Idle,
    /// Ticking once per refresh
    Running,
}

/// How per-tick spin is scaled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RotationMode {
    /// Full spin every tick
    PerTick,
    /// Spin scaled by `dt * reference_hz`
    TimeScaled { reference_hz: f32 },
}

impl RotationMode {
    pub fn from_config(config: &AnimationConfig) -> Self {
        match config.rotation_mode {
            RotationModeKind::PerTick => Self::PerTick,
            RotationModeKind::TimeScaled => Self::TimeScaled {
                reference_hz: config.reference_hz,
            },
        }
    }

    /// Multiplier applied to spin for a frame lasting `dt` seconds
    pub fn scale(&self, dt: f32) -> f32 {
        match *self {
            Self::PerTick => 1.0,
            Self::TimeScaled { reference_hz } => dt * reference_hz,
        }
    }
}

/// Drawable surface size in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything the frame loop mutates
pub struct SceneContext {
    pub world: World,
    pub camera: PerspectiveCamera,
    pub viewport: ViewportSize,
    pub clock: FrameClock,
}

impl SceneContext {
    pub fn new(world: World, mut camera: PerspectiveCamera, viewport: ViewportSize) -> Self {
        camera.set_viewport(viewport.width, viewport.height);
        Self {
            world,
            camera,
            viewport,
            clock: FrameClock::new(),
        }
    }
}

/// Drives the scene once per display refresh
pub struct FrameDriver {
    context: SceneContext,
    follower: ViewportFollower,
    spinner: Option<ScrollSpinner>,
    mode: RotationMode,
    state: DriverState,
    ticks: u64,
}

impl FrameDriver {
    /// Create a frame driver
    pub fn new(context: SceneContext, follower: ViewportFollower, mode: RotationMode) -> Self {
        Self {
            context,
            follower,
            spinner: None,
            mode,
            state: DriverState::Idle,
            ticks: 0,
        }
    }

    /// Builder: rotate objects on scroll events
    pub fn with_scroll_spinner(mut self, spinner: ScrollSpinner) -> Self {
        self.spinner = Some(spinner);
        self
    }

    /// Move from Idle to Running
    ///
    /// Restarts the clock so time spent loading does not count. Returns `false`
    /// if already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.state == DriverState::Running {
            return false;
        }
        self.context.clock.reset(now);
        self.state = DriverState::Running;
        log::info!(
            "Frame driver running ({} follower, {:?})",
            self.follower.label(),
            self.mode
        );
        true
    }

    /// Run one frame
    pub fn tick<D: DrawTarget>(&mut self, target: &mut D) -> Result<(), D::Error> {
        self.tick_at(Instant::now(), target)
    }

    /// Run one frame with an explicit clock sample
    ///
    /// Starts the driver if it is still idle.
    pub fn tick_at<D: DrawTarget>(&mut self, now: Instant, target: &mut D) -> Result<(), D::Error> {
        if self.state == DriverState::Idle {
            self.start_at(now);
        }

        // 1. Sample the clock
        let dt = self.context.clock.sample_at(now);

        // 2. Spin animated objects
        self.context.world.advance_spin(self.mode.scale(dt));

        // 3. Orbit integration
        self.follower.integrate(&mut self.context.camera);

        // 4. Draw
        target.draw(&self.context.world, &self.context.camera)?;
        self.context.world.clear_all_dirty();
        self.ticks += 1;

        Ok(())
    }

    /// Apply pending scroll samples to the camera and to scroll-spun objects
    ///
    /// Returns `true` if anything changed.
    pub fn on_scroll(&mut self) -> bool {
        let moved = self.follower.on_scroll(&mut self.context.camera);
        let spun = match self.spinner.as_mut() {
            Some(spinner) => spinner.on_scroll(&mut self.context.world),
            None => 0,
        };
        moved || spun > 0
    }

    /// Track a new drawable size
    ///
    /// Zero-sized viewports (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.viewport = ViewportSize::new(width, height);
        self.context.camera.set_viewport(width, height);
        self.follower.on_resize(height);
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    /// Return the camera to its start pose, as the follower allows
    pub fn reset_camera(&mut self) {
        self.context.camera.reset();
        self.follower.reset(&mut self.context.camera);
        log::info!("Camera reset");
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of frames drawn
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn context(&self) -> &SceneContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SceneContext {
        &mut self.context
    }

    pub fn follower(&self) -> &ViewportFollower {
        &self.follower
    }

    pub fn follower_mut(&mut self) -> &mut ViewportFollower {
        &mut self.follower
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use moonscroll_core::{Entity, EntityKey, ShapeRef, ShapeTemplate, Transform3D};
    use moonscroll_input::ScrollStream;
    use moonscroll_math::Vec3;

    use crate::config::{FollowerConfig, FollowerMode};

    const EPSILON: f32 = 1e-3;

    /// Records what it was asked to draw
    #[derive(Default)]
    struct RecordingTarget {
        draws: usize,
        camera_positions: Vec<Vec3>,
        dirty_seen: Vec<bool>,
    }

    impl DrawTarget for RecordingTarget {
        type Error = String;

        fn draw(&mut self, world: &World, camera: &PerspectiveCamera) -> Result<(), String> {
            self.draws += 1;
            self.camera_positions.push(camera.position);
            self.dirty_seen.push(world.has_dirty_entities());
            Ok(())
        }
    }

    struct FailingTarget;

    impl DrawTarget for FailingTarget {
        type Error = &'static str;

        fn draw(&mut self, _: &World, _: &PerspectiveCamera) -> Result<(), &'static str> {
            Err("device lost")
        }
    }

    fn spinning_world(spin: Vec3) -> (World, EntityKey) {
        let mut world = World::new();
        let key = world.add_entity(
            Entity::with_transform(
                ShapeRef::Owned(ShapeTemplate::torus(6.0, 0.05, 8, 8).create_shape()),
                Transform3D::from_position_rotation(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.25)),
                Default::default(),
            )
            .with_spin(spin),
        );
        (world, key)
    }

    fn driver(world: World, mode: RotationMode) -> (FrameDriver, ScrollStream) {
        let mut stream = ScrollStream::new();
        let follower = ViewportFollower::from_config(&FollowerConfig::default(), stream.subscribe());
        let camera = PerspectiveCamera::default().with_start(Vec3::new(-3.0, 0.0, 30.0), Vec3::ZERO);
        let context = SceneContext::new(world, camera, ViewportSize::new(1280, 720));
        let driver = FrameDriver::new(context, follower, mode)
            .with_scroll_spinner(ScrollSpinner::new(stream.subscribe()));
        (driver, stream)
    }

    #[test]
    fn test_starts_idle_and_runs_once() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        assert_eq!(driver.state(), DriverState::Idle);
        assert!(driver.start());
        assert_eq!(driver.state(), DriverState::Running);
        assert!(!driver.start());
    }

    #[test]
    fn test_first_tick_starts_driver() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        let mut target = RecordingTarget::default();
        driver.tick(&mut target).unwrap();
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(target.draws, 1);
    }

    #[test]
    fn test_per_tick_rotation_ignores_wall_time() {
        let spin = Vec3::new(0.001, 0.005, 0.0);
        let (world, key) = spinning_world(spin);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        let mut target = RecordingTarget::default();

        // Irregular frame times
        let start = Instant::now();
        let mut now = start;
        for i in 0..100u64 {
            now += Duration::from_millis(1 + (i * 37) % 200);
            driver.tick_at(now, &mut target).unwrap();
        }

        let rotation = driver.context().world.get_entity(key).unwrap().transform.rotation;
        let expected = Vec3::new(0.5, 0.0, 0.25) + spin * 100.0;
        assert!((rotation - expected).length() < 1e-5);
        assert_eq!(driver.tick_count(), 100);
    }

    #[test]
    fn test_time_scaled_rotation() {
        let spin = Vec3::new(0.0, 0.01, 0.0);
        let (world, key) = spinning_world(spin);
        let (mut driver, _stream) = driver(world, RotationMode::TimeScaled { reference_hz: 60.0 });
        let mut target = RecordingTarget::default();

        let start = Instant::now();
        driver.start_at(start);
        // Two 30 Hz frames advance as far as four 60 Hz ticks
        driver.tick_at(start + Duration::from_secs_f32(1.0 / 30.0), &mut target).unwrap();
        driver.tick_at(start + Duration::from_secs_f32(2.0 / 30.0), &mut target).unwrap();

        let rotation = driver.context().world.get_entity(key).unwrap().transform.rotation;
        assert!((rotation.y - 0.04).abs() < 1e-4);
    }

    #[test]
    fn test_dirty_flags_cleared_after_draw() {
        let (world, _) = spinning_world(Vec3::new(0.0, 0.01, 0.0));
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        let mut target = RecordingTarget::default();

        driver.tick(&mut target).unwrap();
        assert!(target.dirty_seen[0]);
        assert!(!driver.context().world.has_dirty_entities());
    }

    #[test]
    fn test_still_world_stays_clean() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        let mut target = RecordingTarget::default();

        driver.tick(&mut target).unwrap();
        driver.tick(&mut target).unwrap();
        assert_eq!(target.dirty_seen, vec![true, false]);
    }

    #[test]
    fn test_draw_error_propagates() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        assert_eq!(driver.tick(&mut FailingTarget), Err("device lost"));
        assert_eq!(driver.tick_count(), 0);
    }

    #[test]
    fn test_scroll_is_not_applied_by_tick() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let (mut driver, mut stream) = driver(world, RotationMode::PerTick);
        let mut target = RecordingTarget::default();

        stream.publish(-1000.0);
        driver.tick(&mut target).unwrap();
        assert_eq!(target.camera_positions[0], Vec3::new(-3.0, 0.0, 30.0));

        assert!(driver.on_scroll());
        driver.tick(&mut target).unwrap();
        assert!((target.camera_positions[1] - Vec3::new(0.2, 0.0, 10.0)).length() < EPSILON);
    }

    #[test]
    fn test_scroll_spins_objects() {
        let (mut world, key) = spinning_world(Vec3::ZERO);
        world.get_entity_mut(key).unwrap().scroll_spin = Vec3::new(0.05, 0.0, 0.0);
        let (mut driver, mut stream) = driver(world, RotationMode::PerTick);

        stream.publish(0.0);
        stream.publish(-40.0);
        driver.on_scroll();

        let rotation = driver.context().world.get_entity(key).unwrap().transform.rotation;
        assert!((rotation.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect_only() {
        let (world, key) = spinning_world(Vec3::ZERO);
        let (mut driver, _stream) = driver(world, RotationMode::PerTick);
        let before = driver.context().world.get_entity(key).unwrap().transform;

        driver.resize(800, 400);
        assert_eq!(driver.context().viewport, ViewportSize::new(800, 400));
        assert!((driver.context().camera.aspect - 2.0).abs() < 1e-6);
        assert_eq!(driver.context().world.get_entity(key).unwrap().transform, before);

        driver.resize(0, 0);
        assert_eq!(driver.context().viewport, ViewportSize::new(800, 400));
    }

    #[test]
    fn test_orbit_mode_integrates_each_tick() {
        let (world, _) = spinning_world(Vec3::ZERO);
        let mut stream = ScrollStream::new();
        let mut config = FollowerConfig::default();
        config.mode = FollowerMode::Orbit;
        let follower = ViewportFollower::from_config(&config, stream.subscribe());
        let camera = PerspectiveCamera::default().with_start(Vec3::new(-3.0, 0.0, 30.0), Vec3::ZERO);
        let context = SceneContext::new(world, camera, ViewportSize::new(1280, 720));
        let mut driver = FrameDriver::new(context, follower, RotationMode::PerTick);
        let mut target = RecordingTarget::default();

        driver.tick(&mut target).unwrap();
        // Locked at 25 by the default orbit limits
        assert!((target.camera_positions[0].length() - 25.0).abs() < EPSILON);
    }
}
