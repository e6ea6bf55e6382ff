//! Moonscroll - a decorative scene that follows the scroll wheel
//!
//! Builds the scene from configuration, then draws it once per refresh while the
//! mouse wheel (or orbit drag) moves the camera.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use moonscroll::config::AppConfig;
use moonscroll::input::{InputAction, InputMapper, ScrollPosition};
use moonscroll::scene::SceneBuilder;
use moonscroll::systems::{
    FrameDriver, RenderSystem, RotationMode, SceneContext, ScrollSpinner, ViewportFollower,
    ViewportSize, WindowSystem,
};
use moonscroll_core::TextureCache;
use moonscroll_input::ScrollStream;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// Handed to the render system once the GPU is up
    textures: Option<TextureCache>,
    driver: FrameDriver,
    scroll: ScrollStream,
    scroll_position: ScrollPosition,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut textures = TextureCache::new();
        let scene = SceneBuilder::from_config(&config, &mut textures, &mut rand::thread_rng());

        let mut scroll = ScrollStream::new();
        let follower = ViewportFollower::from_config(&config.follower, scroll.subscribe());
        let spinner = ScrollSpinner::new(scroll.subscribe());

        let viewport = ViewportSize::new(config.window.width, config.window.height);
        let context = SceneContext::new(scene.world, scene.camera, viewport);
        let mut driver = FrameDriver::new(context, follower, RotationMode::from_config(&config.animation))
            .with_scroll_spinner(spinner);

        // The scroll handler runs once before the first frame
        let scroll_position = ScrollPosition::from_config(&config.follower.scroll);
        scroll.publish(scroll_position.offset());
        driver.on_scroll();

        Self {
            config,
            window: None,
            render: None,
            textures: Some(textures),
            driver,
            scroll,
            scroll_position,
        }
    }

    /// Publish a new scroll offset and let both subscribers react
    fn publish_scroll(&mut self, offset: f32) {
        log::debug!("Scroll offset {}", offset);
        self.scroll.publish(offset);
        self.driver.on_scroll();
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => self.driver.reset_camera(),
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ScrollToTop => {
                if let Some(offset) = self.scroll_position.scroll_to_top() {
                    self.publish_scroll(offset);
                }
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(render) = &mut self.render {
            render.resize(width, height);
        }
        self.driver.resize(width, height);
        if let Some(offset) = self.scroll_position.set_viewport_height(height) {
            self.publish_scroll(offset);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render) = &mut self.render else {
            return;
        };

        if let Err(e) = self.driver.tick(render) {
            if e.is_recoverable() {
                log::warn!("{}, skipping frame", e);
                render.reconfigure();
            } else {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        if let Some(window) = &self.window {
            let camera = &self.driver.context().camera;
            window.update_title(self.driver.follower().label(), camera.position);
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let textures = self.textures.take().unwrap_or_default();
        let render = match RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.config.window.vsync,
            textures,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.inner_size();
        self.window = Some(window);
        self.render = Some(render);
        self.resize(width, height);

        self.driver.start();
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action, event_loop);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.driver.follower_mut().on_mouse_button(button, state);
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.driver.follower_mut().on_pointer_lost();
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if self.driver.follower().captures_wheel() {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => y,
                        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                    };
                    self.driver.follower_mut().on_wheel(lines);
                } else if let Some(offset) = self.scroll_position.apply_wheel(delta) {
                    self.publish_scroll(offset);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.driver.follower_mut().on_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() -> Result<(), winit::error::EventLoopError> {
    // Load configuration before logging so the configured level applies
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Moonscroll");
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    // Create event loop
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Create and run application
    let mut app = App::new(config);
    event_loop.run_app(&mut app)
}
