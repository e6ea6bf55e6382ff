//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh and background pipelines
//! - Texture uploads as decoding finishes
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use moonscroll_core::{TextureCache, World};
use moonscroll_render::{
    context::{ContextError, RenderContext},
    pipeline::{BackgroundPipeline, FrameUniforms, MeshPipeline},
    PerspectiveCamera, RenderableScene,
};

use super::frame_driver::DrawTarget;
use crate::config::{HexColor, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or is outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// The surface did not produce a frame in time
    Timeout,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl RenderError {
    /// Whether the frame can simply be skipped
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RenderError::SurfaceLost | RenderError::Timeout)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::Timeout => write!(f, "Surface timeout"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::Timeout => RenderError::Timeout,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            e => RenderError::Other(format!("{:?}", e)),
        }
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    mesh_pipeline: MeshPipeline,
    background_pipeline: BackgroundPipeline,
    scene: RenderableScene,
    textures: TextureCache,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// Takes over `textures` so finished loads can be uploaded as they arrive.
    pub fn new(
        window: Arc<Window>,
        config: &RenderingConfig,
        vsync: bool,
        textures: TextureCache,
    ) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut mesh_pipeline = MeshPipeline::new(&context.device, context.config.format);
        let background_pipeline = BackgroundPipeline::new(&context.device, context.config.format);
        let scene = RenderableScene::new(&context.device, &context.queue);

        // Ensure depth texture exists
        mesh_pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            mesh_pipeline,
            background_pipeline,
            scene,
            textures,
            clear_color: clear_color(config.clear_color),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.mesh_pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        world: &World,
        camera: &PerspectiveCamera,
    ) -> Result<(), RenderError> {
        self.textures.poll();
        self.scene.sync(
            &self.context.device,
            &self.context.queue,
            world,
            &self.textures,
            self.mesh_pipeline.object_layout(),
            &mut self.background_pipeline,
        );

        let eye = camera.position;
        let frame_uniforms = FrameUniforms {
            view_matrix: camera.view_matrix(),
            projection_matrix: camera.projection_matrix(),
            camera_position: [eye.x, eye.y, eye.z, 1.0],
            ..Default::default()
        }
        .with_lights(world);
        self.mesh_pipeline
            .update_frame(&self.context.queue, &frame_uniforms);

        // Get surface texture
        let output = self.context.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Create command encoder
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.mesh_pipeline.render(
            &mut encoder,
            &view,
            &self.background_pipeline,
            &self.scene,
            self.clear_color,
        );

        // Submit
        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

impl DrawTarget for RenderSystem {
    type Error = RenderError;

    fn draw(&mut self, world: &World, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.render_frame(world, camera)
    }
}

fn clear_color(color: HexColor) -> wgpu::Color {
    let [r, g, b] = color.to_linear();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_surface_error_mapping() {
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Lost), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Outdated), RenderError::SurfaceLost));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::Timeout), RenderError::Timeout));
        assert!(matches!(RenderError::from(wgpu::SurfaceError::OutOfMemory), RenderError::OutOfMemory));
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(RenderError::SurfaceLost.is_recoverable());
        assert!(RenderError::Timeout.is_recoverable());
        assert!(!RenderError::OutOfMemory.is_recoverable());
        assert!(!RenderError::Other("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_clear_color_is_linear() {
        let black = clear_color(HexColor::BLACK);
        assert_eq!((black.r, black.g, black.b, black.a), (0.0, 0.0, 0.0, 1.0));
        let white = clear_color(HexColor::WHITE);
        assert!((white.r - 1.0).abs() < 1e-6);
    }
}
