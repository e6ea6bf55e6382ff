//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

mod frame_driver;
mod render;
mod scroll_spinner;
mod viewport;
mod window;

pub use frame_driver::{DrawTarget, DriverState, FrameDriver, RotationMode, SceneContext, ViewportSize};
pub use render::{RenderError, RenderSystem};
pub use scroll_spinner::ScrollSpinner;
pub use viewport::ViewportFollower;
pub use window::{WindowError, WindowSystem};
