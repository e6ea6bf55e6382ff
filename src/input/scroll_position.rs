//! Virtual page scroll offset
//!
//! A desktop window has no page to scroll, so mouse wheel input moves an offset
//! over a page of fixed height instead. The offset is the top of the page relative
//! to the top of the viewport: 0 at the top, negative once scrolled down, and
//! never past the bottom of the page.

use winit::event::MouseScrollDelta;

use crate::config::ScrollConfig;

/// Scroll offset of a virtual page
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPosition {
    offset: f32,
    page_height: f32,
    viewport_height: f32,
    line_height: f32,
}

impl ScrollPosition {
    pub fn new(page_height: f32, line_height: f32) -> Self {
        Self {
            offset: 0.0,
            page_height: page_height.max(0.0),
            viewport_height: 0.0,
            line_height,
        }
    }

    pub fn from_config(config: &ScrollConfig) -> Self {
        Self::new(config.page_height, config.line_height)
    }

    /// Current offset, 0 at the top of the page
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Lowest reachable offset
    pub fn min_offset(&self) -> f32 {
        -(self.page_height - self.viewport_height).max(0.0)
    }

    /// Track the viewport height
    ///
    /// Returns the new offset if the taller viewport pulled it back up.
    pub fn set_viewport_height(&mut self, height: u32) -> Option<f32> {
        self.viewport_height = height as f32;
        self.set_offset(self.offset)
    }

    /// Apply a mouse wheel event
    ///
    /// Returns the new offset if it changed.
    pub fn apply_wheel(&mut self, delta: MouseScrollDelta) -> Option<f32> {
        let pixels = match delta {
            MouseScrollDelta::LineDelta(_, y) => y * self.line_height,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
        };
        self.scroll_by(pixels)
    }

    /// Move the page by `pixels` (positive towards the top)
    pub fn scroll_by(&mut self, pixels: f32) -> Option<f32> {
        self.set_offset(self.offset + pixels)
    }

    /// Jump back to the top of the page
    pub fn scroll_to_top(&mut self) -> Option<f32> {
        self.set_offset(0.0)
    }

    fn set_offset(&mut self, offset: f32) -> Option<f32> {
        let clamped = offset.clamp(self.min_offset(), 0.0);
        if clamped == self.offset {
            return None;
        }
        self.offset = clamped;
        Some(clamped)
    }
}
