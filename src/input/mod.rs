//! Input handling module
//!
//! Provides input mapping from raw events to semantic actions, and the virtual
//! page the mouse wheel scrolls.

mod input_mapper;
mod scroll_position;

pub use input_mapper::{InputMapper, InputAction};
pub use scroll_position::ScrollPosition;
