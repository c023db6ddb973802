//! Geometry types shared by the queue, the converter and the renderer.
//!
//! Canonical CPU space:
//! - pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! The projection uploaded by the renderer flips Y into GL clip space.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
