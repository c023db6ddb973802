//! Colors used by queued shapes.

mod color;

pub use color::Color;
