//! menugl engine crate.
//!
//! Renders an immediate-mode menu on top of OpenGL 3.3 / ES 3.0:
//! - [`scene::CommandQueue`] collects shapes, text and images each frame
//! - [`convert`] tessellates them into a vertex/index buffer plus draw commands
//! - [`device::Device`] owns the GPU objects, bakes fonts and draws the frame
//!
//! All GL access goes through [`gl::GlApi`]; hosts using `glow` wrap their
//! context in [`gl::GlowGl`].

pub mod alloc;
pub mod convert;
pub mod coords;
pub mod device;
pub mod gl;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
pub mod texture;

pub use device::{Device, DeviceConfig, DeviceError, FrameStats};
pub use scene::CommandQueue;
