//! GPU device for the menu renderer.
//!
//! This module is responsible for:
//! - compiling and linking the menu shader program
//! - creating the streaming vertex/index buffers and vertex array
//! - baking font atlases and tracking their textures
//! - rendering a [`CommandQueue`](crate::scene::CommandQueue) per frame
//!
//! A [`Device`] is an explicit context: create it with [`Device::init`] once the
//! GL context is current and release it with [`Device::shutdown`].

mod context;
mod error;
mod init;
mod shaders;

pub use context::{Device, FrameStats};
pub use error::DeviceError;
pub use init::{DeviceConfig, ShaderVersion};
