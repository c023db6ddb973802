//! Command queue filled by the menu layer each frame.
//!
//! Responsibilities:
//! - store renderer-agnostic shape commands in emission order
//! - attach the effective clip rectangle to every command
//! - keep shape-specific payloads and push helpers isolated under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::ShapeCmd;
pub use list::{CommandQueue, QueueItem};
