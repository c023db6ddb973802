//! GL submission helpers used by the frame renderer.
//!
//! Convention:
//! - CPU geometry is in pixels (top-left origin, +Y down).
//! - The vertex shader maps to clip space with [`ortho_projection`].

mod projection;
mod scissor;
mod submit;

pub use projection::ortho_projection;
pub use scissor::clip_to_scissor;
pub use submit::{submit_commands, SubmitStats};
