//! Texture upload and image loading.
//!
//! Uploads never leak a texture binding: the binding active before the call is
//! restored before returning.

mod loader;
mod upload;

pub use loader::{load_image, load_image_memory, Image, ImageError};
pub use upload::{upload_rgba, TextureFilter, UploadError};
