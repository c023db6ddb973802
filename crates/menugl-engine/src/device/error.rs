use thiserror::Error;

use crate::alloc::AllocError;
use crate::gl::ShaderStage;
use crate::texture::UploadError;

/// Failure to set up the device's GPU objects.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("menu program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("menu program has no active `{0}` attribute")]
    MissingAttribute(&'static str),

    #[error("menu program has no active `{0}` uniform")]
    MissingUniform(&'static str),

    #[error("failed to create {what}: {message}")]
    Create { what: &'static str, message: String },

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
