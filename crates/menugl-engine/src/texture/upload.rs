use thiserror::Error;

use crate::gl::{GlApi, TextureId};

/// Sampling mode for uploaded textures. Both variants generate mipmaps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFilter {
    /// Linear filtering, nearest mip level. Used for loaded images.
    MipmapLinear,
    /// Nearest filtering, nearest mip level. Used for glyph atlases.
    MipmapNearest,
}

impl TextureFilter {
    /// `(min, mag)` filter enums.
    pub const fn gl_filters(self) -> (u32, u32) {
        match self {
            TextureFilter::MipmapLinear => (glow::LINEAR_MIPMAP_NEAREST, glow::LINEAR),
            TextureFilter::MipmapNearest => (glow::NEAREST_MIPMAP_NEAREST, glow::NEAREST),
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("texture size {width}x{height} is empty")]
    EmptyImage { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    SizeMismatch { width: u32, height: u32, expected: usize, actual: usize },

    #[error("failed to create texture: {0}")]
    Create(String),
}

/// Creates a 2D texture from tightly packed RGBA8 pixels.
///
/// Wrapping is clamp-to-edge on both axes and mipmaps are generated.
pub fn upload_rgba<G: GlApi + ?Sized>(
    gl: &G,
    width: u32,
    height: u32,
    pixels: &[u8],
    filter: TextureFilter,
) -> Result<TextureId, UploadError> {
    if width == 0 || height == 0 {
        return Err(UploadError::EmptyImage { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(UploadError::SizeMismatch { width, height, expected, actual: pixels.len() });
    }

    let texture = gl.create_texture().map_err(UploadError::Create)?;
    let previous = TextureId(gl.get_integer(glow::TEXTURE_BINDING_2D) as u32);

    let alignment = gl.get_integer(glow::UNPACK_ALIGNMENT);

    let (min, mag) = filter.gl_filters();
    gl.bind_texture(texture);
    gl.tex_parameter(glow::TEXTURE_MIN_FILTER, min as i32);
    gl.tex_parameter(glow::TEXTURE_MAG_FILTER, mag as i32);
    gl.tex_parameter(glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
    gl.tex_parameter(glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
    // Rows are tightly packed.
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
    gl.tex_image_rgba8(width, height, pixels);
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, alignment);
    gl.generate_mipmap();
    gl.bind_texture(previous);

    log::debug!("uploaded {width}x{height} texture {} ({filter:?})", texture.0);
    Ok(texture)
}
