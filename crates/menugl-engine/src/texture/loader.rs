use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::gl::{GlApi, TextureId};

use super::upload::{upload_rgba, TextureFilter, UploadError};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}

/// A GPU-resident image usable in `draw_image` commands.
///
/// The texture is owned by the caller; call [`Image::release`] once no queued
/// command references it anymore.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Image {
    pub texture: TextureId,
    pub width: u32,
    pub height: u32,
}

impl Image {
    /// Deletes the texture.
    pub fn release<G: GlApi + ?Sized>(self, gl: &G) {
        gl.delete_texture(self.texture);
    }
}

/// Reads, decodes and uploads an image file.
///
/// Pixels are converted to RGBA8 whatever the source format, sampled with
/// linear mipmap filtering and clamp-to-edge wrapping.
pub fn load_image<G: GlApi + ?Sized>(gl: &G, path: impl AsRef<Path>) -> Result<Image, ImageError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| {
        log::warn!("failed to load image {}: {source}", path.display());
        ImageError::Io { path: path.to_path_buf(), source }
    })?;

    let image = load_image_memory(gl, &bytes)?;
    log::info!("loaded image {} ({}x{})", path.display(), image.width, image.height);
    Ok(image)
}

/// Decodes and uploads an encoded image held in memory.
pub fn load_image_memory<G: GlApi + ?Sized>(gl: &G, bytes: &[u8]) -> Result<Image, ImageError> {
    let decoded = image::load_from_memory(bytes)
        .inspect_err(|e| log::warn!("failed to decode image: {e}"))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();

    let texture = upload_rgba(gl, width, height, decoded.as_raw(), TextureFilter::MipmapLinear)?;
    Ok(Image { texture, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, Kind, RecordingGl};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("menugl-{}-{name}", std::process::id()))
    }

    #[test]
    fn load_png_uploads_rgba_pixels() {
        let path = temp_path("checker.png");
        let img = image::RgbaImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 { image::Rgba([255, 0, 0, 255]) } else { image::Rgba([0, 0, 255, 128]) }
        });
        img.save(&path).unwrap();

        let gl = RecordingGl::new();
        let loaded = load_image(&gl, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((loaded.width, loaded.height), (3, 2));
        let (w, h, pixels) = gl.texture_image(loaded.texture).unwrap();
        assert_eq!((w, h), (3, 2));
        assert_eq!(&pixels[..4], &[255, 0, 0, 255]);
        assert_eq!(&pixels[4..8], &[0, 0, 255, 128]);
        assert!(gl.calls().contains(&Call::TexParameter(
            glow::TEXTURE_MIN_FILTER,
            glow::LINEAR_MIPMAP_NEAREST as i32
        )));
        assert_eq!(gl.get_integer(glow::TEXTURE_BINDING_2D), 0);
        assert_eq!(gl.get_integer(glow::UNPACK_ALIGNMENT), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let gl = RecordingGl::new();
        let err = load_image(&gl, temp_path("does-not-exist.png")).unwrap_err();
        assert!(matches!(err, ImageError::Io { .. }));
        assert_eq!(gl.live_count(Kind::Texture), 0);
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let gl = RecordingGl::new();
        let err = load_image_memory(&gl, b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
        assert_eq!(gl.live_count(Kind::Texture), 0);
    }

    #[test]
    fn release_deletes_texture() {
        let gl = RecordingGl::new();
        let mut png = Vec::new();
        image::RgbaImage::new(1, 1)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let img = load_image_memory(&gl, &png).unwrap();
        assert!(gl.is_live(Kind::Texture, img.texture.0));
        img.release(&gl);
        assert!(!gl.is_live(Kind::Texture, img.texture.0));
    }
}
