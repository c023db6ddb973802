//! Font atlas baking.
//!
//! [`bake_atlas`] rasterizes the requested code point ranges with `fontdue`,
//! shelf-packs them next to a small opaque region and returns the RGBA atlas
//! plus its glyph table. `Device::bake_font` uploads the atlas and wraps the
//! table in a [`Font`].

mod bake;
mod font;
mod pack;
mod range;

use std::path::PathBuf;

use thiserror::Error;

use crate::alloc::AllocError;
use crate::texture::UploadError;

pub use bake::{
    alpha_to_rgba, bake_atlas, bake_custom_data, BakePlan, BakedAtlas, FontConfig,
    CUSTOM_PATTERN, CUSTOM_REGION_SIZE, MAX_ATLAS_HEIGHT,
};
pub use font::{Font, Glyph, LineMetrics};
pub use pack::{AtlasRect, PADDING};
pub use range::{GlyphRange, CYRILLIC_RANGES, DEFAULT_RANGES};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(String),

    #[error("pixel height {0} is not a positive number")]
    InvalidPixelHeight(f32),

    #[error("glyph ranges produce no characters")]
    EmptyRange,

    #[error("glyph range {first:#x}..={last:#x} is reversed")]
    InvalidRange { first: u32, last: u32 },

    #[error("atlas of {width}x{height} exceeds the size limit")]
    AtlasTooLarge { width: u32, height: u32 },

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error(transparent)]
    Upload(#[from] UploadError),
}
