use crate::alloc::{AllocError, Allocator};

use super::font::{Glyph, LineMetrics};
use super::pack::{atlas_width, pack_shelves, AtlasRect};
use super::range::{collect_codepoints, GlyphRange};
use super::FontError;

/// Size of the opaque region reserved in every atlas for solid-color shapes.
pub const CUSTOM_REGION_SIZE: u32 = 2;

/// Fill pattern of the custom region, row by row. `'.'` is opaque, `'X'` clear.
pub const CUSTOM_PATTERN: &str = "....";

/// Tallest atlas we are willing to allocate.
pub const MAX_ATLAS_HEIGHT: u32 = 8192;

/// What to bake.
#[derive(Debug, Clone, Copy)]
pub struct FontConfig<'a> {
    pub pixel_height: f32,
    pub ranges: &'a [GlyphRange],
    /// Glyph substituted for characters outside `ranges`.
    pub fallback: char,
}

impl<'a> FontConfig<'a> {
    pub fn new(pixel_height: f32, ranges: &'a [GlyphRange]) -> Self {
        Self { pixel_height, ranges, fallback: '?' }
    }
}

/// Result of the measuring pass: how many glyphs a bake produces and how
/// much scratch memory packing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakePlan {
    pub glyph_count: usize,
    pub scratch_size: usize,
    codepoints: Vec<char>,
}

impl BakePlan {
    pub fn measure(config: &FontConfig<'_>) -> Result<Self, FontError> {
        if !(config.pixel_height.is_finite() && config.pixel_height > 0.0) {
            return Err(FontError::InvalidPixelHeight(config.pixel_height));
        }
        if let Some(bad) = config.ranges.iter().find(|r| !r.is_valid()) {
            return Err(FontError::InvalidRange { first: bad.first, last: bad.last });
        }

        let codepoints = collect_codepoints(config.ranges);
        if codepoints.is_empty() {
            return Err(FontError::EmptyRange);
        }

        // One packing rect per glyph plus the custom region.
        let scratch_size = (codepoints.len() + 1) * size_of::<AtlasRect>();
        Ok(Self { glyph_count: codepoints.len(), scratch_size, codepoints })
    }

    pub fn codepoints(&self) -> &[char] {
        &self.codepoints
    }
}

/// CPU side of a baked font: the RGBA atlas image and the glyph table.
#[derive(Debug)]
pub struct BakedAtlas {
    pub width: u32,
    pub height: u32,
    /// RGBA8, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Sorted by code point.
    pub glyphs: Vec<Glyph>,
    pub custom: AtlasRect,
    pub metrics: LineMetrics,
    pub pixel_height: f32,
}

impl BakedAtlas {
    /// Texture coordinate at the center of the custom region's first texel.
    pub fn null_uv(&self) -> [f32; 2] {
        [
            (self.custom.x as f32 + 0.5) / self.width as f32,
            (self.custom.y as f32 + 0.5) / self.height as f32,
        ]
    }
}

/// Rasterizes and packs every glyph of `config` from the TrueType/OpenType
/// blob `ttf`. Atlas images are allocated through `allocator`.
pub fn bake_atlas(
    ttf: &[u8],
    config: &FontConfig<'_>,
    allocator: &Allocator,
) -> Result<BakedAtlas, FontError> {
    let plan = BakePlan::measure(config)?;

    let font = fontdue::Font::from_bytes(ttf, fontdue::FontSettings::default())
        .map_err(|e| FontError::Parse(e.to_string()))?;
    let px = config.pixel_height;

    let metrics = font
        .horizontal_line_metrics(px)
        .map(|m| LineMetrics { ascent: m.ascent, descent: m.descent, line_gap: m.line_gap })
        .unwrap_or_else(|| {
            log::warn!("font has no horizontal metrics, estimating from pixel height");
            LineMetrics { ascent: px * 0.8, descent: -px * 0.2, line_gap: 0.0 }
        });

    let mut rects: Vec<AtlasRect> = Vec::new();
    rects
        .try_reserve_exact(plan.glyph_count + 1)
        .map_err(|_| AllocError { size: plan.scratch_size })?;
    rects.push(AtlasRect::sized(CUSTOM_REGION_SIZE, CUSTOM_REGION_SIZE));

    let mut bitmaps = Vec::with_capacity(plan.glyph_count);
    let mut widest = CUSTOM_REGION_SIZE;
    for &c in plan.codepoints() {
        let (m, bitmap) = font.rasterize(c, px);
        widest = widest.max(m.width as u32);
        rects.push(AtlasRect::sized(m.width as u32, m.height as u32));
        bitmaps.push((m, bitmap));
    }

    let width = atlas_width(plan.glyph_count, widest);
    let used = pack_shelves(&mut rects, width);
    let height = used.next_power_of_two();
    if height > MAX_ATLAS_HEIGHT {
        return Err(FontError::AtlasTooLarge { width, height });
    }

    let mut alpha = allocator.alloc(width as usize * height as usize)?;
    let custom = rects[0];
    bake_custom_data(&mut alpha, width, custom, CUSTOM_PATTERN, 0xFF, 0x00);

    let (w, h) = (width as f32, height as f32);
    let mut glyphs = Vec::with_capacity(plan.glyph_count);
    for ((&c, (m, bitmap)), rect) in plan.codepoints().iter().zip(&bitmaps).zip(&rects[1..]) {
        blit(&mut alpha, width, rect, bitmap);

        let x0 = m.xmin as f32;
        let y0 = metrics.ascent - (m.ymin as f32 + m.height as f32);
        glyphs.push(Glyph {
            codepoint: c,
            advance: m.advance_width,
            x0,
            y0,
            x1: x0 + m.width as f32,
            y1: y0 + m.height as f32,
            u0: rect.x as f32 / w,
            v0: rect.y as f32 / h,
            u1: (rect.x + rect.w) as f32 / w,
            v1: (rect.y + rect.h) as f32 / h,
        });
    }
    drop(bitmaps);

    let mut pixels = match allocator.alloc(alpha.len() * 4) {
        Ok(buf) => buf,
        Err(e) => {
            allocator.free(alpha);
            return Err(e.into());
        }
    };
    alpha_to_rgba(&alpha, &mut pixels);
    allocator.free(alpha);

    log::debug!(
        "baked {} glyphs at {px}px into a {width}x{height} atlas",
        glyphs.len()
    );

    Ok(BakedAtlas { width, height, pixels, glyphs, custom, metrics, pixel_height: px })
}

/// Copies a tightly packed glyph bitmap into the atlas at `rect`.
fn blit(atlas: &mut [u8], atlas_width: u32, rect: &AtlasRect, bitmap: &[u8]) {
    let (w, stride) = (rect.w as usize, atlas_width as usize);
    if w == 0 {
        return;
    }
    for (row, src) in bitmap.chunks_exact(w).take(rect.h as usize).enumerate() {
        let start = (rect.y as usize + row) * stride + rect.x as usize;
        atlas[start..start + w].copy_from_slice(src);
    }
}

/// Fills `region` of an alpha atlas from a character pattern laid out row
/// by row. `'.'` writes `white`, `'X'` writes `black`, anything else is left
/// untouched.
pub fn bake_custom_data(
    alpha: &mut [u8],
    atlas_width: u32,
    region: AtlasRect,
    pattern: &str,
    white: u8,
    black: u8,
) {
    let stride = atlas_width as usize;
    for (i, b) in pattern.bytes().take((region.w * region.h) as usize).enumerate() {
        let (px, py) = (i % region.w as usize, i / region.w as usize);
        let at = (region.y as usize + py) * stride + region.x as usize + px;
        match b {
            b'.' => alpha[at] = white,
            b'X' => alpha[at] = black,
            _ => {}
        }
    }
}

/// Expands one-channel coverage to RGBA8 white with alpha = coverage.
///
/// `rgba` must hold at least `alpha.len() * 4` bytes.
pub fn alpha_to_rgba(alpha: &[u8], rgba: &mut [u8]) {
    for (dst, &a) in rgba.chunks_exact_mut(4).zip(alpha) {
        dst.copy_from_slice(&[0xFF, 0xFF, 0xFF, a]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::Handle;
    use crate::text::range::DEFAULT_RANGES;

    const DEJAVU: &[u8] =
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSansMono.ttf"));

    fn refuse(_: Handle, size: usize) -> Result<Vec<u8>, AllocError> {
        Err(AllocError { size })
    }

    #[test]
    fn bake_produces_measured_glyph_count() {
        let config = FontConfig::new(16.0, DEFAULT_RANGES);
        let plan = BakePlan::measure(&config).unwrap();
        let atlas = bake_atlas(DEJAVU, &config, &Allocator::host()).unwrap();

        assert_eq!(atlas.glyphs.len(), plan.glyph_count);
        assert!(atlas.width > 0 && atlas.height > 0);
        assert!(atlas.height.is_power_of_two());
        assert_eq!(atlas.pixels.len(), (atlas.width * atlas.height * 4) as usize);

        let c = atlas.custom;
        assert_eq!((c.w, c.h), (CUSTOM_REGION_SIZE, CUSTOM_REGION_SIZE));
        assert!(c.x + c.w <= atlas.width && c.y + c.h <= atlas.height);
    }

    #[test]
    fn custom_region_is_opaque_white() {
        let atlas = bake_atlas(DEJAVU, &FontConfig::new(13.0, DEFAULT_RANGES), &Allocator::host())
            .unwrap();
        let c = atlas.custom;
        for y in c.y..c.y + c.h {
            for x in c.x..c.x + c.w {
                let at = ((y * atlas.width + x) * 4) as usize;
                assert_eq!(&atlas.pixels[at..at + 4], &[255, 255, 255, 255]);
            }
        }
        let [u, v] = atlas.null_uv();
        assert!(u > 0.0 && u < 1.0 && v > 0.0 && v < 1.0);
    }

    #[test]
    fn glyph_boxes_are_consistent() {
        let atlas = bake_atlas(DEJAVU, &FontConfig::new(20.0, DEFAULT_RANGES), &Allocator::host())
            .unwrap();
        assert!(atlas.glyphs.windows(2).all(|w| w[0].codepoint < w[1].codepoint));

        let a = atlas.glyphs.iter().find(|g| g.codepoint == 'A').unwrap();
        assert!(a.advance > 0.0);
        assert!(a.x1 > a.x0 && a.y1 > a.y0);
        assert!(a.u1 > a.u0 && a.v1 > a.v0);
        // Capital letters sit on the baseline, below the top of the line.
        assert!(a.y0 >= 0.0);
        approx::assert_abs_diff_eq!(a.y1, atlas.metrics.ascent, epsilon = 1.0);

        let space = atlas.glyphs.iter().find(|g| g.codepoint == ' ').unwrap();
        assert!(space.is_blank());
        assert!(space.advance > 0.0);
    }

    #[test]
    fn empty_and_invalid_ranges_are_rejected() {
        let err = BakePlan::measure(&FontConfig::new(16.0, &[])).unwrap_err();
        assert!(matches!(err, FontError::EmptyRange));

        let bad = [GlyphRange::new(0x80, 0x20)];
        let err = BakePlan::measure(&FontConfig::new(16.0, &bad)).unwrap_err();
        assert!(matches!(err, FontError::InvalidRange { first: 0x80, last: 0x20 }));

        let surrogates = [GlyphRange::new(0xD800, 0xD8FF)];
        let err = BakePlan::measure(&FontConfig::new(16.0, &surrogates)).unwrap_err();
        assert!(matches!(err, FontError::EmptyRange));
    }

    #[test]
    fn bad_pixel_height_is_rejected() {
        let err = BakePlan::measure(&FontConfig::new(0.0, DEFAULT_RANGES)).unwrap_err();
        assert!(matches!(err, FontError::InvalidPixelHeight(_)));
    }

    #[test]
    fn garbage_font_is_parse_error() {
        let err = bake_atlas(b"not a font", &FontConfig::new(16.0, DEFAULT_RANGES), &Allocator::host())
            .unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn allocator_failure_is_reported() {
        let refusing = Allocator { alloc: refuse, ..Allocator::host() };
        let err = bake_atlas(DEJAVU, &FontConfig::new(16.0, DEFAULT_RANGES), &refusing).unwrap_err();
        assert!(matches!(err, FontError::Alloc(_)));
    }

    #[test]
    fn rgba_alpha_matches_source() {
        let alpha: Vec<u8> = (0..=255).collect();
        let mut rgba = vec![0; alpha.len() * 4];
        alpha_to_rgba(&alpha, &mut rgba);
        for (px, &a) in rgba.chunks_exact(4).zip(&alpha) {
            assert_eq!(px, &[255, 255, 255, a]);
        }
    }

    #[test]
    fn custom_pattern_marks_opaque_and_clear() {
        let mut alpha = vec![7u8; 16];
        let region = AtlasRect { x: 1, y: 1, w: 2, h: 2 };
        bake_custom_data(&mut alpha, 4, region, ".X-.", 0xFF, 0x00);
        assert_eq!(alpha[5], 0xFF);
        assert_eq!(alpha[6], 0x00);
        assert_eq!(alpha[9], 7);
        assert_eq!(alpha[10], 0xFF);
        assert_eq!(alpha[0], 7);
    }
}
