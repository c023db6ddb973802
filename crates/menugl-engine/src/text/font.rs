use crate::gl::TextureId;

use super::bake::BakedAtlas;

/// One baked glyph.
///
/// The bounding box is relative to the pen position at the top of the line
/// (+Y down). UVs address the atlas texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub codepoint: char,
    pub advance: f32,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl Glyph {
    /// `true` when the glyph has no visible pixels (e.g. space).
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Vertical font metrics in pixels. `descent` is negative below the baseline.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

/// A baked font: its glyph table plus the atlas texture the glyphs live in.
///
/// The glyph table is owned here. The atlas texture belongs to the `Device`
/// that baked the font and is deleted by `Device::shutdown`.
#[derive(Debug)]
pub struct Font {
    pixel_height: f32,
    metrics: LineMetrics,
    glyphs: Box<[Glyph]>,
    fallback: Option<usize>,
    texture: TextureId,
}

impl Font {
    /// Takes ownership of the atlas glyph table. Pixels are dropped.
    pub fn from_atlas(atlas: BakedAtlas, texture: TextureId, fallback: char) -> Self {
        let glyphs = atlas.glyphs.into_boxed_slice();
        let fallback = glyphs
            .binary_search_by(|g| g.codepoint.cmp(&fallback))
            .ok()
            .or(if glyphs.is_empty() { None } else { Some(0) });

        Self {
            pixel_height: atlas.pixel_height,
            metrics: atlas.metrics,
            glyphs,
            fallback,
            texture,
        }
    }

    #[inline]
    pub fn pixel_height(&self) -> f32 {
        self.pixel_height
    }

    #[inline]
    pub fn metrics(&self) -> LineMetrics {
        self.metrics
    }

    #[inline]
    pub fn ascent(&self) -> f32 {
        self.metrics.ascent
    }

    #[inline]
    pub fn descent(&self) -> f32 {
        self.metrics.descent
    }

    /// Distance between consecutive baselines.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.metrics.ascent - self.metrics.descent + self.metrics.line_gap
    }

    #[inline]
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Exact lookup, `None` when `c` was not baked.
    pub fn lookup(&self, c: char) -> Option<&Glyph> {
        self.glyphs
            .binary_search_by(|g| g.codepoint.cmp(&c))
            .ok()
            .map(|i| &self.glyphs[i])
    }

    /// Glyph for `c`, or the fallback glyph when `c` was not baked.
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        self.lookup(c).or_else(|| self.fallback.map(|i| &self.glyphs[i]))
    }

    /// Sum of advances for a single line of text.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().filter_map(|c| self.glyph(c)).map(|g| g.advance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(c: char, advance: f32) -> Glyph {
        Glyph { codepoint: c, advance, x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0, u0: 0.0, v0: 0.0, u1: 0.1, v1: 0.1 }
    }

    fn font(chars: &[(char, f32)], fallback: char) -> Font {
        let atlas = BakedAtlas {
            width: 4,
            height: 4,
            pixels: vec![0; 64],
            glyphs: chars.iter().map(|&(c, a)| glyph(c, a)).collect(),
            custom: Default::default(),
            metrics: LineMetrics { ascent: 10.0, descent: -3.0, line_gap: 1.0 },
            pixel_height: 13.0,
        };
        Font::from_atlas(atlas, TextureId(5), fallback)
    }

    #[test]
    fn unknown_chars_use_fallback() {
        let f = font(&[('?', 4.0), ('a', 7.0)], '?');
        assert_eq!(f.glyph('a').unwrap().advance, 7.0);
        assert_eq!(f.glyph('z').unwrap().codepoint, '?');
        assert!(f.lookup('z').is_none());
    }

    #[test]
    fn missing_fallback_uses_first_glyph() {
        let f = font(&[('a', 7.0), ('b', 8.0)], '?');
        assert_eq!(f.glyph('#').unwrap().codepoint, 'a');
    }

    #[test]
    fn text_width_sums_advances() {
        let f = font(&[('?', 4.0), ('a', 7.0), ('b', 8.0)], '?');
        assert_eq!(f.text_width("abba"), 30.0);
        assert_eq!(f.text_width("a!"), 11.0);
        assert_eq!(f.text_width(""), 0.0);
    }

    #[test]
    fn line_height_spans_ascent_descent_gap() {
        assert_eq!(font(&[], '?').line_height(), 14.0);
        assert_eq!(font(&[], '?').texture(), TextureId(5));
    }
}
