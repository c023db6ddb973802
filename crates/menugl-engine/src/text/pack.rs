/// Pixels left empty between packed rectangles and around the atlas border.
pub const PADDING: u32 = 1;

/// Rectangle inside the atlas, in pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl AtlasRect {
    #[inline]
    pub const fn sized(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// Atlas width for `glyph_count` glyphs whose widest bitmap is `widest` pixels.
pub(crate) fn atlas_width(glyph_count: usize, widest: u32) -> u32 {
    let base = if glyph_count > 1000 { 1024 } else { 512 };
    base.max((widest + 2 * PADDING).next_power_of_two())
}

/// Shelf-packs `rects` in order into a `width`-wide atlas.
///
/// Rects move to a new shelf when they do not fit horizontally. Returns the
/// height used, including the bottom padding.
pub(crate) fn pack_shelves(rects: &mut [AtlasRect], width: u32) -> u32 {
    let mut cursor_x = PADDING;
    let mut cursor_y = PADDING;
    let mut row_height = 0;

    for rect in rects.iter_mut() {
        if cursor_x + rect.w + PADDING > width && cursor_x > PADDING {
            cursor_y += row_height + PADDING;
            cursor_x = PADDING;
            row_height = 0;
        }

        rect.x = cursor_x;
        rect.y = cursor_y;

        cursor_x += rect.w + PADDING;
        row_height = row_height.max(rect.h);
    }

    cursor_y + row_height + PADDING
}
